//! MCP server implementation.

use crate::resolver::DocsResolver;
use crate::tools::list_sites::handle_list_sites;
use crate::tools::rtfm::{RtfmRequest, handle_rtfm};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for Sphinx documentation lookups
#[derive(Clone)]
pub struct RtfmServer {
    /// Shared resolver (registry and inventory cache)
    resolver: Arc<DocsResolver>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for RtfmServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtfmServer")
            .field("resolver", &self.resolver)
            .finish()
    }
}

#[tool_router]
impl RtfmServer {
    pub fn new(resolver: Arc<DocsResolver>) -> Self {
        Self {
            resolver,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared resolver.
    pub fn resolver(&self) -> &Arc<DocsResolver> {
        &self.resolver
    }

    #[tool(
        description = "Find documentation links for a symbol on a Sphinx documentation site. Give a site alias (see list_sites) and a search term; fuzzy matching returns up to 8 ranked links. Without a search term, returns the site's documentation root.",
        input_schema = inline_schema_for_type::<RtfmRequest>()
    )]
    async fn rtfm(
        &self,
        Parameters(request): Parameters<RtfmRequest>,
    ) -> std::result::Result<String, String> {
        handle_rtfm(&self.resolver, request).await
    }

    #[tool(description = "List the documentation sites and aliases available to rtfm.")]
    async fn list_sites(&self) -> std::result::Result<String, String> {
        Ok(handle_list_sites(self.resolver.registry()))
    }
}

#[tool_handler]
impl ServerHandler for RtfmServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "sphinx-rtfm: links to Python project documentation built with Sphinx. \
                 Use list_sites to see the available sites, then rtfm with a site alias \
                 and a symbol name such as 'Client' or 'get_data'.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline definitions instead of $ref patterns.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    // A boolean `true` schema accepts anything, as does an empty object.
    let json_object = match serde_json::Value::from(schema) {
        serde_json::Value::Object(object) => object,
        _ => JsonObject::new(),
    };

    Arc::new(json_object)
}
