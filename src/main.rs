use rmcp::{ServiceExt, transport::stdio};
use sphinx_rtfm::{Config, DocsResolver, RtfmServer, warmup::spawn_prefetch};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sphinx_rtfm::tracing::init();

    let config = Config::load()?;
    let resolver = Arc::new(DocsResolver::from_config(&config)?);

    tracing::info!(
        "Starting sphinx-rtfm MCP server ({} sites)",
        resolver.registry().len()
    );

    if config.prefetch {
        let _prefetch = spawn_prefetch(Arc::clone(&resolver));
    }

    // Create and serve the MCP server over stdio
    let server = RtfmServer::new(Arc::clone(&resolver));
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    resolver.cache().shutdown();
    Ok(())
}
