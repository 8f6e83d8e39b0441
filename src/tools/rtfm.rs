//! Documentation link lookup handler.

use crate::resolver::{DocsResolver, LookupOutcome};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Heading placed above a list of matches.
pub const RESULTS_TITLE: &str = "Reading the docs are a drag...";

/// Reply when a search term matches nothing.
pub const NOTHING_FOUND: &str = "Could not find anything. Sorry.";

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct RtfmRequest {
    /// Documentation site alias (for example `dpy`, `lightbulb`, `asyncio`)
    pub site: String,
    /// Symbol to search for; omit to get the documentation root
    #[serde(default)]
    pub query: Option<String>,
}

/// Execute a lookup and render it as Markdown.
///
/// Inventory failures are returned as `Err` with a user-facing message.
pub async fn handle_rtfm(resolver: &DocsResolver, request: RtfmRequest) -> Result<String, String> {
    let outcome = resolver
        .lookup(&request.site, request.query.as_deref())
        .await
        .map_err(|e| e.to_string())?;

    Ok(format_outcome(&outcome))
}

/// Render a lookup outcome.
pub fn format_outcome(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::BaseUrl(url) => url.to_string(),
        LookupOutcome::NothingFound => NOTHING_FOUND.to_string(),
        LookupOutcome::NotAvailable { site, suggestions } => {
            let mut msg = format!("RTFM not available for {}.", site);
            if !suggestions.is_empty() {
                let names: Vec<String> = suggestions.iter().map(|s| format!("`{}`", s)).collect();
                let _ = write!(msg, " Did you mean {}?", names.join(", "));
            }
            msg
        }
        LookupOutcome::Matches(entries) => {
            let mut result = format!("**{}**\n\n", RESULTS_TITLE);
            for entry in entries {
                let _ = writeln!(result, "[`{}`]({})", entry.key, entry.url);
            }
            result
        }
    }
}
