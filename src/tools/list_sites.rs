//! Listing of configured documentation sites.

use crate::registry::SiteRegistry;
use std::fmt::Write as _;

/// Render the registry as Markdown, one line per site with all its aliases.
pub fn handle_list_sites(registry: &SiteRegistry) -> String {
    if registry.is_empty() {
        return "No documentation sites are configured.".to_string();
    }

    let mut output = String::from("Available documentation sites:\n\n");
    for (url, aliases) in registry.grouped() {
        let aliases: Vec<String> = aliases.iter().map(|a| format!("`{}`", a)).collect();
        let _ = writeln!(output, "• {} → {}", aliases.join(", "), url);
    }
    output
}
