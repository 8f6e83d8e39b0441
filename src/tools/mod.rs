//! MCP tool handlers.

pub mod list_sites;
pub mod rtfm;
