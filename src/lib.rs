//! Sphinx documentation lookups ("read the fine manual").
//!
//! Fetches a site's `objects.inv`, decodes it into a table of search keys and
//! URLs, caches the table per site alias, and answers fuzzy queries against it.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod inventory;
pub mod registry;
pub mod resolver;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;
pub mod warmup;

pub use cache::LookupCache;
pub use config::Config;
pub use error::{Result, RtfmError};
pub use fetch::InventoryClient;
pub use inventory::{Entry, InventoryMeta, InventoryTable, parse_inventory};
pub use registry::SiteRegistry;
pub use resolver::{DocsResolver, LookupOutcome};
pub use search::{DEFAULT_LIMIT, fuzzy_search};
pub use server::RtfmServer;
