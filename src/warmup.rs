//! Background prefetching of inventory tables.
//!
//! When enabled, every configured alias is built once at startup so the first
//! lookup for a site does not pay for the download. Builds go through the
//! regular cache, so a lookup that arrives mid-prefetch awaits the same build.

use crate::resolver::DocsResolver;
use std::sync::Arc;

/// Builds inventory tables for every configured site.
#[derive(Debug)]
pub struct Prefetcher {
    resolver: Arc<DocsResolver>,
}

impl Prefetcher {
    pub fn new(resolver: Arc<DocsResolver>) -> Self {
        Self { resolver }
    }

    /// Build every alias that is not cached yet.
    ///
    /// Returns the number of aliases that ended up cached. Failures are logged
    /// and left for a later lookup to retry.
    pub async fn run(&self) -> usize {
        let cache = self.resolver.cache();
        let mut ready = 0;

        for (alias, base_url) in self.resolver.registry().iter() {
            if cache.is_cached(alias).await {
                ready += 1;
                continue;
            }

            match cache.get_or_build(alias, base_url).await {
                Ok(table) => {
                    tracing::debug!("Prefetched {} entries for {}", table.len(), alias);
                    ready += 1;
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!("Prefetch for {} failed: {}", alias, e);
                }
                Err(e) => {
                    tracing::error!("Inventory for {} is unusable: {}", alias, e);
                }
            }

            // Yield to allow other tasks to run
            tokio::task::yield_now().await;
        }

        tracing::info!(
            "Prefetch finished: {}/{} sites cached",
            ready,
            self.resolver.registry().len()
        );
        ready
    }
}

/// Spawn the prefetcher as a tokio task.
pub fn spawn_prefetch(resolver: Arc<DocsResolver>) -> tokio::task::JoinHandle<usize> {
    tokio::spawn(async move { Prefetcher::new(resolver).run().await })
}
