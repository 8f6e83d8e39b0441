//! Per-site cache of parsed inventory tables.
//!
//! Tables are built at most once per alias at a time: concurrent lookups for
//! the same uncached alias await one shared build future. A table is installed
//! only after it has been fully fetched and parsed, so readers never observe a
//! partial table, and a failed or cancelled build leaves nothing behind.

use crate::error::{Result, RtfmError};
use crate::fetch::InventoryClient;
use crate::inventory::{InventoryTable, parse_inventory};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Type alias for shared table build futures.
type SharedBuild = Shared<BoxFuture<'static, Result<Arc<InventoryTable>>>>;

type Tables = Arc<RwLock<HashMap<String, Arc<InventoryTable>>>>;
type InFlight = Arc<Mutex<HashMap<String, SharedBuild>>>;

/// Fetch-once cache of inventory tables keyed by site alias.
pub struct LookupCache {
    /// Completed tables
    tables: Tables,

    /// Builds in progress (can be awaited by multiple callers)
    in_flight: InFlight,

    client: InventoryClient,

    /// Cancels every build in progress
    shutdown: CancellationToken,
}

impl std::fmt::Debug for LookupCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupCache")
            .field("cached", &self.tables.try_read().map(|t| t.len()).ok())
            .field("in_flight", &self.in_flight.try_lock().map(|m| m.len()).ok())
            .field("shut_down", &self.shutdown.is_cancelled())
            .finish()
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(InventoryClient::default())
    }
}

impl LookupCache {
    pub fn new(client: InventoryClient) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            client,
            shutdown: CancellationToken::new(),
        }
    }

    /// Get the table for `alias`, building it from `base_url` if needed.
    ///
    /// This is the main entry point for lookups. It:
    /// 1. Returns a cached table without touching the network
    /// 2. Awaits a build already in progress for the alias
    /// 3. Otherwise starts a new build and awaits it
    pub async fn get_or_build(&self, alias: &str, base_url: &Url) -> Result<Arc<InventoryTable>> {
        if let Some(table) = self.get_cached(alias).await {
            tracing::debug!("Cache hit for {}", alias);
            return Ok(table);
        }

        let build = {
            let mut in_flight = self.in_flight.lock().await;

            // A build may have completed between the read above and taking the lock.
            if let Some(table) = self.tables.read().await.get(alias) {
                return Ok(Arc::clone(table));
            }

            if let Some(build) = in_flight.get(alias) {
                tracing::debug!("Awaiting in-flight build for {}", alias);
                build.clone()
            } else {
                let build = self.start_build(alias, base_url);
                in_flight.insert(alias.to_string(), build.clone());
                build
            }
        };

        build.await
    }

    /// Like [`get_or_build`](Self::get_or_build), but gives up when `cancel` fires.
    ///
    /// Giving up only stops this caller from waiting; a shared build keeps
    /// its state and is resumed by the next caller for the same alias.
    pub async fn get_or_build_until(
        &self,
        alias: &str,
        base_url: &Url,
        cancel: &CancellationToken,
    ) -> Result<Arc<InventoryTable>> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("Lookup for {} abandoned by caller", alias);
                Err(RtfmError::Cancelled)
            }
            result = self.get_or_build(alias, base_url) => result,
        }
    }

    /// Create the shared build future for an alias.
    ///
    /// The future installs its own result, so the table lands in the cache
    /// no matter which caller happens to drive it to completion.
    fn start_build(&self, alias: &str, base_url: &Url) -> SharedBuild {
        let alias = alias.to_string();
        let base_url = base_url.clone();
        let client = self.client.clone();
        let tables = Arc::clone(&self.tables);
        let in_flight = Arc::clone(&self.in_flight);
        let shutdown = self.shutdown.clone();

        tracing::info!("Building inventory table for {} from {}", alias, base_url);

        let build: BoxFuture<'static, Result<Arc<InventoryTable>>> = Box::pin(async move {
            let result = tokio::select! {
                biased;
                () = shutdown.cancelled() => Err(RtfmError::Cancelled),
                result = build_table(&client, &base_url) => result,
            };

            let mut in_flight = in_flight.lock().await;
            match &result {
                Ok(table) => {
                    tables.write().await.insert(alias.clone(), Arc::clone(table));
                    tracing::info!(
                        "Cached {} entries for {} ({} {})",
                        table.len(),
                        alias,
                        table.meta().project,
                        table.meta().version
                    );
                }
                Err(e) => tracing::warn!("Inventory build for {} failed: {}", alias, e),
            }
            in_flight.remove(&alias);

            result
        });

        build.shared()
    }

    /// Check if a table is cached for an alias.
    pub async fn is_cached(&self, alias: &str) -> bool {
        self.tables.read().await.contains_key(alias)
    }

    /// Check if a build is in progress for an alias.
    pub async fn is_building(&self, alias: &str) -> bool {
        self.in_flight.lock().await.contains_key(alias)
    }

    /// Get a cached table without triggering a build.
    pub async fn get_cached(&self, alias: &str) -> Option<Arc<InventoryTable>> {
        self.tables.read().await.get(alias).cloned()
    }

    /// Number of cached tables.
    pub async fn len(&self) -> usize {
        self.tables.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.is_empty()
    }

    /// Cancel every build in progress and refuse to start new ones.
    ///
    /// Cached tables stay available.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Token that fires when the cache shuts down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}

async fn build_table(client: &InventoryClient, base_url: &Url) -> Result<Arc<InventoryTable>> {
    let bytes = client.fetch(base_url).await?;
    let table = parse_inventory(&bytes, base_url)?;
    Ok(Arc::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[tokio::test]
    async fn starts_empty() {
        let cache = LookupCache::default();
        check!(cache.is_empty().await);
        check!(!cache.is_cached("dpy").await);
        check!(!cache.is_building("dpy").await);
        check!(cache.get_cached("dpy").await.is_none());
    }

    #[tokio::test]
    async fn shut_down_cache_installs_nothing() {
        let cache = LookupCache::default();
        cache.shutdown();

        let base = Url::parse("http://127.0.0.1:9/docs/").unwrap();
        let_assert!(Err(RtfmError::Cancelled) = cache.get_or_build("dpy", &base).await);
        check!(!cache.is_cached("dpy").await);
        check!(!cache.is_building("dpy").await);
    }

    #[tokio::test]
    async fn caller_cancellation_returns_cancelled() {
        let cache = LookupCache::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let base = Url::parse("http://127.0.0.1:9/docs/").unwrap();
        let result = cache.get_or_build_until("dpy", &base, &cancel).await;
        check!(result == Err(RtfmError::Cancelled));
        check!(!cache.is_cached("dpy").await);
    }
}
