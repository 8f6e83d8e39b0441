//! Resolving `(site, query)` lookups into documentation links.

use crate::cache::LookupCache;
use crate::config::Config;
use crate::error::{Result, RtfmError};
use crate::inventory::{Entry, InventoryTable};
use crate::registry::SiteRegistry;
use crate::search::{DEFAULT_LIMIT, fuzzy_search};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// What a lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// No search term was given; the site's documentation root.
    BaseUrl(Url),
    /// Best matches, best first.
    Matches(Vec<Entry>),
    /// The alias is not registered.
    NotAvailable {
        site: String,
        suggestions: Vec<String>,
    },
    /// The search term matched nothing.
    NothingFound,
}

/// Coordinates alias resolution, table caching, and fuzzy matching.
#[derive(Debug)]
pub struct DocsResolver {
    registry: SiteRegistry,
    cache: LookupCache,
    limit: usize,
}

impl DocsResolver {
    pub fn new(registry: SiteRegistry, cache: LookupCache) -> Self {
        Self {
            registry,
            cache,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the maximum number of matches per lookup, clamped to `1..=8`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, DEFAULT_LIMIT);
        self
    }

    /// Build a resolver from loaded configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = LookupCache::new(config.client()?);
        Ok(Self::new(config.registry()?, cache).with_limit(config.result_limit))
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Look up `query` in the documentation of `site`.
    ///
    /// Unknown sites, missing queries, and empty results are outcomes, not
    /// errors. Errors are fetch, decode, and format failures of the inventory.
    pub async fn lookup(&self, site: &str, query: Option<&str>) -> Result<LookupOutcome> {
        self.lookup_until(site, query, &CancellationToken::new()).await
    }

    /// Like [`lookup`](Self::lookup), but stops waiting when `cancel` fires.
    pub async fn lookup_until(
        &self,
        site: &str,
        query: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<LookupOutcome> {
        let base_url = match self.registry.resolve(site) {
            Ok(url) => url,
            Err(RtfmError::UnknownSite(site)) => {
                let suggestions = self
                    .registry
                    .suggestions(&site)
                    .into_iter()
                    .map(|s| s.name)
                    .collect();
                tracing::debug!("Lookup for unknown site {}", site);
                return Ok(LookupOutcome::NotAvailable { site, suggestions });
            }
            Err(e) => return Err(e),
        };

        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return Ok(LookupOutcome::BaseUrl(base_url.clone()));
        };

        let table = self.cache.get_or_build_until(site, base_url, cancel).await?;
        Ok(self.rank(&table, query))
    }

    fn rank(&self, table: &Arc<InventoryTable>, query: &str) -> LookupOutcome {
        let matches: Vec<Entry> = fuzzy_search(query, table.iter(), self.limit)
            .into_iter()
            .map(|m| m.entry.clone())
            .collect();

        tracing::debug!("{} matches for '{}'", matches.len(), query);

        if matches.is_empty() {
            LookupOutcome::NothingFound
        } else {
            LookupOutcome::Matches(matches)
        }
    }
}
