//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Every test gets its own [`MockSite`]: a local HTTP server serving a
//! generated `objects.inv` under `/docs/`, plus a fresh [`DocsResolver`] with
//! an empty cache pointing at it. Fetch counts are asserted by wiremock when
//! the server is dropped.

use flate2::{Compression, write::ZlibEncoder};
use rstest::fixture;
use sphinx_rtfm::{DocsResolver, LookupCache, SiteRegistry};
use std::io::Write;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Alias registered for the mock site.
pub const ALIAS: &str = "dpy";

/// Path the inventory is served from.
pub const INVENTORY_PATH: &str = "/docs/objects.inv";

/// A small discord.py-like inventory body.
pub const SAMPLE_BODY: &[&str] = &[
    "discord py:module 0 index.html#module-$ -",
    "discord py:module 0 duplicate.html#module-$ -",
    "discord.Client py:class 1 client.html#discord.Client -",
    "discord.Client.run py:method 1 client.html#$ -",
    "discord.Embed py:class 1 api.html#$ -",
    "flask.request.get_data py:method 1 api.html#$ -",
    "quickstart std:doc -1 quickstart.html Quickstart",
    "intents std:label -1 intents.html#$ A Primer to Gateway Intents",
];

/// Build a complete `objects.inv` payload from body lines.
pub fn inventory_bytes(project: &str, body: &[&str]) -> Vec<u8> {
    let mut buffer = format!(
        "# Sphinx inventory version 2\n\
         # Project: {project}\n\
         # Version: 2.4\n\
         # The remainder of this file is compressed using zlib.\n"
    )
    .into_bytes();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for line in body {
        writeln!(encoder, "{line}").expect("Failed to compress inventory line");
    }
    buffer.extend_from_slice(&encoder.finish().expect("Failed to finish zlib stream"));
    buffer
}

/// A mock documentation site and a resolver wired to it.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct MockSite {
    pub server: MockServer,
    pub base_url: Url,
    pub resolver: DocsResolver,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl MockSite {
    /// Start a server with no mocks mounted.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base = format!("{}/docs", server.uri());
        let registry =
            SiteRegistry::from_pairs([(ALIAS, base.as_str())]).expect("Failed to build registry");
        let base_url = registry.resolve(ALIAS).expect("Alias missing").clone();
        let resolver = DocsResolver::new(registry, LookupCache::default());
        Self {
            server,
            base_url,
            resolver,
        }
    }

    /// Serve `payload` for the inventory, expecting exactly `fetches` requests.
    pub async fn serve(&self, payload: Vec<u8>, fetches: u64) {
        self.serve_with_delay(payload, fetches, Duration::ZERO).await;
    }

    /// Like [`serve`](Self::serve), delaying every response.
    pub async fn serve_with_delay(&self, payload: Vec<u8>, fetches: impl Into<Times>, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(INVENTORY_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(payload)
                    .set_delay(delay),
            )
            .expect(fetches)
            .mount(&self.server)
            .await;
    }

    /// Answer the next `times` inventory requests with `status`.
    pub async fn fail_with(&self, status: u16, times: u64) {
        Mock::given(method("GET"))
            .and(path(INVENTORY_PATH))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(times)
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub fn cache(&self) -> &LookupCache {
        self.resolver.cache()
    }
}

/// Payload built from [`SAMPLE_BODY`].
#[fixture]
pub fn sample_inventory() -> Vec<u8> {
    inventory_bytes("discord.py", SAMPLE_BODY)
}
