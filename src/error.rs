//! Error handling types and utilities.

/// A specialized Result type for inventory resolution.
pub type Result<T, E = RtfmError> = std::result::Result<T, E>;

/// Failures that can occur while resolving a documentation lookup.
///
/// The type is `Clone` so a single failed build can be handed to every caller
/// awaiting the same shared future.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RtfmError {
    /// The inventory header is malformed (wrong version tag, missing zlib marker).
    #[error("Invalid objects.inv file: {0}")]
    Format(String),
    /// The compressed inventory body is corrupt, truncated, or not UTF-8.
    #[error("Could not decode objects.inv payload: {0}")]
    Decode(String),
    /// The inventory could not be downloaded.
    #[error("Cannot build rtfm lookup table, try again later. ({0})")]
    Fetch(String),
    /// The requested alias is not in the site registry.
    #[error("RTFM not available for {0}.")]
    UnknownSite(String),
    /// A base URL or location could not be turned into an absolute URL.
    #[error("Invalid documentation URL: {0}")]
    InvalidUrl(String),
    /// The lookup was abandoned before the inventory was built.
    #[error("Lookup cancelled")]
    Cancelled,
}

impl RtfmError {
    pub(crate) fn unsupported_version() -> Self {
        Self::Format("unsupported inventory version".to_string())
    }

    pub(crate) fn not_zlib() -> Self {
        Self::Format("not zlib-compatible".to_string())
    }

    /// Whether retrying the same lookup later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Cancelled)
    }
}

impl From<reqwest::Error> for RtfmError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl From<url::ParseError> for RtfmError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
