//! Ranking of inventory entries and site aliases.
//!
//! [`fuzzy`] does subsequence matching of queries against inventory keys;
//! [`scoring`] produces "did you mean" suggestions for unknown aliases.

pub(crate) mod fuzzy;
pub(crate) mod scoring;

pub use fuzzy::{DEFAULT_LIMIT, FuzzyScore, SearchMatch, fuzzy_score, fuzzy_search};
pub use scoring::{MAX_SUGGESTIONS, SUGGESTION_THRESHOLD, Suggestion, suggest_similar};
