//! Subsequence fuzzy matching over inventory keys.
//!
//! A key matches a query when every query character appears in the key in the
//! same order, ignoring case. Among matches, tighter windows rank first, then
//! windows that start closer to the beginning of the key. Ties keep the order
//! of the input.

use crate::inventory::Entry;
use std::cmp::Ordering;

/// Number of results returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: usize = 8;

/// Quality of a single fuzzy match. Smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FuzzyScore {
    /// Width of the smallest key window containing the query as a subsequence.
    pub span: usize,
    /// Character offset where that window starts.
    pub start: usize,
}

impl Ord for FuzzyScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.span
            .cmp(&other.span)
            .then_with(|| self.start.cmp(&other.start))
    }
}

impl PartialOrd for FuzzyScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A ranked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch<'a> {
    pub entry: &'a Entry,
    pub score: FuzzyScore,
}

impl SearchMatch<'_> {
    pub fn key(&self) -> &str {
        &self.entry.key
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Score `candidate` against `query`, or `None` if it does not match.
///
/// An empty query never matches.
pub fn fuzzy_score(query: &str, candidate: &str) -> Option<FuzzyScore> {
    let needle: Vec<char> = query.chars().map(fold).collect();
    let (&first, rest) = needle.split_first()?;
    let haystack: Vec<char> = candidate.chars().map(fold).collect();

    let mut best: Option<FuzzyScore> = None;
    for start in (0..haystack.len()).filter(|&i| haystack[i] == first) {
        // Greedy forward scan gives the shortest window for this start.
        let mut pos = start;
        let mut matched = true;
        for &c in rest {
            match haystack[pos + 1..].iter().position(|&h| h == c) {
                Some(offset) => pos += offset + 1,
                None => {
                    matched = false;
                    break;
                }
            }
        }

        if !matched {
            // Later starts see a subset of the remaining characters.
            break;
        }

        let score = FuzzyScore {
            span: pos - start + 1,
            start,
        };
        if best.is_none_or(|b| score < b) {
            best = Some(score);
        }
        if score.span == needle.len() {
            break;
        }
    }

    best
}

/// Rank `entries` against `query`, returning at most `limit` matches.
pub fn fuzzy_search<'a, I>(query: &str, entries: I, limit: usize) -> Vec<SearchMatch<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut matches: Vec<SearchMatch<'a>> = entries
        .into_iter()
        .filter_map(|entry| {
            fuzzy_score(query, &entry.key).map(|score| SearchMatch { entry, score })
        })
        .collect();

    // Stable sort keeps table order for equal scores.
    matches.sort_by(|a, b| a.score.cmp(&b.score));
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;
    use url::Url;

    fn entries(keys: &[&str]) -> Vec<Entry> {
        keys.iter()
            .map(|key| Entry {
                key: (*key).to_string(),
                url: Url::parse(&format!("https://example.org/{}", key)).unwrap(),
            })
            .collect()
    }

    #[rstest]
    #[case("gdt", "get_data", Some((7, 0)))]
    #[case("data", "get_data", Some((4, 4)))]
    #[case("GET", "get_data", Some((3, 0)))]
    #[case("client", "discord.Client", Some((6, 8)))]
    #[case("tdg", "get_data", None)]
    #[case("x", "get_data", None)]
    #[case("", "get_data", None)]
    fn scores_subsequences(
        #[case] query: &str,
        #[case] candidate: &str,
        #[case] expected: Option<(usize, usize)>,
    ) {
        let expected = expected.map(|(span, start)| FuzzyScore { span, start });
        check!(fuzzy_score(query, candidate) == expected);
    }

    #[test]
    fn prefers_tightest_window() {
        // "ab" appears loosely at 0 and contiguously at 4.
        let_assert!(Some(score) = fuzzy_score("ab", "axxxab"));
        check!(score == FuzzyScore { span: 2, start: 4 });
    }

    #[test]
    fn ranks_contiguous_before_scattered() {
        let table = entries(&["g_e_t", "get", "forget"]);
        let results = fuzzy_search("get", &table, DEFAULT_LIMIT);
        let keys: Vec<_> = results.iter().map(SearchMatch::key).collect();
        check!(keys == vec!["get", "forget", "g_e_t"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let table = entries(&["b.Client", "a.Client", "c.Client"]);
        let results = fuzzy_search("Client", &table, DEFAULT_LIMIT);
        let keys: Vec<_> = results.iter().map(SearchMatch::key).collect();
        check!(keys == vec!["b.Client", "a.Client", "c.Client"]);
    }

    #[test]
    fn respects_limit() {
        let keys: Vec<String> = (0..20).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let table = entries(&refs);

        check!(fuzzy_search("item", &table, DEFAULT_LIMIT).len() == DEFAULT_LIMIT);
        check!(fuzzy_search("item", &table, 3).len() == 3);
    }

    #[test]
    fn no_matches_is_empty() {
        let table = entries(&["alpha", "beta"]);
        check!(fuzzy_search("zzz", &table, DEFAULT_LIMIT).is_empty());
    }
}
