//! Similarity scoring for "did you mean" suggestions.

use rapidfuzz::distance::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a candidate to be suggested.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions offered.
pub const MAX_SUGGESTIONS: usize = 3;

/// A candidate name with its similarity to the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub score: f64,
}

/// Rank `candidates` by Jaro-Winkler similarity to `input`, case-insensitively.
///
/// Only candidates above [`SUGGESTION_THRESHOLD`] are returned, best first.
pub fn suggest_similar<'a, I>(input: &str, candidates: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.to_lowercase();
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .map(|name| Suggestion {
            name: name.to_string(),
            score: jaro_winkler::similarity(input.chars(), name.to_lowercase().chars()),
        })
        .filter(|s| s.score > SUGGESTION_THRESHOLD)
        .collect();

    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn suggests_close_aliases() {
        let suggestions = suggest_similar("lightblb", ["dpy", "lightbulb", "asyncio"]);
        check!(suggestions.len() == 1);
        check!(suggestions[0].name == "lightbulb");
    }

    #[test]
    fn ignores_case() {
        let suggestions = suggest_similar("ASYNCIO", ["asyncio"]);
        check!(suggestions.len() == 1);
        check!(suggestions[0].score == 1.0);
    }

    #[test]
    fn unrelated_input_has_no_suggestions() {
        check!(suggest_similar("zzzz", ["dpy", "lightbulb"]).is_empty());
    }

    #[test]
    fn caps_the_number_of_suggestions() {
        let suggestions = suggest_similar("site", ["site1", "site2", "site3", "site4"]);
        check!(suggestions.len() == MAX_SUGGESTIONS);
    }
}
