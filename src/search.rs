//! Fuzzy search scoring for the overview grid.
//!
//! A tool matches a search term when the term is a case-insensitive
//! subsequence of its name or description. The score rewards matches that
//! happen early in the *term*: the first term character is worth `1.0`, the
//! second `0.9`, and so on. Longer matched terms score higher, with
//! decaying increments. The score is deliberately not length-normalized.
//!
//! `NO_MATCH` (negative infinity) marks "term is not a subsequence"; an
//! empty term scores `0` against everything, meaning "no filter".

/// Sentinel for "text does not contain the term as a subsequence".
pub const NO_MATCH: f64 = f64::NEG_INFINITY;

/// Score `term` against `text`.
///
/// Walks `text` once, advancing through `term` on every character match and
/// adding `1 - 0.1 * term_index` per advance. Stops as soon as the whole
/// term has been matched; if `text` runs out first, returns [`NO_MATCH`].
pub fn fuzzy_score(text: &str, term: &str) -> f64 {
    if term.is_empty() {
        return 0.0;
    }
    let term: Vec<char> = term.to_lowercase().chars().collect();

    let mut score = 0.0;
    let mut term_index = 0;

    for ch in text.to_lowercase().chars() {
        if ch == term[term_index] {
            score += 1.0 - 0.1 * term_index as f64;
            term_index += 1;
            if term_index == term.len() {
                return score;
            }
        }
    }
    NO_MATCH
}

/// A tool's rank for a term: the better of its name and description scores.
pub fn match_score(name: &str, description: &str, term: &str) -> f64 {
    fuzzy_score(name, term).max(fuzzy_score(description, term))
}
