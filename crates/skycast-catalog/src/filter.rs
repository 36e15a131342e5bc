//! Fuzzy incremental narrowing of candidate lists.
//!
//! Ranks candidates by Jaro-Winkler similarity against the typed text and
//! keeps the best matches above a cutoff. Used for both city and country
//! narrowing as the user types.

use std::cmp::Ordering;

/// Default maximum number of results returned.
pub const MAX_RESULTS: usize = 10;

/// Default minimum similarity for a candidate to be kept.
pub const SIMILARITY_CUTOFF: f64 = 0.3;

/// Narrow `candidates` against `typed` with the default limits.
pub fn filter(candidates: &[String], typed: &str) -> Vec<String> {
    filter_with(candidates, typed, MAX_RESULTS, SIMILARITY_CUTOFF)
}

/// Narrow `candidates` against `typed`.
///
/// Returns up to `max_results` candidates scoring at or above `cutoff`,
/// highest similarity first; ties keep candidate order. An empty `typed`
/// string matches nothing and returns an empty vec.
pub fn filter_with(
    candidates: &[String],
    typed: &str,
    max_results: usize,
    cutoff: f64,
) -> Vec<String> {
    if typed.is_empty() {
        return Vec::new();
    }

    let typed = typed.to_lowercase();
    let mut scored: Vec<(&String, f64)> = candidates
        .iter()
        .map(|c| (c, strsim::jaro_winkler(&c.to_lowercase(), &typed)))
        .filter(|(_, score)| *score >= cutoff)
        .collect();

    // Stable sort keeps candidate order for equal scores.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .take(max_results)
        .map(|(c, _)| c.clone())
        .collect()
}
