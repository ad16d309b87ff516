//! Lexical-overlap validation of candidate matches
//!
//! The looser cascade strategies (author+year, title alone) can return a
//! plausible but wrong record; requiring title word overlap against the source
//! text trades recall for precision.

use std::collections::HashSet;

use crate::matcher::extract::tokenize_title;

/// Decide whether a candidate title is an acceptable match for the profile's
/// title words
///
/// The candidate title is tokenized into lowercase words and intersected with
/// the profile's title words; the required overlap is `min(3, profile word
/// count)`. A profile with no extracted title words accepts any candidate;
/// DOI-path references typically lack a title and the DOI lookup is already
/// exact.
pub fn title_overlap_accepts(profile_words: &[String], candidate_title: &str) -> bool {
    let required = profile_words.len().min(3);
    if required == 0 {
        return true;
    }

    let profile_set: HashSet<&str> = profile_words.iter().map(String::as_str).collect();
    let candidate_words = tokenize_title(candidate_title);
    let overlap = candidate_words
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .intersection(&profile_set)
        .count();

    overlap >= required
}
