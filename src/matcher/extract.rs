//! Heuristic feature extraction from one free-text reference
//!
//! Each derivation is an independent best-effort rule over the raw text; a
//! rule that finds nothing leaves its field absent rather than failing the
//! extraction. The heuristics target numbered biomedical reference lists and
//! are approximate by design.

use once_cell::sync::Lazy;
use regex::Regex;

/// Structured query features derived from one reference's raw text
///
/// Recomputed deterministically from the text; all fields are optional and an
/// absent field means "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryProfile {
    /// First DOI-shaped substring, verbatim
    pub doi: Option<String>,
    /// Raw title span, used verbatim in search queries
    pub title: Option<String>,
    /// Lowercase title word tokens (hyphens split tokens), used for validation
    pub title_words: Vec<String>,
    /// First 4-digit run anywhere in the text
    pub year: Option<String>,
    /// Leading alphabetic-or-hyphen token, lowercased
    pub first_author: Option<String>,
    /// Capitalized run before a year or volume/page punctuation, lowercased
    pub journal: Option<String>,
}

static DOI: Lazy<Regex> = Lazy::new(|| Regex::new(r"10\.\d{4,9}/\S+").unwrap());

/// Title: first span bounded by a ". " or ": " delimiter and a sentence-ending
/// period, a capitalized word boundary, or end of text
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\.\s+|:\s+)([^.]+?)(?:\.|\s+[A-Z]|$)").unwrap());

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

static FIRST_AUTHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\-]+").unwrap());

/// Journal: capitalized word run immediately followed by a year or by
/// volume/issue/page punctuation
static JOURNAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][A-Za-z\s]+)(?:\s+\d{4}|\s+[0-9;():]+)").unwrap());

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Derive a [`QueryProfile`] from one reference's raw text
///
/// Pure function: the same text always yields an identical profile.
///
/// # Example
///
/// ```
/// use pubmed_matcher::matcher::extract_profile;
///
/// let profile = extract_profile("Smith J. Deep learning for proteins. Nature. 2020;580:100-5.");
/// assert_eq!(profile.first_author.as_deref(), Some("smith"));
/// assert_eq!(profile.year.as_deref(), Some("2020"));
/// ```
pub fn extract_profile(text: &str) -> QueryProfile {
    let title = extract_title(text);
    let title_words = title.as_deref().map(tokenize_title).unwrap_or_default();

    QueryProfile {
        doi: extract_doi(text),
        title,
        title_words,
        year: extract_year(text),
        first_author: extract_first_author(text),
        journal: extract_journal(text),
    }
}

/// First DOI-shaped substring ("10." + 4-9 digits + "/" + non-whitespace run)
pub fn extract_doi(text: &str) -> Option<String> {
    DOI.find(text).map(|m| m.as_str().to_string())
}

/// Title span between an author-list delimiter and the next sentence boundary
pub fn extract_title(text: &str) -> Option<String> {
    TITLE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// First 4-consecutive-digit run anywhere in the text
pub fn extract_year(text: &str) -> Option<String> {
    YEAR.find(text).map(|m| m.as_str().to_string())
}

/// Leading alphabetic-or-hyphen token, lowercased
pub fn extract_first_author(text: &str) -> Option<String> {
    FIRST_AUTHOR.find(text).map(|m| m.as_str().to_lowercase())
}

/// Capitalized-word run before a year or volume/page punctuation, lowercased
pub fn extract_journal(text: &str) -> Option<String> {
    JOURNAL
        .captures(text)
        .map(|caps| caps[1].trim().to_lowercase())
        .filter(|j| !j.is_empty())
}

/// Lowercase word tokens with hyphens treated as separators
pub fn tokenize_title(title: &str) -> Vec<String> {
    let normalized = title.to_lowercase().replace('-', " ");
    WORD.find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str =
        "Smith J, Doe A. Deep learning predicts protein structure. Nature. 2020;580(7805):100-5. doi: 10.1038/s41586-020-1234-5";

    #[test]
    fn test_doi_extraction() {
        let profile = extract_profile(SAMPLE);
        assert_eq!(profile.doi.as_deref(), Some("10.1038/s41586-020-1234-5"));
    }

    #[test]
    fn test_doi_absent() {
        assert_eq!(extract_doi("Smith J. A study. Nature. 2020."), None);
    }

    #[test]
    fn test_title_span() {
        assert_eq!(
            extract_title(SAMPLE).as_deref(),
            Some("Deep learning predicts protein structure")
        );
    }

    #[test]
    fn test_title_after_colon() {
        let text = "Smith J: Gut microbes and immunity. Science. 2019.";
        assert_eq!(extract_title(text).as_deref(), Some("Gut microbes and immunity"));
    }

    #[test]
    fn test_title_stops_at_internal_capitalized_word() {
        // The capitalized-word terminator cuts the span short when the title
        // itself contains a capitalized word.
        let text = "Smith J. A study of X. Nature. 2020.";
        assert_eq!(extract_title(text).as_deref(), Some("A study of"));
    }

    #[test]
    fn test_title_words_split_hyphens() {
        assert_eq!(
            tokenize_title("Single-cell RNA sequencing"),
            vec!["single", "cell", "rna", "sequencing"]
        );
    }

    #[test]
    fn test_year_first_four_digit_run() {
        assert_eq!(extract_year("Nature. 2020;580:100-5.").as_deref(), Some("2020"));
        assert_eq!(extract_year("no year here"), None);
    }

    #[rstest]
    #[case("Smith J, Doe A. A study.", "smith")]
    #[case("van-Dijk K. A study.", "van-dijk")]
    #[case("OBrien P. A study.", "obrien")]
    fn test_first_author(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(extract_first_author(text).as_deref(), Some(expected));
    }

    #[test]
    fn test_first_author_absent_on_leading_digit() {
        assert_eq!(extract_first_author("2020 report on X."), None);
    }

    #[test]
    fn test_journal_before_volume_punctuation() {
        let text = "Smith J. A study. Lancet 395(10223):497-506.";
        assert_eq!(extract_journal(text).as_deref(), Some("lancet"));
    }

    #[test]
    fn test_journal_blocked_by_trailing_period() {
        // "Nature." ends in a period, which sits between the name and the
        // year, so the capitalized-run heuristic finds nothing.
        let profile = extract_profile(SAMPLE);
        assert_eq!(profile.journal, None);
    }

    #[test]
    fn test_journal_before_year() {
        let text = "Doe A. Some findings. N Engl J Med 2019;380:1-10.";
        assert_eq!(extract_journal(text).as_deref(), Some("n engl j med"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_profile(SAMPLE);
        let second = extract_profile(SAMPLE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_fields_optional() {
        let profile = extract_profile("???");
        assert!(profile.doi.is_none());
        assert!(profile.title.is_none());
        assert!(profile.title_words.is_empty());
        assert!(profile.year.is_none());
        assert!(profile.first_author.is_none());
        assert!(profile.journal.is_none());
    }
}
