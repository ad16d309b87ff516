//! Splits pasted reference-list text into discrete reference records

use once_cell::sync::Lazy;
use regex::Regex;

/// One bibliographic entry from a pasted list
///
/// The `number` preserves the original ordinal label verbatim; labels need not
/// be contiguous or start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    /// Original ordinal label (e.g. "12")
    pub number: String,
    /// Free-form reference text with line breaks collapsed
    pub text: String,
}

/// Heading lines dropped from the top of the pasted text
const HEADING_LABELS: [&str; 4] = ["references", "citations", "literature cited", "bibliography"];

/// A leading integer ordinal acting as a reference delimiter ("12. " or "12 ")
static ORDINAL_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\d+)\.?\s+").unwrap());

/// Hyphen at a line break: an in-word break, the newline is removed
static HYPHEN_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\n").unwrap());

/// Line boundary between two lowercase letters: a soft wrap, not a reference
/// boundary
static SOFT_WRAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])\n([a-z])").unwrap());

static EMBEDDED_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// Segment raw pasted text into an ordered sequence of references
///
/// A leading heading line ("References", "Bibliography", ...) is dropped,
/// hyphen-broken and soft-wrapped lines are rejoined, then the text is split
/// at leading integer ordinals. When no ordinal structure exists, every
/// non-blank line becomes one reference numbered sequentially from 1.
/// Blank input yields an empty sequence.
///
/// # Example
///
/// ```
/// use pubmed_matcher::matcher::segment_references;
///
/// let refs = segment_references("1. Smith J. A study. Nature. 2020.\n2. Doe A. Another. Science. 2019.");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].number, "1");
/// ```
pub fn segment_references(text: &str) -> Vec<RawReference> {
    let text = strip_heading(text.trim());
    let text = HYPHEN_BREAK.replace_all(&text, "-");
    let text = SOFT_WRAP.replace_all(&text, "$1 $2");
    let text: &str = &text;

    let starts: Vec<_> = ORDINAL_DELIMITER.captures_iter(text).collect();
    if starts.is_empty() {
        return fallback_by_line(text);
    }

    let mut refs = Vec::with_capacity(starts.len());
    for (i, caps) in starts.iter().enumerate() {
        let whole = caps.get(0).unwrap();
        let end = starts
            .get(i + 1)
            .map(|next| next.get(0).unwrap().start())
            .unwrap_or(text.len());
        let body = &text[whole.end()..end];
        let body = EMBEDDED_NEWLINES.replace_all(body, " ");
        refs.push(RawReference {
            number: caps[1].to_string(),
            text: body.trim().to_string(),
        });
    }
    refs
}

fn strip_heading(text: &str) -> String {
    let mut lines = text.lines();
    if let Some(first) = lines.next() {
        if HEADING_LABELS.contains(&first.trim().to_lowercase().as_str()) {
            return lines.collect::<Vec<_>>().join("\n");
        }
    }
    text.to_string()
}

fn fallback_by_line(text: &str) -> Vec<RawReference> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| RawReference {
            number: (i + 1).to_string(),
            text: line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_numbered_list_round_trip() {
        let text = "1. Smith J. A study of X. Nature. 2020;1:1-2.\n2. Doe A. Another study. Science. 2019;2:3-4.";
        let refs = segment_references(text);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].number, "1");
        assert_eq!(refs[0].text, "Smith J. A study of X. Nature. 2020;1:1-2.");
        assert_eq!(refs[1].number, "2");
        assert_eq!(refs[1].text, "Doe A. Another study. Science. 2019;2:3-4.");
    }

    #[test]
    fn test_fallback_numbers_lines_sequentially() {
        let refs = segment_references("Smith J. 2020\nDoe A. 2019");

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].number, "1");
        assert_eq!(refs[0].text, "Smith J. 2020");
        assert_eq!(refs[1].number, "2");
        assert_eq!(refs[1].text, "Doe A. 2019");
    }

    #[rstest]
    #[case("References")]
    #[case("REFERENCES")]
    #[case("Bibliography")]
    #[case("Literature Cited")]
    #[case("Citations")]
    fn test_heading_line_dropped(#[case] heading: &str) {
        let text = format!("{}\n1. Smith J. A study. Nature. 2020.", heading);
        let refs = segment_references(&text);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].text, "Smith J. A study. Nature. 2020.");
    }

    #[test]
    fn test_non_contiguous_labels_preserved() {
        let refs = segment_references("3. First entry here.\n7. Second entry here.");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].number, "3");
        assert_eq!(refs[1].number, "7");
    }

    #[test]
    fn test_hyphen_break_joined() {
        let refs = segment_references("1. Smith J. Micro-\nbiology of the gut. Nature. 2020.");
        assert_eq!(refs.len(), 1);
        assert!(refs[0].text.contains("Micro-biology"));
    }

    #[test]
    fn test_soft_wrap_joined_into_one_reference() {
        let refs = segment_references("1. Smith J. A study of gut\nmicrobes. Nature. 2020.");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].text, "Smith J. A study of gut microbes. Nature. 2020.");
    }

    #[test]
    fn test_multiline_body_collapsed() {
        let refs = segment_references("1. Smith J. A Study.\nNature. 2020.\n2. Doe A. Other. Science. 2019.");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].text, "Smith J. A Study. Nature. 2020.");
    }

    #[rstest]
    #[case("")]
    #[case("   \n\n  ")]
    fn test_blank_input_yields_nothing(#[case] input: &str) {
        assert!(segment_references(input).is_empty());
    }

    #[test]
    fn test_ordinal_without_period() {
        let refs = segment_references("1 Smith J. A study. Nature. 2020.");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].number, "1");
    }
}
