//! Matched/unmatched partition of a reference list and its export formats

/// An accepted candidate record for one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    /// PubMed ID (primary identifier)
    pub pmid: String,
    /// PMC full-text repository id, when present
    pub pmc_id: Option<String>,
    /// Candidate record title
    pub title: String,
    /// Author display names joined with ", "
    pub authors: String,
    /// Journal source display
    pub journal: String,
    /// Publication date display
    pub pub_date: String,
    /// Canonical formatted citation
    pub formatted: String,
    /// Which search strategy produced this match ("DOI" or the query string)
    pub strategy: String,
}

/// A reference that was matched to a candidate record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedReference {
    /// Original ordinal label
    pub number: String,
    /// Original reference text
    pub original: String,
    /// The accepted candidate
    pub candidate: CandidateMatch,
}

/// A reference for which no acceptable candidate was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedReference {
    /// Original ordinal label
    pub number: String,
    /// Original reference text
    pub original: String,
}

/// Outcome of one matching run
///
/// Every input reference appears in exactly one of the two collections, each
/// ordered by the reference's position in the segmented input.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    /// References matched to a candidate, in input order
    pub matched: Vec<MatchedReference>,
    /// References with no match, in input order
    pub unmatched: Vec<UnmatchedReference>,
}

impl MatchReport {
    /// Total number of references processed
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    /// PMIDs of matched references, in input order
    pub fn pmids(&self) -> Vec<String> {
        self.matched
            .iter()
            .map(|m| m.candidate.pmid.clone())
            .collect()
    }

    /// Newline-separated PMID list export
    pub fn pmid_list(&self) -> String {
        self.pmids().join("\n")
    }

    /// `"number: pmid"` mapping export, one line per matched reference
    pub fn number_mapping(&self) -> String {
        self.matched
            .iter()
            .map(|m| format!("{}: {}", m.number, m.candidate.pmid))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formatted citations export, `"number. citation"` blocks separated by
    /// blank lines
    pub fn formatted_citations(&self) -> String {
        self.matched
            .iter()
            .map(|m| format!("{}. {}", m.number, m.candidate.formatted))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(number: &str, pmid: &str, formatted: &str) -> MatchedReference {
        MatchedReference {
            number: number.to_string(),
            original: format!("reference {}", number),
            candidate: CandidateMatch {
                pmid: pmid.to_string(),
                pmc_id: None,
                title: "t".to_string(),
                authors: "a".to_string(),
                journal: "j".to_string(),
                pub_date: "2020".to_string(),
                formatted: formatted.to_string(),
                strategy: "DOI".to_string(),
            },
        }
    }

    fn report() -> MatchReport {
        MatchReport {
            matched: vec![
                matched("1", "111", "First citation"),
                matched("3", "333", "Third citation"),
            ],
            unmatched: vec![UnmatchedReference {
                number: "2".to_string(),
                original: "reference 2".to_string(),
            }],
        }
    }

    #[test]
    fn test_total_counts_both_partitions() {
        assert_eq!(report().total(), 3);
    }

    #[test]
    fn test_pmid_list_export() {
        assert_eq!(report().pmid_list(), "111\n333");
    }

    #[test]
    fn test_number_mapping_export() {
        assert_eq!(report().number_mapping(), "1: 111\n3: 333");
    }

    #[test]
    fn test_formatted_citations_export() {
        assert_eq!(
            report().formatted_citations(),
            "1. First citation\n\n3. Third citation"
        );
    }

    #[test]
    fn test_empty_report_exports_empty_strings() {
        let report = MatchReport::default();
        assert_eq!(report.total(), 0);
        assert!(report.pmid_list().is_empty());
        assert!(report.number_mapping().is_empty());
        assert!(report.formatted_citations().is_empty());
    }
}
