//! Data types returned by the PubMed client

/// Lightweight article metadata from the ESummary API
///
/// Carries the bibliographic overview fields used for match validation and
/// citation formatting; abstracts and MeSH terms are never fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    /// PubMed ID (the primary identifier)
    pub pmid: String,
    /// Article title
    pub title: String,
    /// Author display names in citation order (e.g. "Zhu N")
    pub authors: Vec<String>,
    /// Journal source abbreviation (e.g. "N Engl J Med")
    pub journal: String,
    /// Publication date display string (e.g. "2020 Feb")
    pub pub_date: String,
    /// Volume, empty when absent
    pub volume: String,
    /// Page range, empty when absent
    pub pages: String,
    /// DOI, when listed in the article ids
    pub doi: Option<String>,
    /// PMC full-text repository id (the alternate identifier), when present
    pub pmc_id: Option<String>,
}
