//! Canonical display formatting for accepted summary records

use crate::pubmed::ArticleSummary;

/// Render a summary record as a canonical citation string
///
/// Shape: `Authors. Title. Journal. Year;Volume:Pages. PMID: id`, with
/// `. PMCID: id` appended when a full-text repository id is present. The year
/// is the first whitespace-separated token of the publication date display
/// string. Pure formatting; match validation has already happened upstream.
///
/// # Example
///
/// ```
/// use pubmed_matcher::matcher::format_citation;
/// use pubmed_matcher::ArticleSummary;
///
/// let summary = ArticleSummary {
///     pmid: "31978945".into(),
///     title: "A Novel Coronavirus".into(),
///     authors: vec!["Zhu N".into(), "Zhang D".into()],
///     journal: "N Engl J Med".into(),
///     pub_date: "2020 Feb".into(),
///     volume: "382".into(),
///     pages: "727-733".into(),
///     doi: None,
///     pmc_id: None,
/// };
/// assert_eq!(
///     format_citation(&summary),
///     "Zhu N, Zhang D. A Novel Coronavirus. N Engl J Med. 2020;382:727-733. PMID: 31978945"
/// );
/// ```
pub fn format_citation(summary: &ArticleSummary) -> String {
    let authors = summary.authors.join(", ");
    let year = summary.pub_date.split_whitespace().next().unwrap_or("");

    let mut citation = format!(
        "{}. {}. {}. {};{}:{}. PMID: {}",
        authors, summary.title, summary.journal, year, summary.volume, summary.pages, summary.pmid
    );

    if let Some(pmc_id) = summary.pmc_id.as_deref().filter(|id| !id.is_empty()) {
        citation.push_str(&format!(". PMCID: {}", pmc_id));
    }

    citation
}
