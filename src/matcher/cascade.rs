//! Ordered fallback search strategies for one query profile
//!
//! The DOI lookup runs first when a DOI was extracted; heuristic strategies
//! follow from most to least specific. Execution stops at the first strategy
//! whose identifier list is non-empty, so looser strategies never fire once a
//! tighter one has matched.

use tracing::debug;

use crate::matcher::extract::QueryProfile;
use crate::provider::CitationProvider;
use crate::rate_limit::RateLimiter;

/// Cap on identifiers requested per heuristic search
const HEURISTIC_RETMAX: usize = 3;

/// Display length cap for strategy labels built from query strings
const LABEL_MAX_CHARS: usize = 50;

/// One search attempt in the cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAttempt {
    /// The query string sent to the search capability
    pub query: String,
    /// Maximum identifiers requested
    pub retmax: usize,
    /// Whether this is the exact DOI lookup
    pub is_doi: bool,
}

impl SearchAttempt {
    /// Label retained for observability: "DOI" for the DOI path, else the
    /// query string truncated for display
    pub fn label(&self) -> String {
        if self.is_doi {
            return "DOI".to_string();
        }
        if self.query.chars().count() > LABEL_MAX_CHARS {
            let truncated: String = self.query.chars().take(LABEL_MAX_CHARS).collect();
            format!("{}...", truncated)
        } else {
            self.query.clone()
        }
    }
}

/// Build the ordered search attempts for a profile
///
/// Order: exact DOI, then title+author+year+journal, title+journal,
/// author+journal+year, title alone, author+year. A strategy is only emitted
/// when every feature it needs was extracted.
pub fn build_attempts(profile: &QueryProfile) -> Vec<SearchAttempt> {
    let mut attempts = Vec::new();

    if let Some(doi) = &profile.doi {
        attempts.push(SearchAttempt {
            query: doi.clone(),
            retmax: 1,
            is_doi: true,
        });
    }

    let title = profile.title.as_deref();
    let author = profile.first_author.as_deref();
    let year = profile.year.as_deref();
    let journal = profile.journal.as_deref();

    let mut heuristic = |query: String| {
        attempts.push(SearchAttempt {
            query,
            retmax: HEURISTIC_RETMAX,
            is_doi: false,
        });
    };

    if let (Some(t), Some(a), Some(y), Some(j)) = (title, author, year, journal) {
        heuristic(format!(
            "{} AND {}[Author] AND {}[Year] AND {}[Journal]",
            t, a, y, j
        ));
    }
    if let (Some(t), Some(j)) = (title, journal) {
        heuristic(format!("{} AND {}[Journal]", t, j));
    }
    if let (Some(a), Some(j), Some(y)) = (author, journal, year) {
        heuristic(format!("{}[Author] AND {}[Journal] AND {}[Year]", a, j, y));
    }
    if let Some(t) = title {
        heuristic(t.to_string());
    }
    if let (Some(a), Some(y)) = (author, year) {
        heuristic(format!("{}[Author] AND {}[Year]", a, y));
    }

    attempts
}

/// Run the cascade against the search capability
///
/// Returns the first identifier of the first attempt with a non-empty result,
/// together with that attempt's label. Provider errors count as empty results
/// so a transport failure on one strategy never aborts the cascade.
pub async fn run_cascade<P: CitationProvider + ?Sized>(
    provider: &P,
    pacer: &RateLimiter,
    profile: &QueryProfile,
) -> Option<(String, String)> {
    for attempt in build_attempts(profile) {
        pacer.acquire().await;
        match provider.search(&attempt.query, attempt.retmax).await {
            Ok(ids) => {
                if let Some(id) = ids.into_iter().next() {
                    debug!(strategy = %attempt.label(), id = %id, "Search strategy matched");
                    return Some((id, attempt.label()));
                }
                debug!(strategy = %attempt.label(), "Search strategy returned no results");
            }
            Err(err) => {
                debug!(strategy = %attempt.label(), error = %err, "Search strategy failed");
            }
        }
    }
    None
}
