//! # PubMed Reference Matcher
//!
//! Matches free-text bibliographic references (pasted from a paper's
//! reference list) against PubMed, returning PMIDs, PMCIDs, and canonically
//! formatted citations.
//!
//! The pipeline segments the pasted text into numbered references, derives
//! query features (DOI, title, author, year, journal) from each one by
//! heuristic extraction, tries a cascade of progressively looser ESearch
//! queries, and validates every candidate against the source text by title
//! word overlap before accepting it. Matching trades recall for precision:
//! a reference with no acceptable candidate is reported unmatched rather
//! than guessed at.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_matcher::ReferenceMatcher;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let matcher = ReferenceMatcher::new();
//!
//!     let report = matcher
//!         .match_references(
//!             "1. Zhu N, Zhang D. A Novel Coronavirus from Patients with \
//!              Pneumonia in China. N Engl J Med. 2020;382:727-733.",
//!         )
//!         .await?;
//!
//!     for matched in &report.matched {
//!         println!("#{}: {}", matched.number, matched.candidate.formatted);
//!     }
//!     for unmatched in &report.unmatched {
//!         println!("#{}: no match for {}", unmatched.number, unmatched.original);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! The matching core is generic over [`CitationProvider`], so tests can run
//! against an in-memory fake instead of live E-utilities calls; see
//! [`MatchOrchestrator`](matcher::MatchOrchestrator).

pub mod config;
pub mod error;
pub mod matcher;
pub mod provider;
pub mod pubmed;
pub mod rate_limit;
pub mod retry;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{MatcherError, Result};
pub use matcher::{MatchOrchestrator, MatchReport, QueryProfile, RawReference};
pub use provider::CitationProvider;
pub use pubmed::{ArticleSummary, PubMedClient};
pub use rate_limit::RateLimiter;

/// Convenience facade combining the PubMed client and the batch orchestrator
///
/// Exposes the pure request/response operations the surrounding review and
/// export workflow calls; any retained review state lives in that workflow,
/// not here.
pub struct ReferenceMatcher {
    orchestrator: MatchOrchestrator<PubMedClient>,
}

impl ReferenceMatcher {
    /// Create a matcher with default NCBI configuration
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a matcher with custom client configuration
    ///
    /// The orchestrator paces calls at the configuration's effective rate
    /// limit, so an API key speeds up a whole matching run.
    pub fn with_config(config: ClientConfig) -> Self {
        let pacer = config.create_rate_limiter();
        let client = PubMedClient::with_config(config);
        Self {
            orchestrator: MatchOrchestrator::with_pacer(client, pacer),
        }
    }

    /// Segment pasted text and match every reference against PubMed
    ///
    /// Returns [`MatcherError::NoReferencesFound`] for blank input.
    pub async fn match_references(&self, text: &str) -> Result<MatchReport> {
        self.orchestrator.match_text(text).await
    }

    /// Like [`match_references`](Self::match_references), reporting progress
    /// after each group of references as `(processed, total)`
    pub async fn match_references_with_progress(
        &self,
        text: &str,
        progress: impl FnMut(usize, usize),
    ) -> Result<MatchReport> {
        self.orchestrator
            .match_text_with_progress(text, progress)
            .await
    }

    /// Fetch the NBIB (EndNote import) text for a set of matched PMIDs
    pub async fn fetch_nbib(&self, pmids: &[String]) -> Result<String> {
        self.orchestrator.fetch_nbib(pmids).await
    }
}

impl Default for ReferenceMatcher {
    fn default() -> Self {
        Self::new()
    }
}
