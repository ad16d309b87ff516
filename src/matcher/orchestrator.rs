//! Drives the per-reference matching pipeline across a full reference list

use tracing::{debug, info, instrument};

use crate::error::{MatcherError, Result};
use crate::matcher::cascade::run_cascade;
use crate::matcher::extract::extract_profile;
use crate::matcher::format::format_citation;
use crate::matcher::report::{CandidateMatch, MatchReport, MatchedReference, UnmatchedReference};
use crate::matcher::segment::{segment_references, RawReference};
use crate::matcher::validate::title_overlap_accepts;
use crate::provider::CitationProvider;
use crate::rate_limit::RateLimiter;

/// References per progress group
const DEFAULT_GROUP_SIZE: usize = 3;

/// Sequential batch orchestrator for the matching pipeline
///
/// Processes references strictly in order, one external call in flight at a
/// time, pacing every search and summary call through the injected rate
/// limiter. Any failure while processing one reference (transport error,
/// empty results, rejected validation) turns that reference into an unmatched
/// entry and never aborts the run.
pub struct MatchOrchestrator<P> {
    provider: P,
    pacer: RateLimiter,
    group_size: usize,
}

impl<P: CitationProvider> MatchOrchestrator<P> {
    /// Create an orchestrator pacing calls at the default NCBI rate (3/s)
    pub fn new(provider: P) -> Self {
        Self::with_pacer(provider, RateLimiter::ncbi_default())
    }

    /// Create an orchestrator with an injected pacing policy
    ///
    /// Tests pass a high-rate limiter so runs need no wall-clock delay.
    pub fn with_pacer(provider: P, pacer: RateLimiter) -> Self {
        Self {
            provider,
            pacer,
            group_size: DEFAULT_GROUP_SIZE,
        }
    }

    /// Override the progress group size
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size.max(1);
        self
    }

    /// Segment `text` and match every reference
    ///
    /// Returns [`MatcherError::NoReferencesFound`] when segmentation yields
    /// nothing, keeping blank input distinct from a zero-match run.
    pub async fn match_text(&self, text: &str) -> Result<MatchReport> {
        self.match_text_with_progress(text, |_, _| {}).await
    }

    /// Like [`match_text`](Self::match_text), reporting progress after each
    /// group as `(processed, total)`
    #[instrument(skip(self, text, progress))]
    pub async fn match_text_with_progress(
        &self,
        text: &str,
        progress: impl FnMut(usize, usize),
    ) -> Result<MatchReport> {
        let references = segment_references(text);
        if references.is_empty() {
            return Err(MatcherError::NoReferencesFound);
        }
        info!(count = references.len(), "Segmented references");
        Ok(self.match_references(&references, progress).await)
    }

    /// Match an already-segmented reference sequence
    ///
    /// Every input reference lands in exactly one of the report's two
    /// collections, in input order.
    pub async fn match_references(
        &self,
        references: &[RawReference],
        mut progress: impl FnMut(usize, usize),
    ) -> MatchReport {
        let total = references.len();
        let mut report = MatchReport::default();
        let mut processed = 0;

        for group in references.chunks(self.group_size) {
            for reference in group {
                match self.match_one(reference).await {
                    Some(candidate) => {
                        info!(
                            number = %reference.number,
                            pmid = %candidate.pmid,
                            strategy = %candidate.strategy,
                            "Reference matched"
                        );
                        report.matched.push(MatchedReference {
                            number: reference.number.clone(),
                            original: reference.text.clone(),
                            candidate,
                        });
                    }
                    None => {
                        debug!(number = %reference.number, "Reference unmatched");
                        report.unmatched.push(UnmatchedReference {
                            number: reference.number.clone(),
                            original: reference.text.clone(),
                        });
                    }
                }
            }
            processed += group.len();
            progress(processed, total);
        }

        info!(
            matched = report.matched.len(),
            unmatched = report.unmatched.len(),
            "Matching run complete"
        );
        report
    }

    /// Run one reference through the full pipeline: extract, cascade, summary
    /// lookup, validation, formatting. `None` means unmatched, whatever the
    /// cause.
    async fn match_one(&self, reference: &RawReference) -> Option<CandidateMatch> {
        let profile = extract_profile(&reference.text);

        let (pmid, strategy) = run_cascade(&self.provider, &self.pacer, &profile).await?;

        self.pacer.acquire().await;
        let summary = match self.provider.summary(&pmid).await {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                debug!(pmid = %pmid, "No summary record for candidate");
                return None;
            }
            Err(err) => {
                debug!(pmid = %pmid, error = %err, "Summary lookup failed");
                return None;
            }
        };

        if !title_overlap_accepts(&profile.title_words, &summary.title) {
            debug!(
                pmid = %pmid,
                candidate_title = %summary.title,
                "Candidate rejected by title overlap"
            );
            return None;
        }

        let formatted = format_citation(&summary);
        Some(CandidateMatch {
            pmid: summary.pmid,
            pmc_id: summary.pmc_id,
            title: summary.title,
            authors: summary.authors.join(", "),
            journal: summary.journal,
            pub_date: summary.pub_date,
            formatted,
            strategy,
        })
    }

    /// Fetch the raw NBIB export for a set of PMIDs through the provider
    pub async fn fetch_nbib(&self, pmids: &[String]) -> Result<String> {
        if pmids.is_empty() {
            return Ok(String::new());
        }
        self.pacer.acquire().await;
        self.provider.fetch_nbib(pmids).await
    }

    /// Access the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
