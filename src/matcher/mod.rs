//! Reference matching core: segmentation, feature extraction, the search
//! strategy cascade, match validation, citation formatting, and the batch
//! orchestrator that drives them.

mod cascade;
mod extract;
mod format;
mod orchestrator;
mod report;
mod segment;
mod validate;

pub use cascade::{build_attempts, run_cascade, SearchAttempt};
pub use extract::{
    extract_doi, extract_first_author, extract_journal, extract_profile, extract_title,
    extract_year, tokenize_title, QueryProfile,
};
pub use format::format_citation;
pub use orchestrator::MatchOrchestrator;
pub use report::{CandidateMatch, MatchReport, MatchedReference, UnmatchedReference};
pub use segment::{segment_references, RawReference};
pub use validate::title_overlap_accepts;
