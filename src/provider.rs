//! Capability boundary between the matching core and the citation database
//!
//! The matching pipeline only needs three operations from PubMed: ranked
//! identifier search, per-identifier summary lookup, and raw NBIB export.
//! Keeping them behind a trait lets the core run against a deterministic
//! in-memory implementation in tests instead of live E-utilities calls.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::pubmed::ArticleSummary;

/// Boxed future returned by [`CitationProvider`] methods
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// A citation database that can be searched for matching publications
pub trait CitationProvider: Send + Sync {
    /// Search for publications matching `query`, returning at most `retmax`
    /// identifiers ranked by relevance. An empty list means no match.
    fn search<'a>(&'a self, query: &'a str, retmax: usize) -> ProviderFuture<'a, Vec<String>>;

    /// Fetch the summary record for one identifier. `None` means the database
    /// has no usable record for it.
    fn summary<'a>(&'a self, id: &'a str) -> ProviderFuture<'a, Option<ArticleSummary>>;

    /// Fetch the raw NBIB export for a set of identifiers
    fn fetch_nbib<'a>(&'a self, ids: &'a [String]) -> ProviderFuture<'a, String>;
}
