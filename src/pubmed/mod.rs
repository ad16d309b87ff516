//! NCBI E-utilities client for PubMed search, summaries, and NBIB export

mod client;
mod models;
mod responses;

pub use client::PubMedClient;
pub use models::ArticleSummary;
