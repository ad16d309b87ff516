use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{MatcherError, Result};
use crate::provider::{CitationProvider, ProviderFuture};
use crate::pubmed::models::ArticleSummary;
use crate::pubmed::responses::{ESearchResult, ESummaryDocSum, ESummaryResponse};
use crate::rate_limit::RateLimiter;
use crate::retry::with_retry;

/// Client for the NCBI E-utilities API
///
/// Wraps the three operations the matching core needs (ESearch, ESummary,
/// EFetch in NBIB mode) with rate limiting and retry on transient failures.
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with default configuration
    ///
    /// Uses the default NCBI rate limit (3 requests/second) and no API key.
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_matcher::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_matcher::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key")
    ///     .with_email("researcher@university.edu");
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(Duration::from_secs(config.timeout.as_secs()))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            rate_limiter,
            config,
        }
    }

    /// Search PubMed, returning at most `retmax` PMIDs ranked by relevance
    ///
    /// An empty or whitespace-only term short-circuits to an empty list
    /// without touching the network.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_matcher::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmids = client.search_pmids("10.1056/NEJMoa2001017", 1).await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(term = %term, retmax = retmax))]
    pub async fn search_pmids(&self, term: &str, retmax: usize) -> Result<Vec<String>> {
        if term.trim().is_empty() {
            debug!("Empty search term, returning no results");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(term),
            retmax
        );

        let response = self.make_request(&url).await?;
        let search_result: ESearchResult = response.json().await?;

        // NCBI sometimes returns 200 OK with an ERROR field in the body
        if let Some(error_msg) = &search_result.esearchresult.error {
            return Err(MatcherError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {}", error_msg),
            });
        }

        Ok(search_result.esearchresult.idlist)
    }

    /// Fetch the ESummary record for a single PMID
    ///
    /// Returns `Ok(None)` when the response carries no usable record for the
    /// id (unknown PMID, or a per-UID error object).
    #[instrument(skip(self), fields(pmid = %pmid))]
    pub async fn fetch_summary(&self, pmid: &str) -> Result<Option<ArticleSummary>> {
        let url = format!(
            "{}/esummary.fcgi?db=pubmed&id={}&retmode=json",
            self.base_url, pmid
        );

        let response = self.make_request(&url).await?;
        let json_text = response.text().await?;
        if json_text.trim().is_empty() {
            return Ok(None);
        }

        let mut summaries = Self::parse_esummary_response(&json_text)?;
        Ok(summaries
            .iter()
            .position(|s| s.pmid == pmid)
            .map(|i| summaries.remove(i)))
    }

    /// Fetch the raw NBIB export for a set of PMIDs via EFetch
    ///
    /// The returned text blob is the MEDLINE/EndNote import format; it is
    /// passed through to the caller untouched.
    #[instrument(skip(self), fields(pmids_count = pmids.len()))]
    pub async fn fetch_nbib(&self, pmids: &[String]) -> Result<String> {
        if pmids.is_empty() {
            return Ok(String::new());
        }

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&rettype=nbib&retmode=text",
            self.base_url,
            pmids.join(",")
        );

        let response = self.make_request(&url).await?;
        Ok(response.text().await?)
    }

    /// Parse an ESummary JSON response into summary records
    pub(crate) fn parse_esummary_response(json_text: &str) -> Result<Vec<ArticleSummary>> {
        let response: ESummaryResponse = serde_json::from_str(json_text)?;
        let result = &response.result;

        let uids = result
            .get("uids")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut summaries = Vec::with_capacity(uids.len());

        for uid in &uids {
            let Some(doc_value) = result.get(uid) else {
                warn!(uid = %uid, "UID not found in ESummary response");
                continue;
            };

            if doc_value.get("error").is_some() {
                warn!(uid = %uid, "ESummary returned error for UID");
                continue;
            }

            let doc: ESummaryDocSum = match serde_json::from_value(doc_value.clone()) {
                Ok(d) => d,
                Err(e) => {
                    warn!(uid = %uid, error = %e, "Failed to parse ESummary document");
                    continue;
                }
            };

            let mut doi = None;
            let mut pmc_id = None;
            for aid in &doc.articleids {
                match aid.idtype.as_str() {
                    "doi" if !aid.value.is_empty() => doi = Some(aid.value.clone()),
                    "pmc" if !aid.value.is_empty() => pmc_id = Some(aid.value.clone()),
                    _ => {}
                }
            }

            summaries.push(ArticleSummary {
                pmid: doc.uid,
                title: doc.title,
                authors: doc.authors.iter().map(|a| a.name.clone()).collect(),
                journal: doc.source,
                pub_date: doc.pubdate,
                volume: doc.volume,
                pages: doc.pages,
                doi,
                pmc_id,
            });
        }

        Ok(summaries)
    }

    /// Make an HTTP request with rate limiting and retry.
    /// Appends the configured API parameters (api_key, email, tool) to the URL.
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);
            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        let response = with_retry(
            || async {
                self.rate_limiter.acquire().await;
                debug!(url = %final_url, "Making API request");
                let response = self
                    .client
                    .get(&final_url)
                    .send()
                    .await
                    .map_err(MatcherError::from)?;

                // Server errors and 429 become retryable ApiErrors
                if response.status().is_server_error() || response.status().as_u16() == 429 {
                    return Err(MatcherError::ApiError {
                        status: response.status().as_u16(),
                        message: response
                            .status()
                            .canonical_reason()
                            .unwrap_or("Unknown error")
                            .to_string(),
                    });
                }

                Ok(response)
            },
            &self.config.retry_config,
            "NCBI API request",
        )
        .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "API request failed");
            return Err(MatcherError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CitationProvider for PubMedClient {
    fn search<'a>(&'a self, query: &'a str, retmax: usize) -> ProviderFuture<'a, Vec<String>> {
        Box::pin(self.search_pmids(query, retmax))
    }

    fn summary<'a>(&'a self, id: &'a str) -> ProviderFuture<'a, Option<ArticleSummary>> {
        Box::pin(self.fetch_summary(id))
    }

    fn fetch_nbib<'a>(&'a self, ids: &'a [String]) -> ProviderFuture<'a, String> {
        Box::pin(self.fetch_nbib(ids))
    }
}
