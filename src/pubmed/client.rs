use std::collections::HashMap;

use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ReportError, Result, RetrievalFailure, Stage};
use crate::ids::PubMedId;
use crate::models::{ArticleAbstract, ArticleSummary};
use crate::pubmed::parser::parse_abstract;
use crate::pubmed::responses::{ESearchResult, ESummaryDocSum, ESummaryResponse};
use crate::query::SearchQuery;
use crate::rate_limit::RateLimiter;

/// Client for the three E-utilities endpoints the report needs
///
/// Requests are issued one at a time and spaced by the configured
/// request interval.
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with the default configuration
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be built (TLS backend
    /// initialisation).
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_report::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new().with_email("researcher@university.edu");
    /// let client = PubMedClient::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ReportError::retrieval(Stage::Search, None, e))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            rate_limiter,
            config,
        }
    }

    /// Search PubMed and return matching PMIDs in the order the service ranks them
    ///
    /// At most `query.max_results()` identifiers are returned. An empty list
    /// is a valid outcome.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_report::{PubMedClient, SearchQuery};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new()?;
    ///     let pmids = client.search_ids(&SearchQuery::new("covid-19 treatment", 10)?).await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(term = %query.term(), max_results = query.max_results()))]
    pub async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<PubMedId>> {
        let fail = |e: RetrievalFailure| ReportError::retrieval(Stage::Search, None, e);

        if query.max_results() == 0 {
            debug!("max_results is zero, skipping ESearch request");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&retmode=json&retmax={}&term={}",
            self.base_url,
            query.max_results(),
            urlencoding::encode(query.term())
        );

        let response = self.make_request(&url).await.map_err(fail)?;
        let body = response.text().await.map_err(|e| fail(e.into()))?;
        let search_result: ESearchResult =
            serde_json::from_str(&body).map_err(|e| fail(e.into()))?;

        if let Some(error_msg) = search_result.esearchresult.error {
            return Err(fail(RetrievalFailure::Status {
                status: 200,
                message: format!("NCBI ESearch API error: {}", error_msg),
            }));
        }

        let idlist = search_result.esearchresult.idlist.as_deref().ok_or_else(|| {
            fail(RetrievalFailure::MissingField {
                field: "esearchresult.idlist".to_string(),
            })
        })?;

        let mut pmids = idlist
            .iter()
            .map(|raw| {
                PubMedId::parse(raw).map_err(|_| {
                    fail(RetrievalFailure::MalformedField {
                        field: "esearchresult.idlist".to_string(),
                        value: raw.clone(),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if pmids.len() > query.max_results() {
            warn!(
                returned = pmids.len(),
                requested = query.max_results(),
                "ESearch returned more identifiers than requested, truncating"
            );
            pmids.truncate(query.max_results());
        }

        info!(
            total_count = search_result.esearchresult.count.as_deref().unwrap_or("0"),
            returned = pmids.len(),
            "ESearch completed"
        );

        Ok(pmids)
    }

    /// Fetch title, first author, journal and e-publication date for each PMID
    ///
    /// One ESummary request per identifier. The `result` objects of every
    /// response are merged into a single map before projection, so the
    /// output follows input order. Any failure aborts the whole stage.
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch_summaries(&self, pmids: &[PubMedId]) -> Result<Vec<ArticleSummary>> {
        let mut documents: HashMap<PubMedId, serde_json::Value> = HashMap::new();

        for pmid in pmids {
            let fail = |e: RetrievalFailure| ReportError::retrieval(Stage::Summary, Some(pmid), e);

            let url = format!(
                "{}/esummary.fcgi?db=pubmed&retmode=json&id={}",
                self.base_url, pmid
            );

            debug!(pmid = %pmid, "Making ESummary API request");
            let response = self.make_request(&url).await.map_err(fail)?;
            let body = response.text().await.map_err(|e| fail(e.into()))?;
            let summary: ESummaryResponse =
                serde_json::from_str(&body).map_err(|e| fail(e.into()))?;

            for (key, doc) in summary.result {
                // `uids` sits next to the per-article objects
                if let Ok(uid) = PubMedId::parse(&key) {
                    documents.insert(uid, doc);
                }
            }
        }

        let summaries = pmids
            .iter()
            .map(|pmid| project_summary(pmid, &documents))
            .collect::<Result<Vec<_>>>()?;

        info!(summaries = summaries.len(), "ESummary completed");
        Ok(summaries)
    }

    /// Fetch the abstract of each PMID from EFetch
    ///
    /// Results are keyed by the PMID found inside each document. If that
    /// differs from the requested one the record is kept under the document
    /// PMID, and a later document with the same PMID replaces an earlier one.
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch_abstracts(&self, pmids: &[PubMedId]) -> Result<Vec<ArticleAbstract>> {
        let mut abstracts: Vec<ArticleAbstract> = Vec::with_capacity(pmids.len());
        let mut positions: HashMap<PubMedId, usize> = HashMap::new();

        for pmid in pmids {
            let fail = |e: RetrievalFailure| ReportError::retrieval(Stage::Abstract, Some(pmid), e);

            let url = format!(
                "{}/efetch.fcgi?db=pubmed&retmode=xml&id={}",
                self.base_url, pmid
            );

            debug!(pmid = %pmid, "Making EFetch API request");
            let response = self.make_request(&url).await.map_err(fail)?;
            let xml = response.text().await.map_err(|e| fail(e.into()))?;
            let parsed = parse_abstract(&xml).map_err(fail)?;

            if parsed.pmid != *pmid {
                warn!(
                    requested = %pmid,
                    found = %parsed.pmid,
                    "EFetch document carries a different PMID"
                );
            }

            debug!(
                pmid = %parsed.pmid,
                abstract_len = parsed.abstract_text.len(),
                "Parsed abstract"
            );

            match positions.get(&parsed.pmid) {
                Some(&index) => abstracts[index] = parsed,
                None => {
                    positions.insert(parsed.pmid.clone(), abstracts.len());
                    abstracts.push(parsed);
                }
            }
        }

        info!(abstracts = abstracts.len(), "EFetch completed");
        Ok(abstracts)
    }

    /// Send a GET request after waiting for the rate limiter
    pub(crate) async fn make_request(
        &self,
        url: &str,
    ) -> std::result::Result<Response, RetrievalFailure> {
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

        self.rate_limiter.acquire().await;
        debug!("Making API request to: {}", final_url);
        let response = self.client.get(&final_url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(RetrievalFailure::Status {
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

fn project_summary(
    pmid: &PubMedId,
    documents: &HashMap<PubMedId, serde_json::Value>,
) -> Result<ArticleSummary> {
    let fail = |e: RetrievalFailure| ReportError::retrieval(Stage::Summary, Some(pmid), e);

    let doc_value = documents.get(pmid).ok_or_else(|| {
        fail(RetrievalFailure::MissingField {
            field: format!("result.{}", pmid),
        })
    })?;

    let doc: ESummaryDocSum =
        serde_json::from_value(doc_value.clone()).map_err(|e| fail(e.into()))?;

    if let Some(error) = &doc.error {
        warn!(pmid = %pmid, error = %error, "ESummary returned error for UID");
    }

    let required = |value: Option<String>, field: &str| {
        value.ok_or_else(|| {
            fail(RetrievalFailure::MissingField {
                field: field.to_string(),
            })
        })
    };

    Ok(ArticleSummary {
        pmid: pmid.clone(),
        title: required(doc.title, "title")?,
        first_author: required(doc.sortfirstauthor, "sortfirstauthor")?,
        journal: required(doc.source, "source")?,
        pub_date: required(doc.epubdate, "epubdate")?,
    })
}
