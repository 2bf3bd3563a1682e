//! # PubMed Report
//!
//! Searches PubMed, fetches per-article summaries and abstracts through the
//! NCBI E-utilities, joins them, and exports the result as a styled `.xlsx`
//! spreadsheet.
//!
//! ## Pipeline
//!
//! 1. **ESearch**: term → ordered PMIDs ([`PubMedClient::search_ids`])
//! 2. **ESummary**: title, first author, journal, e-pub date per PMID
//!    ([`PubMedClient::fetch_summaries`])
//! 3. **EFetch**: abstract text per PMID ([`PubMedClient::fetch_abstracts`])
//! 4. **Merge + export**: inner join on PMID ([`merge_records`]) and
//!    `<YYYYMMDD>_<term>_.xlsx` ([`export_report`])
//!
//! Requests run one after another with a fixed pause between them. Any
//! failure aborts the run before a file is written.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_report::{ClientConfig, Pipeline, PubMedClient, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new().with_email("researcher@university.edu");
//!     let client = PubMedClient::with_config(config)?;
//!
//!     let exported = Pipeline::new(client)
//!         .run(&SearchQuery::new("covid-19 treatment", 10)?)
//!         .await?;
//!
//!     println!("{} rows in {}", exported.report.body_rows().len(), exported.path.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod pubmed;
pub mod query;
pub mod rate_limit;
pub mod report;

// Re-export main types for convenience
pub use config::{ClientConfig, DEFAULT_REQUEST_INTERVAL};
pub use error::{ReportError, Result, RetrievalFailure, Stage};
pub use ids::PubMedId;
pub use merge::merge_records;
pub use models::{ArticleAbstract, ArticleRecord, ArticleSummary};
pub use pipeline::Pipeline;
pub use pubmed::PubMedClient;
pub use query::SearchQuery;
pub use report::{ExportedReport, Report, ReportStyle, export_report};
