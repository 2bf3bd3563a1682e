use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ids::PubMedId;

/// Pipeline stage that issued a failing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// ESearch: term to identifier list
    Search,
    /// ESummary: per-identifier metadata
    Summary,
    /// EFetch: per-identifier abstract XML
    Abstract,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Search => "identifier search",
            Stage::Summary => "metadata fetch",
            Stage::Abstract => "abstract fetch",
        };
        f.write_str(name)
    }
}

/// Low-level cause of a retrieval failure
#[derive(Error, Debug)]
pub enum RetrievalFailure {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    Xml(String),

    /// Expected field absent from the response
    #[error("missing field `{field}` in response")]
    MissingField { field: String },

    /// Field present but not usable
    #[error("malformed field `{field}`: {value:?}")]
    MalformedField { field: String, value: String },
}

/// Error types for the search-and-export pipeline
#[derive(Error, Debug)]
pub enum ReportError {
    /// Search term or result count rejected before any request
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A fetch stage failed; the run is aborted
    #[error("{stage} failed{}: {source}", pmid_context(.pmid))]
    Retrieval {
        stage: Stage,
        pmid: Option<PubMedId>,
        #[source]
        source: RetrievalFailure,
    },

    /// The spreadsheet could not be written
    #[error("Failed to write report {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

impl ReportError {
    pub(crate) fn retrieval(
        stage: Stage,
        pmid: Option<&PubMedId>,
        source: impl Into<RetrievalFailure>,
    ) -> Self {
        ReportError::Retrieval {
            stage,
            pmid: pmid.cloned(),
            source: source.into(),
        }
    }

    /// Stage of a retrieval error, if this is one
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ReportError::Retrieval { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

fn pmid_context(pmid: &Option<PubMedId>) -> String {
    match pmid {
        Some(id) => format!(" for PMID {id}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
