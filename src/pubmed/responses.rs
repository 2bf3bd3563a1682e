use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    #[serde(default)]
    pub count: Option<String>,
    /// Absent when NCBI reports an `ERROR` instead of results
    #[serde(default)]
    pub idlist: Option<Vec<String>>,
    /// NCBI answers some malformed queries with 200 OK and an ERROR field
    #[serde(rename = "ERROR", default)]
    pub error: Option<String>,
}

/// ESummary envelope; `result` maps each uid to its document plus a `uids` list
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESummaryResponse {
    pub result: Map<String, Value>,
}

/// The ESummary fields the report uses
///
/// All optional so a missing field can be reported by name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ESummaryDocSum {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sortfirstauthor: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub epubdate: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
