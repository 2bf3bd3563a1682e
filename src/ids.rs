//! Canonical PubMed identifier
//!
//! ESearch and ESummary hand out identifiers as JSON strings while EFetch
//! embeds them as XML text, sometimes padded with whitespace. Every stage
//! parses into [`PubMedId`] so the merge step compares one representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated PubMed ID (PMID)
///
/// # Examples
///
/// ```
/// use pubmed_report::PubMedId;
///
/// let pmid = PubMedId::parse("  31978945\n").unwrap();
/// assert_eq!(pmid.as_u32(), 31978945);
/// assert_eq!(pmid.to_string(), "31978945");
///
/// assert!(PubMedId::parse("").is_err());
/// assert!(PubMedId::parse("abc").is_err());
/// assert!(PubMedId::parse("0").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PubMedId {
    value: u32,
}

/// Rejected identifier text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid PMID: {0:?}")]
pub struct InvalidPmid(pub String);

impl PubMedId {
    /// Parse a PMID from a string, trimming surrounding whitespace
    ///
    /// Leading zeros are accepted and dropped, so `"0012"` and `"12"` are the
    /// same identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidPmid> {
        let trimmed = s.trim();

        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPmid(s.to_string()));
        }

        let value = trimmed
            .parse::<u32>()
            .map_err(|_| InvalidPmid(s.to_string()))?;

        if value == 0 {
            return Err(InvalidPmid(s.to_string()));
        }

        Ok(Self { value })
    }

    /// Numeric value
    pub fn as_u32(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for PubMedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for PubMedId {
    type Err = InvalidPmid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PubMedId {
    type Error = InvalidPmid;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PubMedId> for String {
    fn from(id: PubMedId) -> Self {
        id.to_string()
    }
}
