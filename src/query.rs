//! Search request built from user input

use crate::error::{ReportError, Result};

/// Retrievable window of ESearch: retstart stops at 9998 and retmax at 9999
pub const MAX_RETRIEVABLE: usize = 9999;

/// A validated search request: a term and an upper bound on results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    max_results: usize,
}

impl SearchQuery {
    /// Build a query, trimming the term
    ///
    /// # Errors
    ///
    /// `ReportError::InvalidInput` when the term is blank or `max_results`
    /// exceeds [`MAX_RETRIEVABLE`].
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_report::SearchQuery;
    ///
    /// let query = SearchQuery::new(" covid ", 20).unwrap();
    /// assert_eq!(query.term(), "covid");
    /// assert_eq!(query.max_results(), 20);
    ///
    /// assert!(SearchQuery::new("   ", 20).is_err());
    /// ```
    pub fn new(term: impl AsRef<str>, max_results: usize) -> Result<Self> {
        let term = term.as_ref().trim();

        if term.is_empty() {
            return Err(ReportError::InvalidInput {
                field: "search term",
                reason: "must not be empty".to_string(),
            });
        }

        if max_results > MAX_RETRIEVABLE {
            return Err(ReportError::InvalidInput {
                field: "max result count",
                reason: format!("requested {max_results}, maximum is {MAX_RETRIEVABLE}"),
            });
        }

        Ok(Self {
            term: term.to_string(),
            max_results,
        })
    }

    /// Build a query from the raw text typed at the prompt
    pub fn parse(term: &str, max_results: &str) -> Result<Self> {
        let trimmed = max_results.trim();
        let count = trimmed
            .parse::<usize>()
            .map_err(|_| ReportError::InvalidInput {
                field: "max result count",
                reason: format!("{trimmed:?} is not a non-negative integer"),
            })?;

        Self::new(term, count)
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }
}
