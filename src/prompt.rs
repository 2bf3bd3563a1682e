//! Interactive input adapter
//!
//! Reads the search term and result count from a terminal. Generic over the
//! streams so it can be driven from tests.

use std::io::{BufRead, Write};

use crate::error::{ReportError, Result};
use crate::query::SearchQuery;

pub const TERM_PROMPT: &str = "search term";
pub const COUNT_PROMPT: &str = "max result count";

/// Print `label` on its own line and read one line of answer
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &'static str) -> Result<String> {
    let io_error = |e: std::io::Error| ReportError::InvalidInput {
        field: label,
        reason: e.to_string(),
    };

    writeln!(output, "{label}").map_err(io_error)?;
    output.flush().map_err(io_error)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(io_error)?;
    if read == 0 {
        return Err(ReportError::InvalidInput {
            field: label,
            reason: "input closed before a value was entered".to_string(),
        });
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompt for the term, then the count, and validate both
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use pubmed_report::prompt::read_search_query;
///
/// let mut input = Cursor::new("covid\n20\n");
/// let mut output = Vec::new();
/// let query = read_search_query(&mut input, &mut output).unwrap();
///
/// assert_eq!(query.term(), "covid");
/// assert_eq!(query.max_results(), 20);
/// ```
pub fn read_search_query<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<SearchQuery> {
    let term = ask(input, output, TERM_PROMPT)?;
    let count = ask(input, output, COUNT_PROMPT)?;
    SearchQuery::parse(&term, &count)
}
