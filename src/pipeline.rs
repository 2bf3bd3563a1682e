//! Search → summaries → abstracts → merge → export

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{Instrument, info, info_span};

use crate::error::Result;
use crate::merge::merge_records;
use crate::pubmed::PubMedClient;
use crate::query::SearchQuery;
use crate::report::{ExportedReport, ReportStyle, export_report};

/// One configured run of the export pipeline
///
/// # Example
///
/// ```no_run
/// use pubmed_report::{Pipeline, PubMedClient, SearchQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = Pipeline::new(PubMedClient::new()?).with_output_dir("reports");
///     let exported = pipeline.run(&SearchQuery::new("covid", 20)?).await?;
///     println!("Wrote {}", exported.path.display());
///     Ok(())
/// }
/// ```
pub struct Pipeline {
    client: PubMedClient,
    output_dir: PathBuf,
    style: ReportStyle,
    date: Option<NaiveDate>,
}

impl Pipeline {
    /// Pipeline writing to the current directory with the default style
    pub fn new(client: PubMedClient) -> Self {
        Self {
            client,
            output_dir: PathBuf::from("."),
            style: ReportStyle::default(),
            date: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.style = style;
        self
    }

    /// Fix the date used in the file name instead of today's local date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Run every stage in order
    ///
    /// Nothing is written unless all three fetch stages succeed.
    pub async fn run(&self, query: &SearchQuery) -> Result<ExportedReport> {
        let span = info_span!(
            "pipeline",
            term = %query.term(),
            max_results = query.max_results()
        );

        async {
            let pmids = self.client.search_ids(query).await?;
            info!(pmids = pmids.len(), "Identifier search finished");

            let summaries = self.client.fetch_summaries(&pmids).await?;
            let abstracts = self.client.fetch_abstracts(&pmids).await?;
            let records = merge_records(summaries, abstracts);

            let date = self.date.unwrap_or_else(|| Local::now().date_naive());
            export_report(query.term(), records, date, &self.output_dir, &self.style)
        }
        .instrument(span)
        .await
    }
}
