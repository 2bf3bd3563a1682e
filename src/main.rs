use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pubmed_report::prompt;
use pubmed_report::{ClientConfig, DEFAULT_REQUEST_INTERVAL, Pipeline, PubMedClient, SearchQuery};

#[derive(Parser)]
#[command(
    name = "pubmed-report",
    about = "Search PubMed and export titles, authors and abstracts to a spreadsheet",
    long_about = "Prompts for a search term and a result count, fetches summaries and abstracts \
                  from NCBI E-utilities and writes <YYYYMMDD>_<term>_.xlsx"
)]
struct Cli {
    /// Directory the spreadsheet is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "pubmed-report")]
    tool: String,

    /// Pause between consecutive requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new()
            .with_tool(&self.tool)
            .with_request_interval(Duration::from_millis(self.interval_ms));

        if let Some(email) = &self.email {
            config = config.with_email(email);
        }

        config
    }
}

/// The term and count always come from the terminal prompts
fn prompt_search_query() -> pubmed_report::Result<SearchQuery> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    prompt::read_search_query(&mut input, &mut output)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let query = prompt_search_query()?;
    tracing::debug!(term = %query.term(), max_results = query.max_results(), "Search parameters");

    let client = PubMedClient::with_config(cli.client_config())?;
    let exported = Pipeline::new(client)
        .with_output_dir(cli.output_dir.clone())
        .run(&query)
        .await
        .with_context(|| format!("Export for {:?} aborted", query.term()))?;

    writeln!(io::stdout(), "{}", exported.path.display())?;
    Ok(())
}
