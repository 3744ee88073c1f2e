//! CLI entry point for the FEC party rater.
//!
//! `fetch` pages OpenFEC Schedule A receipts for one employer into a CSV;
//! `analyze` classifies that CSV's contributors by party and reports.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fec_party_rater::analyzers::analyzer::analyze;
use fec_party_rater::analyzers::classify::DEFAULT_THRESHOLD;
use fec_party_rater::analyzers::committees::DEFAULT_TOP_N;
use fec_party_rater::config::{
    AnalysisConfig, DEFAULT_ALLPACS_PATH, DEFAULT_ARISTOTLE_PATH, DEFAULT_BASE_URL, FetchConfig,
    KeyPlacement,
};
use fec_party_rater::fetch::HttpClient;
use fec_party_rater::fetch::auth::{ApiKey, UrlParam};
use fec_party_rater::{
    chart::render_party_chart,
    fetch::BasicClient,
    infra::openfec::OpenFecClient,
    output::{log_preview, print_pretty, write_json, write_records},
    report,
    services::contributions_api::fetch_pages,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fec_party_rater")]
#[command(about = "Party affiliation of a company's political donors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify contributors in a transactions CSV and print the report
    Analyze {
        /// Transactions CSV, e.g. TractorSupplyFECr.csv
        #[arg(value_name = "FILE")]
        transactions: PathBuf,

        /// Primary committee → party lookup
        #[arg(long, default_value = DEFAULT_ALLPACS_PATH)]
        allpacs: PathBuf,

        /// Fallback committee → party lookup
        #[arg(long, default_value = DEFAULT_ARISTOTLE_PATH)]
        aristotle: PathBuf,

        /// Number of committees to rank
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Share of a person's giving needed to label them with a party
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// SVG file for the pie charts (default: <COMPANY>_party_breakdown.svg)
        #[arg(long, conflicts_with = "no_chart")]
        chart: Option<PathBuf>,

        /// Skip the chart
        #[arg(long, default_value_t = false)]
        no_chart: bool,

        /// Also write the analysis as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Fetch Schedule A receipts for an employer into a CSV
    Fetch {
        /// Contributor employer to search for
        #[arg(short, long)]
        employer: String,

        /// OpenFEC API key
        #[arg(long, env = "FEC_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Send the key as an `api_key` query parameter instead of `X-Api-Key`
        #[arg(long, default_value_t = false)]
        key_in_query: bool,

        #[arg(long, default_value = "2019-01-01")]
        min_date: NaiveDate,

        #[arg(long, default_value = "2020-12-31")]
        max_date: NaiveDate,

        #[arg(long, default_value_t = 100)]
        per_page: u32,

        /// Number of pages to request
        #[arg(short, long, default_value_t = 2)]
        pages: u32,

        #[arg(long, default_value = "-contribution_receipt_date")]
        sort: String,

        #[arg(long, env = "FEC_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// CSV file to write
        #[arg(short, long, default_value = "API-FETCH-FEC.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            transactions,
            allpacs,
            aristotle,
            top,
            threshold,
            chart,
            no_chart,
            json,
        } => {
            let config = AnalysisConfig {
                allpacs,
                aristotle,
                top_n: top,
                threshold,
                ..AnalysisConfig::new(transactions)
            };
            let analysis = analyze(&config)?;
            print_pretty(&analysis);

            print!("{}", report::render(&analysis));

            if let Some(path) = json {
                write_json(&path, &analysis)?;
                info!(path = %path.display(), "Analysis JSON written");
            }

            if !no_chart {
                let path = chart
                    .unwrap_or_else(|| PathBuf::from(format!("{}_party_breakdown.svg", analysis.company)));
                render_party_chart(&path, &analysis)?;
                println!("\nChart saved to: {}", path.display());
            }
        }
        Commands::Fetch {
            employer,
            api_key,
            key_in_query,
            min_date,
            max_date,
            per_page,
            pages,
            sort,
            base_url,
            output,
        } => {
            let config = FetchConfig {
                api_key,
                key_placement: if key_in_query {
                    KeyPlacement::Query
                } else {
                    KeyPlacement::Header
                },
                base_url,
                employer,
                min_date,
                max_date,
                per_page,
                pages,
                sort,
                output,
            };

            let http = BasicClient::new()?;
            match config.key_placement {
                KeyPlacement::Header => {
                    fetch_contributions(ApiKey::x_api_key(http, &config.api_key)?, &config).await?
                }
                KeyPlacement::Query => {
                    fetch_contributions(UrlParam::api_key(http, &config.api_key), &config).await?
                }
            }
        }
    }

    Ok(())
}

/// Colored stderr + JSON rolling log file. The returned guard flushes the
/// file writer on drop.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fec_party_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fec_party_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Pages the Schedule A endpoint and writes every record to the configured CSV.
#[tracing::instrument(
    skip(http, config),
    fields(employer = %config.employer, pages = config.pages, output = %config.output.display())
)]
async fn fetch_contributions<C: HttpClient>(http: C, config: &FetchConfig) -> Result<()> {
    info!(
        min_date = %config.min_date,
        max_date = %config.max_date,
        "Starting FEC API data fetch"
    );

    let client = OpenFecClient::new(http, config);
    let records = fetch_pages(&client, config.pages).await?;

    if records.is_empty() {
        warn!("No data retrieved from API");
        return Ok(());
    }

    write_records(&config.output, &records)
        .with_context(|| format!("writing {}", config.output.display()))?;
    info!(rows = records.len(), path = %config.output.display(), "Data written");

    log_preview(&records);
    Ok(())
}
