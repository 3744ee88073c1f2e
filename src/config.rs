//! Explicit run configuration for the fetch and analyze steps.
//!
//! Nothing in the pipeline reads process-wide state; `main` builds these
//! from CLI arguments and the environment and passes them in.

use chrono::NaiveDate;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::analyzers::classify::DEFAULT_THRESHOLD;
use crate::analyzers::committees::DEFAULT_TOP_N;

pub const DEFAULT_BASE_URL: &str = "https://api.open.fec.gov/v1";
pub const DEFAULT_ALLPACS_PATH: &str = "AllPacs.xslx.csv";
pub const DEFAULT_ARISTOTLE_PATH: &str = "Aristotle1.xlsx.csv";

static FEC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FECr?$").expect("static regex"));

/// Derives the company label from a transactions file path:
/// `data/TractorSupplyFECr.csv` → `TRACTORSUPPLY`.
pub fn company_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    FEC_SUFFIX.replace(&stem, "").to_uppercase()
}

/// Inputs and knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub transactions: PathBuf,
    pub allpacs: PathBuf,
    pub aristotle: PathBuf,
    pub company: String,
    pub threshold: f64,
    pub top_n: usize,
}

impl AnalysisConfig {
    /// Config with the default lookup paths, threshold and top-N, and the
    /// company label derived from `transactions`.
    pub fn new(transactions: impl Into<PathBuf>) -> Self {
        let transactions = transactions.into();
        Self {
            company: company_label(&transactions),
            transactions,
            allpacs: PathBuf::from(DEFAULT_ALLPACS_PATH),
            aristotle: PathBuf::from(DEFAULT_ARISTOTLE_PATH),
            threshold: DEFAULT_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Where the API key goes on each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPlacement {
    #[default]
    Header,
    Query,
}

/// Parameters for paging the Schedule A endpoint.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_key: String,
    pub key_placement: KeyPlacement,
    pub base_url: String,
    pub employer: String,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub per_page: u32,
    pub pages: u32,
    pub sort: String,
    pub output: PathBuf,
}

impl FetchConfig {
    /// Query pairs shared by every page request, `page` excluded.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("contributor_employer", self.employer.clone()),
            ("min_date", self.min_date.format("%Y-%m-%d").to_string()),
            ("max_date", self.max_date.format("%Y-%m-%d").to_string()),
            ("per_page", self.per_page.to_string()),
            ("sort", self.sort.clone()),
        ]
    }
}
