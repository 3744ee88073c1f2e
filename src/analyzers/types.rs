//! Data types used by the analysis pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Party code attached to a committee, a transaction or a classified person.
///
/// Codes other than the five known parties and `N` are kept verbatim in
/// [`Party::Other`] so reports can show what the lookup table actually said.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Party {
    Democrat,
    Republican,
    Independent,
    Libertarian,
    Green,
    NoParty,
    Other(String),
}

impl Party {
    /// Parses a lookup cell. Returns `None` for blank cells.
    ///
    /// Matching is case-sensitive: `d` is kept as `Other("d")`.
    pub fn from_code(raw: &str) -> Option<Self> {
        let code = raw.trim();
        if code.is_empty() {
            return None;
        }

        let party = match code {
            "D" => Party::Democrat,
            "R" => Party::Republican,
            "I" => Party::Independent,
            "L" => Party::Libertarian,
            "G" => Party::Green,
            "N" => Party::NoParty,
            _ => Party::Other(code.to_string()),
        };
        Some(party)
    }

    pub fn code(&self) -> &str {
        match self {
            Party::Democrat => "D",
            Party::Republican => "R",
            Party::Independent => "I",
            Party::Libertarian => "L",
            Party::Green => "G",
            Party::NoParty => "N",
            Party::Other(code) => code,
        }
    }

    /// Human-readable label used in reports and chart legends.
    pub fn name(&self) -> &str {
        match self {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Independent => "Independent",
            Party::Libertarian => "Libertarian",
            Party::Green => "Green",
            Party::NoParty => "None/Other",
            Party::Other(code) => code,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Party {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A single contribution row deserialized from the transactions CSV.
///
/// Only the columns the analysis needs are read; any other column in the
/// file is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub committee_id: String,
    #[serde(default)]
    pub committee_name: String,
    #[serde(rename = "contributor_last_name", default)]
    pub last_name: String,
    #[serde(rename = "contributor_zip", default)]
    pub zip: String,
    #[serde(
        rename = "contribution_receipt_amount",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub amount: Option<f64>,
    #[serde(rename = "contribution_receipt_date", default)]
    pub date: String,
}

impl Transaction {
    /// Receipt date, accepting both `2020-10-15` and `2020-10-15T00:00:00`.
    pub fn receipt_date(&self) -> Option<NaiveDate> {
        let day = self.date.trim().get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Row of the `AllPacs` lookup table.
#[derive(Debug, Deserialize)]
pub struct AllPacsRow {
    #[serde(default)]
    pub(crate) committee_id: String,
    #[serde(rename = "Political Affiliation", default)]
    pub(crate) political_affiliation: Option<String>,
}

/// Row of the `Aristotle` lookup table.
#[derive(Debug, Deserialize)]
pub struct AristotleRow {
    #[serde(rename = "Code", default)]
    pub(crate) code: String,
    #[serde(rename = "Party", default)]
    pub(crate) party: Option<String>,
}

/// Committee id → party mapping from one reference table.
#[derive(Debug, Default)]
pub struct PartyLookup {
    entries: HashMap<String, Party>,
}

impl PartyLookup {
    /// Builds a lookup from `(committee_id, party cell)` pairs.
    ///
    /// Blank ids and blank party cells are skipped. When a committee id
    /// appears more than once, the first row wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for (id, party) in pairs {
            let id = id.as_ref().trim();
            let Some(party) = party.and_then(|p| Party::from_code(p.as_ref())) else {
                continue;
            };
            if id.is_empty() {
                continue;
            }
            entries.entry(id.to_string()).or_insert(party);
        }
        Self { entries }
    }

    pub fn get(&self, committee_id: &str) -> Option<&Party> {
        self.entries.get(committee_id.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A transaction with its resolved party and derived person identity.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedTransaction {
    pub committee_id: String,
    pub committee_name: String,
    pub party: Party,
    pub company: String,
    pub last_name: String,
    pub zip5: String,
    pub person_key: String,
    /// `None` when the amount cell was blank.
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl EnrichedTransaction {
    /// Amount as it counts toward sums; blank reads as zero.
    pub fn dollars(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// Transaction-level summary over the whole enriched table.
///
/// `count` includes rows with a blank amount; `max_amount` and
/// `mean_amount` only look at rows that have one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionSummary {
    pub count: usize,
    pub max_amount: Option<f64>,
    pub mean_amount: Option<f64>,
    pub total_amount: f64,
    pub democrat_amount: f64,
    pub republican_amount: f64,
    pub other_amount: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Per-person sums by party bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonTotals {
    pub person_key: String,
    pub democrat: f64,
    pub republican: f64,
    pub independent: f64,
    pub libertarian: f64,
    pub green: f64,
    pub unclassified: f64,
    pub total: f64,
    pub transactions: usize,
}

impl PersonTotals {
    /// Amount given to `party`. Parties without a bucket read as the
    /// unclassified sum.
    pub fn bucket(&self, party: &Party) -> f64 {
        match party {
            Party::Democrat => self.democrat,
            Party::Republican => self.republican,
            Party::Independent => self.independent,
            Party::Libertarian => self.libertarian,
            Party::Green => self.green,
            Party::NoParty | Party::Other(_) => self.unclassified,
        }
    }

    pub(crate) fn add(&mut self, party: &Party, amount: f64) {
        let slot = match party {
            Party::Democrat => &mut self.democrat,
            Party::Republican => &mut self.republican,
            Party::Independent => &mut self.independent,
            Party::Libertarian => &mut self.libertarian,
            Party::Green => &mut self.green,
            Party::NoParty | Party::Other(_) => &mut self.unclassified,
        };
        *slot += amount;
        self.total += amount;
        self.transactions += 1;
    }
}

/// Party label assigned to one person by the threshold rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonClassification {
    pub person_key: String,
    pub label: Party,
    pub total: f64,
}

/// People and dollars for one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyContributors {
    pub label: Party,
    pub people: usize,
    pub dollars: f64,
    pub pct: f64,
}

/// Person-level breakdown by label, sorted for display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContributorBreakdown {
    pub rows: Vec<PartyContributors>,
    pub total_people: usize,
    pub total_dollars: f64,
}

/// Aggregate of the transactions sharing a committee name and party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitteeSummary {
    pub committee_name: String,
    pub party: Party,
    pub count: usize,
    pub max_amount: Option<f64>,
    pub mean_amount: Option<f64>,
    pub total_amount: f64,
}

/// Everything the report and chart need, also written out as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub company: String,
    pub source: String,
    pub threshold: f64,
    pub top_n: usize,
    pub summary: TransactionSummary,
    pub contributors: ContributorBreakdown,
    pub committees: Vec<CommitteeSummary>,
}

impl Analysis {
    /// Average number of transactions per distinct person, `None` without people.
    pub fn transactions_per_person(&self) -> Option<f64> {
        if self.contributors.total_people == 0 {
            None
        } else {
            Some(self.summary.count as f64 / self.contributors.total_people as f64)
        }
    }
}
