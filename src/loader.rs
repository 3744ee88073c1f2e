//! CSV loaders for the transactions table and the two party lookups.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::{AllPacsRow, AristotleRow, PartyLookup, Transaction};

/// Deserializes every row of a headed CSV stream.
///
/// # Errors
///
/// Returns an error on the first row that does not fit `T`.
pub fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        let record: T = result.with_context(|| format!("malformed CSV row {}", line + 1))?;
        rows.push(record);
    }

    Ok(rows)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let rows = read_rows(file).with_context(|| format!("cannot read {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "CSV loaded");
    Ok(rows)
}

/// Loads the contribution records.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    read_file(path)
}

/// Loads the `AllPacs` table (`committee_id`, `Political Affiliation`).
pub fn load_allpacs(path: &Path) -> Result<PartyLookup> {
    let rows: Vec<AllPacsRow> = read_file(path)?;
    Ok(allpacs_lookup(rows))
}

/// Loads the `Aristotle` table (`Code`, `Party`).
pub fn load_aristotle(path: &Path) -> Result<PartyLookup> {
    let rows: Vec<AristotleRow> = read_file(path)?;
    Ok(aristotle_lookup(rows))
}

pub fn allpacs_lookup(rows: Vec<AllPacsRow>) -> PartyLookup {
    PartyLookup::from_pairs(
        rows.into_iter()
            .map(|r| (r.committee_id, r.political_affiliation)),
    )
}

pub fn aristotle_lookup(rows: Vec<AristotleRow>) -> PartyLookup {
    PartyLookup::from_pairs(rows.into_iter().map(|r| (r.code, r.party)))
}
