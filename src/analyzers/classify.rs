//! Person-level rollup and the majority-share party rule.
//!
//! Every distinct person key gets one label. A person is assigned to the
//! first party, in the order of [`THRESHOLD_ORDER`], whose share of the
//! person's total giving reaches the threshold (0.60 by default, inclusive).
//! A person with zero total giving, or whose giving is spread so that no
//! party reaches the threshold, is labeled [`Party::NoParty`].

use std::collections::BTreeMap;

use crate::analyzers::types::{EnrichedTransaction, Party, PersonClassification, PersonTotals};

pub const DEFAULT_THRESHOLD: f64 = 0.60;

/// Parties checked against the threshold, first match wins.
pub const THRESHOLD_ORDER: [Party; 5] = [
    Party::Democrat,
    Party::Republican,
    Party::Independent,
    Party::Libertarian,
    Party::Green,
];

/// Sums each person's giving per party bucket. Output is ordered by person key.
pub fn person_totals(rows: &[EnrichedTransaction]) -> Vec<PersonTotals> {
    let mut people: BTreeMap<&str, PersonTotals> = BTreeMap::new();

    for row in rows {
        people
            .entry(row.person_key.as_str())
            .or_insert_with(|| PersonTotals {
                person_key: row.person_key.clone(),
                ..Default::default()
            })
            .add(&row.party, row.dollars());
    }

    people.into_values().collect()
}

/// Label for one person's totals.
pub fn classify(totals: &PersonTotals, threshold: f64) -> Party {
    if totals.total == 0.0 {
        return Party::NoParty;
    }

    THRESHOLD_ORDER
        .iter()
        .find(|party| totals.bucket(party) / totals.total >= threshold)
        .cloned()
        .unwrap_or(Party::NoParty)
}

/// Rolls up `rows` per person and labels each one.
pub fn classify_people(rows: &[EnrichedTransaction], threshold: f64) -> Vec<PersonClassification> {
    person_totals(rows)
        .into_iter()
        .map(|totals| PersonClassification {
            label: classify(&totals, threshold),
            total: totals.total,
            person_key: totals.person_key,
        })
        .collect()
}
