//! Joins transactions against the party lookups and derives person identities.

use crate::analyzers::types::{EnrichedTransaction, Party, PartyLookup, Transaction};

/// Enriches every transaction. Lookups are consulted in priority order; a
/// transaction no lookup knows about is kept with [`Party::NoParty`].
pub fn enrich(
    transactions: &[Transaction],
    lookups: &[&PartyLookup],
    company: &str,
) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .map(|tx| {
            let last_name = tx.last_name.trim().to_uppercase();
            let zip5 = normalize_zip(&tx.zip);
            EnrichedTransaction {
                committee_id: tx.committee_id.clone(),
                committee_name: tx.committee_name.clone(),
                party: resolve_party(&tx.committee_id, lookups),
                company: company.to_string(),
                person_key: person_key(company, &last_name, &zip5),
                last_name,
                zip5,
                amount: tx.amount,
                date: tx.receipt_date(),
            }
        })
        .collect()
}

/// First lookup that knows `committee_id` wins.
pub fn resolve_party(committee_id: &str, lookups: &[&PartyLookup]) -> Party {
    lookups
        .iter()
        .find_map(|lookup| lookup.get(committee_id))
        .cloned()
        .unwrap_or(Party::NoParty)
}

/// Keeps digits only and truncates to five. Short results are not padded.
pub fn normalize_zip(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(5).collect()
}

/// `"<company> - <LAST> - <zip5>"`; `last_name` is expected already trimmed and uppercased.
pub fn person_key(company: &str, last_name: &str, zip5: &str) -> String {
    format!("{company} - {last_name} - {zip5}")
}
