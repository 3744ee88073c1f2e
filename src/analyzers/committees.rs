use std::collections::HashMap;

use crate::analyzers::types::{CommitteeSummary, EnrichedTransaction, Party};

pub const DEFAULT_TOP_N: usize = 10;

/// Groups by (committee name, party) and returns the `top_n` groups by total
/// dollars. Groups with equal totals keep the order they were first seen in.
///
/// Blank amounts count as transactions but not toward max or mean.
pub fn top_committees(rows: &[EnrichedTransaction], top_n: usize) -> Vec<CommitteeSummary> {
    let mut index: HashMap<(&str, &Party), usize> = HashMap::new();
    let mut groups: Vec<CommitteeSummary> = Vec::new();
    let mut with_amount: Vec<usize> = Vec::new();

    for row in rows {
        let key = (row.committee_name.as_str(), &row.party);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(CommitteeSummary {
                committee_name: row.committee_name.clone(),
                party: row.party.clone(),
                count: 0,
                max_amount: None,
                mean_amount: None,
                total_amount: 0.0,
            });
            with_amount.push(0);
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.count += 1;
        if let Some(amount) = row.amount {
            with_amount[slot] += 1;
            group.total_amount += amount;
            group.max_amount = Some(group.max_amount.map_or(amount, |max| max.max(amount)));
        }
    }

    for (group, n) in groups.iter_mut().zip(&with_amount) {
        if *n > 0 {
            group.mean_amount = Some(group.total_amount / *n as f64);
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    groups.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    groups.truncate(top_n);
    groups
}
