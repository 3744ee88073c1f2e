use crate::analyzers::types::{EnrichedTransaction, Party, TransactionSummary};
use crate::analyzers::utility::{mean, pct};

/// Summarizes the enriched table: count, max, mean, total and the
/// Democrat / Republican / everything-else split.
///
/// Rows with a blank amount are counted but skipped by max and mean.
pub fn summarize(rows: &[EnrichedTransaction]) -> TransactionSummary {
    let present: Vec<f64> = rows.iter().filter_map(|r| r.amount).collect();

    let mut summary = TransactionSummary {
        count: rows.len(),
        max_amount: present.iter().copied().reduce(f64::max),
        mean_amount: mean(&present),
        total_amount: present.iter().sum(),
        ..Default::default()
    };

    for row in rows {
        match row.party {
            Party::Democrat => summary.democrat_amount += row.dollars(),
            Party::Republican => summary.republican_amount += row.dollars(),
            _ => summary.other_amount += row.dollars(),
        }
    }

    let mut dates = rows.iter().filter_map(|r| r.date);
    if let Some(first) = dates.next() {
        let (lo, hi) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        summary.first_date = Some(lo);
        summary.last_date = Some(hi);
    }

    summary
}

impl TransactionSummary {
    pub fn democrat_pct(&self) -> f64 {
        pct(self.democrat_amount, self.total_amount)
    }

    pub fn republican_pct(&self) -> f64 {
        pct(self.republican_amount, self.total_amount)
    }

    pub fn other_pct(&self) -> f64 {
        pct(self.other_amount, self.total_amount)
    }
}
