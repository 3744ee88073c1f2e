use anyhow::Result;
use tracing::info;

use crate::analyzers::classify::classify_people;
use crate::analyzers::committees::top_committees;
use crate::analyzers::contributors::breakdown;
use crate::analyzers::enrich::enrich;
use crate::analyzers::transactions::summarize;
use crate::analyzers::types::{Analysis, PartyLookup, Transaction};
use crate::config::AnalysisConfig;
use crate::loader::{load_allpacs, load_aristotle, load_transactions};

/// Loads the three input tables named in `config` and runs the pipeline.
///
/// Any missing or unreadable input aborts the run.
#[tracing::instrument(skip(config), fields(transactions = %config.transactions.display(), company = %config.company))]
pub fn analyze(config: &AnalysisConfig) -> Result<Analysis> {
    let transactions = load_transactions(&config.transactions)?;
    let allpacs = load_allpacs(&config.allpacs)?;
    let aristotle = load_aristotle(&config.aristotle)?;

    info!(
        rows = transactions.len(),
        allpacs = allpacs.len(),
        aristotle = aristotle.len(),
        "Inputs loaded"
    );

    Ok(analyze_tables(config, &transactions, &[&allpacs, &aristotle]))
}

/// Runs join → summary → person rollup → contributor breakdown → committee
/// ranking over tables already in memory. `lookups` are in priority order.
pub fn analyze_tables(
    config: &AnalysisConfig,
    transactions: &[Transaction],
    lookups: &[&PartyLookup],
) -> Analysis {
    let enriched = enrich(transactions, lookups, &config.company);
    let summary = summarize(&enriched);

    let people = classify_people(&enriched, config.threshold);
    let contributors = breakdown(&people);
    let committees = top_committees(&enriched, config.top_n);

    info!(
        transactions = summary.count,
        people = contributors.total_people,
        committees = committees.len(),
        "Analysis complete"
    );

    Analysis {
        company: config.company.clone(),
        source: config.transactions.display().to_string(),
        threshold: config.threshold,
        top_n: config.top_n,
        summary,
        contributors,
        committees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Party;

    fn tx(committee_id: &str, last: &str, zip: &str, amount: f64) -> Transaction {
        Transaction {
            committee_id: committee_id.into(),
            committee_name: format!("{committee_id} PAC"),
            last_name: last.into(),
            zip: zip.into(),
            amount: Some(amount),
            date: String::new(),
        }
    }

    #[test]
    fn test_one_person_end_to_end() {
        let config = AnalysisConfig::new("AcmeFEC.csv");
        let allpacs = PartyLookup::from_pairs(vec![("CD", Some("D"))]);
        let aristotle = PartyLookup::from_pairs(vec![("CR", Some("R"))]);
        let rows = vec![
            tx("CD", "Smith", "37027", 70.0),
            tx("CR", "smith", "37027-9999", 30.0),
            tx("CX", "SMITH ", "37027", 0.0),
        ];

        let analysis = analyze_tables(&config, &rows, &[&allpacs, &aristotle]);

        assert_eq!(analysis.company, "ACME");
        assert_eq!(analysis.summary.count, 3);
        assert_eq!(analysis.contributors.total_people, 1);
        assert_eq!(analysis.contributors.total_dollars, 100.0);
        let dem = analysis.contributors.get(&Party::Democrat).unwrap();
        assert_eq!(dem.people, 1);
        assert_eq!(dem.pct, 100.0);
        assert_eq!(dem.dollars, 100.0);
        assert_eq!(analysis.transactions_per_person(), Some(3.0));
    }

    #[test]
    fn test_empty_input_has_no_people() {
        let config = AnalysisConfig::new("AcmeFEC.csv");
        let lookup = PartyLookup::default();

        let analysis = analyze_tables(&config, &[], &[&lookup]);

        assert_eq!(analysis.summary.count, 0);
        assert!(analysis.contributors.rows.is_empty());
        assert!(analysis.committees.is_empty());
        assert_eq!(analysis.transactions_per_person(), None);
    }

    #[test]
    fn test_blank_amount_row_is_counted_only() {
        let config = AnalysisConfig::new("AcmeFEC.csv");
        let allpacs = PartyLookup::from_pairs(vec![("CD", Some("D"))]);
        let mut blank = tx("CD", "Smith", "37027", 0.0);
        blank.amount = None;
        let rows = vec![tx("CD", "Smith", "37027", 100.0), blank];

        let analysis = analyze_tables(&config, &rows, &[&allpacs]);

        assert_eq!(analysis.summary.count, 2);
        assert_eq!(analysis.summary.mean_amount, Some(100.0));
        assert_eq!(analysis.summary.max_amount, Some(100.0));
        assert_eq!(analysis.committees[0].count, 2);
        assert_eq!(analysis.committees[0].mean_amount, Some(100.0));
        assert_eq!(analysis.contributors.total_dollars, 100.0);
        assert_eq!(analysis.top_n, config.top_n);
    }
}
