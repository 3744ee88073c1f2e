use fec_party_rater::analyzers::analyzer::analyze;
use fec_party_rater::analyzers::types::Party;
use fec_party_rater::config::AnalysisConfig;
use fec_party_rater::report::render;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn config() -> AnalysisConfig {
    AnalysisConfig {
        allpacs: fixture("AllPacs.xslx.csv"),
        aristotle: fixture("Aristotle1.xlsx.csv"),
        ..AnalysisConfig::new(fixture("AcmeFECr.csv"))
    }
}

#[test]
fn test_full_pipeline() {
    let analysis = analyze(&config()).expect("Failed to analyze fixtures");

    assert_eq!(analysis.company, "ACME");

    let s = &analysis.summary;
    assert_eq!(s.count, 10);
    assert_eq!(s.max_amount, Some(200.0));
    assert!((s.total_amount - 525.0).abs() < 1e-9);
    assert!((s.democrat_amount - 311.0).abs() < 1e-9);
    assert!((s.republican_amount - 89.0).abs() < 1e-9);
    assert!((s.other_amount - 125.0).abs() < 1e-9);
    assert_eq!(s.first_date.map(|d| d.to_string()), Some("2019-01-02".to_string()));
    assert_eq!(s.last_date.map(|d| d.to_string()), Some("2020-11-30".to_string()));
}

#[test]
fn test_person_breakdown() {
    let analysis = analyze(&config()).unwrap();
    let c = &analysis.contributors;

    assert_eq!(c.total_people, 6);
    let counted: usize = c.rows.iter().map(|r| r.people).sum();
    assert_eq!(counted, 6);

    let labels: Vec<(&str, usize)> = c.rows.iter().map(|r| (r.label.code(), r.people)).collect();
    assert_eq!(labels, vec![("N", 3), ("D", 2), ("L", 1)]);

    // SMITH (70 D / 30 R / 0) and PARK (200 via the primary lookup)
    assert_eq!(c.get(&Party::Democrat).map(|r| r.dollars), Some(300.0));
}

#[test]
fn test_primary_lookup_wins_and_blank_falls_back() {
    let analysis = analyze(&config()).unwrap();

    let conflict = analysis
        .committees
        .iter()
        .find(|c| c.committee_name == "CONFLICT PAC")
        .unwrap();
    assert_eq!(conflict.party, Party::Democrat);

    let blank = analysis
        .committees
        .iter()
        .find(|c| c.committee_name == "BLANK PAC")
        .unwrap();
    assert_eq!(blank.party, Party::Green);

    let weird = analysis
        .committees
        .iter()
        .find(|c| c.committee_name == "WEIRD PAC")
        .unwrap();
    assert_eq!(weird.party, Party::Other("X".into()));
}

#[test]
fn test_committee_ranking() {
    let analysis = analyze(&config()).unwrap();

    let names: Vec<&str> = analysis
        .committees
        .iter()
        .map(|c| c.committee_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "CONFLICT PAC",
            "ACTBLUE",
            "LIBERTY PAC",
            "WINRED",
            "BLANK PAC",
            "UNKNOWN PAC",
            "WEIRD PAC"
        ]
    );
}

#[test]
fn test_top_n_limits_committees() {
    let config = AnalysisConfig {
        top_n: 3,
        ..config()
    };

    let analysis = analyze(&config).unwrap();

    assert_eq!(analysis.committees.len(), 3);
}

#[test]
fn test_report_mentions_company_and_counts() {
    let analysis = analyze(&config()).unwrap();
    let text = render(&analysis);

    assert!(text.contains("Company:                ACME"));
    assert!(text.contains("Unique contributors:    6"));
    assert!(text.contains("Total:              $525.00"));
}

#[test]
fn test_missing_lookup_is_fatal() {
    let config = AnalysisConfig {
        aristotle: fixture("does_not_exist.csv"),
        ..config()
    };

    let err = analyze(&config).unwrap_err();

    assert!(err.to_string().contains("does_not_exist.csv"));
}
