//! Trait and types for a paged source of contribution records.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// One flattened Schedule A receipt, the row format of the fetched CSV.
///
/// Column names match what the analysis loader reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub committee_id: String,
    pub committee_name: String,
    pub contributor_name: String,
    pub contributor_last_name: String,
    pub contributor_state: String,
    pub contributor_zip: String,
    pub contributor_employer: String,
    pub contributor_occupation: String,
    pub contribution_receipt_amount: Option<f64>,
    pub contribution_receipt_date: String,
}

impl ContributionRecord {
    /// Flattens one entry of the API `results` array. The committee name is
    /// read from the nested `committee.name` object when present.
    pub fn from_json(item: &Value) -> Self {
        let committee_name = item["committee"]["name"]
            .as_str()
            .or_else(|| item["committee_name"].as_str())
            .unwrap_or("")
            .to_string();

        Self {
            committee_id: text(&item["committee_id"]),
            committee_name,
            contributor_name: text(&item["contributor_name"]),
            contributor_last_name: text(&item["contributor_last_name"]),
            contributor_state: text(&item["contributor_state"]),
            contributor_zip: text(&item["contributor_zip"]),
            contributor_employer: text(&item["contributor_employer"]),
            contributor_occupation: text(&item["contributor_occupation"]),
            contribution_receipt_amount: item["contribution_receipt_amount"].as_f64(),
            contribution_receipt_date: text(&item["contribution_receipt_date"]),
        }
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// One page of results plus what the API reported about the whole result set.
#[derive(Debug, Default)]
pub struct Page {
    pub records: Vec<ContributionRecord>,
    pub total_count: Option<u64>,
    pub total_pages: Option<u32>,
}

/// Abstraction over a paged contribution API (e.g., OpenFEC Schedule A).
#[async_trait::async_trait]
pub trait ContributionsApi {
    /// Fetches page `page`, 1-based.
    async fn fetch_page(&self, page: u32) -> Result<Page>;
}

/// Requests pages 1..=`max_pages` one after another.
///
/// Stops early on an empty page or once the API's last page is reached. An
/// error on any page aborts the whole fetch.
pub async fn fetch_pages<A>(api: &A, max_pages: u32) -> Result<Vec<ContributionRecord>>
where
    A: ContributionsApi + Sync + ?Sized,
{
    let mut records = Vec::new();

    for page in 1..=max_pages {
        let result = api
            .fetch_page(page)
            .await
            .with_context(|| format!("error fetching page {page}"))?;

        info!(
            page,
            records = result.records.len(),
            total_available = ?result.total_count,
            "Page fetched"
        );

        let empty = result.records.is_empty();
        records.extend(result.records);

        if empty || result.total_pages.is_some_and(|last| page >= last) {
            break;
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeApi {
        pages: Vec<Result<usize, String>>,
        total_pages: Option<u32>,
        calls: Mutex<Vec<u32>>,
    }

    #[async_trait::async_trait]
    impl ContributionsApi for FakeApi {
        async fn fetch_page(&self, page: u32) -> Result<Page> {
            self.calls.lock().unwrap().push(page);
            match &self.pages[(page - 1) as usize] {
                Ok(n) => Ok(Page {
                    records: vec![ContributionRecord::default(); *n],
                    total_count: None,
                    total_pages: self.total_pages,
                }),
                Err(msg) => Err(anyhow::anyhow!(msg.clone())),
            }
        }
    }

    fn fake(pages: Vec<Result<usize, String>>, total_pages: Option<u32>) -> FakeApi {
        FakeApi {
            pages,
            total_pages,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_from_json_flattens_committee() {
        let item = json!({
            "committee_id": "C00694323",
            "committee": {"name": "WINRED", "party": "REP"},
            "contributor_name": "SMITH, JOHN",
            "contributor_last_name": "SMITH",
            "contributor_state": "TN",
            "contributor_zip": "370271234",
            "contributor_employer": "TRACTOR SUPPLY",
            "contributor_occupation": "MANAGER",
            "contribution_receipt_amount": 25.5,
            "contribution_receipt_date": "2020-10-15T00:00:00"
        });

        let record = ContributionRecord::from_json(&item);

        assert_eq!(record.committee_name, "WINRED");
        assert_eq!(record.contributor_zip, "370271234");
        assert_eq!(record.contribution_receipt_amount, Some(25.5));
    }

    #[test]
    fn test_from_json_tolerates_nulls() {
        let item = json!({
            "committee_id": "C1",
            "committee_name": "FLAT NAME",
            "contributor_zip": 37027,
            "contribution_receipt_amount": null,
            "contributor_last_name": null
        });

        let record = ContributionRecord::from_json(&item);

        assert_eq!(record.committee_name, "FLAT NAME");
        assert_eq!(record.contributor_zip, "37027");
        assert_eq!(record.contributor_last_name, "");
        assert_eq!(record.contribution_receipt_amount, None);
    }

    #[tokio::test]
    async fn test_fetch_pages_in_order() {
        let api = fake(vec![Ok(2), Ok(2), Ok(2)], None);

        let records = fetch_pages(&api, 2).await.unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(*api.calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_pages_stops_on_empty_page() {
        let api = fake(vec![Ok(3), Ok(0), Ok(3)], None);

        let records = fetch_pages(&api, 3).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(*api.calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_pages_stops_at_last_page() {
        let api = fake(vec![Ok(3), Ok(3), Ok(3)], Some(1));

        fetch_pages(&api, 3).await.unwrap();

        assert_eq!(*api.calls.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_fetch_pages_error_aborts() {
        let api = fake(vec![Ok(3), Err("boom".into()), Ok(3)], None);

        let err = fetch_pages(&api, 3).await.unwrap_err();

        assert!(err.to_string().contains("page 2"));
        assert_eq!(*api.calls.lock().unwrap(), vec![1, 2]);
    }
}
