use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::FetchConfig;
use crate::fetch::{HttpClient, fetch_json};
use crate::services::contributions_api::{ContributionRecord, ContributionsApi, Page};

#[derive(Deserialize)]
struct ScheduleAResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Deserialize)]
struct Pagination {
    count: Option<u64>,
    pages: Option<u32>,
}

/// Schedule A (itemized receipts) client for the OpenFEC API.
///
/// Authentication is the wrapped client's business; see
/// [`ApiKey`](crate::fetch::auth::ApiKey) and
/// [`UrlParam`](crate::fetch::auth::UrlParam).
pub struct OpenFecClient<C> {
    http: C,
    base_url: String,
    query: Vec<(&'static str, String)>,
}

impl<C: HttpClient> OpenFecClient<C> {
    pub fn new(http: C, config: &FetchConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query: config.query_pairs(),
        }
    }

    fn schedule_a_url(&self) -> String {
        format!("{}/schedules/schedule_a/", self.base_url)
    }
}

#[async_trait]
impl<C: HttpClient> ContributionsApi for OpenFecClient<C> {
    async fn fetch_page(&self, page: u32) -> Result<Page> {
        let url = self.schedule_a_url();
        let mut query = self.query.clone();
        query.push(("page", page.to_string()));

        debug!(url = %url, page, "Calling OpenFEC");
        let body: ScheduleAResponse = fetch_json(&self.http, &url, &query).await?;

        let records = body.results.iter().map(ContributionRecord::from_json).collect();
        let (total_count, total_pages) = body
            .pagination
            .map(|p| (p.count, p.pages))
            .unwrap_or((None, None));

        Ok(Page {
            records,
            total_count,
            total_pages,
        })
    }
}
