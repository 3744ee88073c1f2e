mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;

/// GETs `url` with `query` appended and decodes the JSON body.
///
/// # Errors
///
/// Fails on transport errors, on any non-success status (the body is
/// included in the message) and on a body that is not valid JSON for `T`.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    let mut url: reqwest::Url = url.parse().with_context(|| format!("invalid URL {url}"))?;
    url.query_pairs_mut()
        .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));

    let mut req = reqwest::Request::new(reqwest::Method::GET, url);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let response = client
        .execute(req)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send request: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("API returned status {}: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to parse response: {}", e))
}
