mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Issues a GET and decodes the JSON body.
///
/// Non-success statuses become errors carrying the status and response body.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: &str) -> Result<T> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid url '{url}'"))?,
    );

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("request to {url} failed"))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("GET {url} failed with status {status}: {body}"));
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).with_context(|| format!("invalid JSON from {url}"))
}
