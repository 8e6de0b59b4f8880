//! HTTP clients for the upstream personal-data services daybook collects from.
//!
//! Each client turns one service's response for a calendar day into a
//! [`DailyRecord`], an open-ended metric-name to value mapping. Clients are
//! constructed with an explicit base URL so tests can point them at a mock
//! server.

use thiserror::Error;

pub mod activity;
pub mod code;
pub mod nutrition;
pub mod reading;

/// One source's metrics for one day: metric name to numeric or textual value.
///
/// Backed by `serde_json::Map`, which keeps keys in sorted order, so the
/// persisted report is byte-stable across runs.
pub type DailyRecord = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("upstream returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("not found within search range: {0}")]
    NotFoundInRange(String),
}

impl SourceError {
    /// Map a failed response to an error, keeping a short body snippet.
    pub(crate) async fn from_response(resp: reqwest::Response) -> Self {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        match status {
            401 | 403 => SourceError::Auth(body_snippet),
            _ => SourceError::Api {
                status,
                body: body_snippet,
            },
        }
    }
}

/// Execute a request and deserialize a JSON response body.
pub(crate) async fn execute_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, SourceError> {
    let resp = request.send().await?;
    if !resp.status().is_success() {
        return Err(SourceError::from_response(resp).await);
    }
    Ok(resp.json::<T>().await?)
}
