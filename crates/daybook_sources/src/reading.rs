//! Client for the reading-tracker service.
//!
//! A demo integration: it reports the status of one fixed book and ignores
//! the requested day.

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

use crate::{DailyRecord, SourceError, execute_json};

#[derive(Clone, Debug)]
pub struct ReadingClient {
    base_url: String,
    api_key: SecretString,
    book_id: String,
    client: reqwest::Client,
}

impl ReadingClient {
    pub fn new(base_url: &str, api_key: SecretString, book_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            book_id: book_id.into(),
            client,
        }
    }

    /// Fetch the tracked book's status, passed through unshaped.
    pub async fn collect(&self, _day: NaiveDate) -> Result<DailyRecord, SourceError> {
        let url = format!("{}/api/book/{}", self.base_url, self.book_id);
        let request = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.expose_secret())]);
        execute_json(request).await
    }
}
