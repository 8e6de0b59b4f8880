//! Client for the nutrition/weight tracking service.
//!
//! Produces a flat record: the day's diary totals (`calories`, `protein`, ...)
//! merged with the most recent `weight` measurement at or before the day.

use chrono::{Duration, NaiveDate};
use secrecy::{ExposeSecret, SecretString};

use crate::{DailyRecord, SourceError, execute_json};

/// Default cap on how many days the weight lookup walks backward.
pub const DEFAULT_WEIGHT_LOOKBACK: u32 = 30;

#[derive(Clone, Debug)]
pub struct NutritionClient {
    base_url: String,
    username: String,
    api_key: SecretString,
    max_lookback: u32,
    client: reqwest::Client,
}

#[derive(serde::Deserialize)]
struct DiaryPayload {
    totals: DailyRecord,
}

#[derive(serde::Deserialize)]
struct MeasurementPayload {
    value: f64,
}

impl NutritionClient {
    pub fn new(base_url: &str, username: impl Into<String>, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.into(),
            api_key,
            max_lookback: DEFAULT_WEIGHT_LOOKBACK,
            client,
        }
    }

    /// Override the backward-search cap for the weight lookup.
    pub fn with_max_lookback(mut self, days: u32) -> Self {
        self.max_lookback = days;
        self
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.username, Some(self.api_key.expose_secret()))
    }

    /// Collect the diary totals and current weight for `day`.
    pub async fn collect(&self, day: NaiveDate) -> Result<DailyRecord, SourceError> {
        let url = format!("{}/api/v2/diary/{}", self.base_url, day.format("%Y-%m-%d"));
        let diary: DiaryPayload = execute_json(self.get_request(&url)).await?;

        let mut record = diary.totals;
        let weight = self.latest_weight(day).await?;
        record.insert("weight".into(), weight.into());
        Ok(record)
    }

    /// Find the most recent weight measurement at or before `day`.
    ///
    /// The service answers 404 for days without a logged measurement, so walk
    /// backward one day at a time, bounded by `max_lookback`.
    async fn latest_weight(&self, day: NaiveDate) -> Result<f64, SourceError> {
        let mut probe = day;
        for _ in 0..=self.max_lookback {
            let url = format!(
                "{}/api/v2/measurements/weight/{}",
                self.base_url,
                probe.format("%Y-%m-%d")
            );
            let resp = self.get_request(&url).send().await?;
            if resp.status().as_u16() == 404 {
                let _ = resp.text().await;
                probe = probe - Duration::days(1);
                continue;
            }
            if !resp.status().is_success() {
                return Err(SourceError::from_response(resp).await);
            }
            let payload: MeasurementPayload = resp.json().await?;
            tracing::debug!("weight measurement found on {}", probe);
            return Ok(payload.value);
        }
        Err(SourceError::NotFoundInRange(format!(
            "no weight measurement within {} days before {}",
            self.max_lookback, day
        )))
    }
}
