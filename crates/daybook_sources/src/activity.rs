//! Client for the fitness-wearable platform's daily summary endpoint.

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

use crate::{DailyRecord, SourceError, execute_json};

#[derive(Clone, Debug)]
pub struct ActivityClient {
    base_url: String,
    user_token: SecretString,
    client: reqwest::Client,
}

impl ActivityClient {
    pub fn new(base_url: &str, user_token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_token,
            client,
        }
    }

    /// Fetch the daily summary (steps, calories burned, sleep) for `day`.
    ///
    /// The upstream schema is passed through unshaped; callers pick out the
    /// metrics they need (`totalKilocalories`, `totalSteps`,
    /// `sleepingSeconds`).
    pub async fn collect(&self, day: NaiveDate) -> Result<DailyRecord, SourceError> {
        let url = format!(
            "{}/usersummary-service/usersummary/daily/{}",
            self.base_url,
            self.user_token.expose_secret()
        );
        // The service caches aggressively; a throwaway query parameter keyed
        // off the clock busts it, as the web frontend does.
        let cache_buster = chrono::Utc::now().timestamp_millis();
        let request = self.client.get(&url).query(&[
            ("calendarDate", day.format("%Y-%m-%d").to_string()),
            ("_", cache_buster.to_string()),
        ]);
        execute_json(request).await
    }
}
