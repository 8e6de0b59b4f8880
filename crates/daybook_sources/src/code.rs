//! Client for the source-control hosting service.
//!
//! Enumerates the authenticated user's repositories and groups the day's
//! commits under each repository's full name.

use chrono::{Duration, NaiveDate};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::{DailyRecord, SourceError, execute_json};

#[derive(Clone, Debug)]
pub struct CodeClient {
    base_url: String,
    login: String,
    token: SecretString,
    client: reqwest::Client,
}

#[derive(serde::Deserialize)]
struct Repo {
    full_name: String,
}

#[derive(serde::Deserialize)]
struct Commit {
    sha: String,
    commit: CommitDetail,
}

#[derive(serde::Deserialize)]
struct CommitDetail {
    author: CommitAuthor,
}

#[derive(serde::Deserialize)]
struct CommitAuthor {
    date: chrono::DateTime<chrono::Utc>,
}

impl CodeClient {
    pub fn new(base_url: &str, login: impl Into<String>, token: SecretString) -> Self {
        // The hosting API rejects requests without a User-Agent.
        let client = reqwest::Client::builder()
            .user_agent("daybook")
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            login: login.into(),
            token,
            client,
        }
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url).bearer_auth(self.token.expose_secret())
    }

    /// Collect commits authored by the user within `[day, day+1)`, grouped by
    /// repository full name. Repositories with no in-window commits are
    /// omitted from the record.
    pub async fn collect(&self, day: NaiveDate) -> Result<DailyRecord, SourceError> {
        let window_start = day.and_hms_opt(0, 0, 0).expect("midnight exists").and_utc();
        let window_end = window_start + Duration::days(1);

        let repos_url = format!("{}/user/repos", self.base_url);
        let repos: Vec<Repo> = execute_json(self.get_request(&repos_url)).await?;

        let mut record = DailyRecord::new();
        for repo in repos {
            let url = format!("{}/repos/{}/commits", self.base_url, repo.full_name);
            let request = self.get_request(&url).query(&[
                ("author", self.login.as_str()),
                ("since", &window_start.to_rfc3339()),
                ("until", &window_end.to_rfc3339()),
            ]);

            let resp = request.send().await?;
            // An empty (bare) repository answers 409; skip it rather than
            // failing the whole collection.
            if resp.status().as_u16() == 409 {
                let _ = resp.text().await;
                tracing::warn!("skipping empty repository {}", repo.full_name);
                continue;
            }
            if !resp.status().is_success() {
                return Err(SourceError::from_response(resp).await);
            }
            let commits: Vec<Commit> = resp.json().await?;

            // Re-check the window client-side; upstream treats `until` as
            // inclusive.
            let entries: Vec<serde_json::Value> = commits
                .into_iter()
                .filter(|c| {
                    c.commit.author.date >= window_start && c.commit.author.date < window_end
                })
                .map(|c| {
                    json!({
                        "sha": c.sha.chars().take(7).collect::<String>(),
                        "authored_at": c.commit.author.date.to_rfc3339(),
                    })
                })
                .collect();

            if !entries.is_empty() {
                record.insert(repo.full_name, entries.into());
            }
        }
        Ok(record)
    }
}

/// Total commits across all repositories in a code record.
pub fn commit_count(record: &DailyRecord) -> u64 {
    record
        .values()
        .filter_map(|v| v.as_array())
        .map(|a| a.len() as u64)
        .sum()
}
