//! Process configuration: goal targets, credentials, and output location.
//!
//! Everything is read once at startup into an immutable [`Config`] that is
//! passed by reference from then on; nothing reads the environment afterwards.

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(pub String);

#[derive(Clone, Debug)]
pub struct NutritionConfig {
    pub base_url: String,
    pub username: String,
    pub api_key: SecretString,
}

#[derive(Clone, Debug)]
pub struct ActivityConfig {
    pub base_url: String,
    pub user_token: SecretString,
}

#[derive(Clone, Debug)]
pub struct CodeConfig {
    pub base_url: String,
    pub login: String,
    pub token: SecretString,
}

#[derive(Clone, Debug)]
pub struct ReadingConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub book_id: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub weight_start: f64,
    pub weight_goal: f64,
    pub step_goal: f64,
    pub sleep_goal: f64,
    pub protein_goal: f64,
    pub commit_goal: f64,
    pub report_dir: PathBuf,
    pub weight_lookback: u32,
    pub nutrition: NutritionConfig,
    pub activity: ActivityConfig,
    pub code: CodeConfig,
    pub reading: ReadingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never mutate the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let required = |get: &mut F, key: &str| {
            get(key).ok_or_else(|| ConfigError(format!("{key} missing")))
        };
        let number = |get: &mut F, key: &str, default: f64| match get(key) {
            None => Ok(default),
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| ConfigError(format!("{key} is not a number: {raw}"))),
        };

        let weight_start = required(&mut get, "DAYBOOK_WEIGHT_START")?
            .parse::<f64>()
            .map_err(|_| ConfigError("DAYBOOK_WEIGHT_START is not a number".into()))?;
        let weight_goal = required(&mut get, "DAYBOOK_WEIGHT_GOAL")?
            .parse::<f64>()
            .map_err(|_| ConfigError("DAYBOOK_WEIGHT_GOAL is not a number".into()))?;

        let step_goal = number(&mut get, "DAYBOOK_STEP_GOAL", 10_000.0)?;
        let sleep_goal = number(&mut get, "DAYBOOK_SLEEP_GOAL", 25_200.0)?;
        let protein_goal = number(&mut get, "DAYBOOK_PROTEIN_GOAL", 150.0)?;
        let commit_goal = number(&mut get, "DAYBOOK_COMMIT_GOAL", 1.0)?;

        let report_dir = PathBuf::from(get("DAYBOOK_REPORT_DIR").unwrap_or_else(|| ".".into()));
        let weight_lookback = match get("DAYBOOK_WEIGHT_LOOKBACK") {
            None => daybook_sources::nutrition::DEFAULT_WEIGHT_LOOKBACK,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| ConfigError(format!("DAYBOOK_WEIGHT_LOOKBACK is not a number: {raw}")))?,
        };

        let nutrition = NutritionConfig {
            base_url: get("DAYBOOK_NUTRITION_URL")
                .unwrap_or_else(|| "https://api.myfitnesspal.com".into()),
            username: required(&mut get, "DAYBOOK_NUTRITION_USER")?,
            api_key: SecretString::new(required(&mut get, "DAYBOOK_NUTRITION_KEY")?.into()),
        };
        let activity = ActivityConfig {
            base_url: get("DAYBOOK_ACTIVITY_URL")
                .unwrap_or_else(|| "https://connect.garmin.com/modern/proxy".into()),
            user_token: SecretString::new(required(&mut get, "DAYBOOK_ACTIVITY_TOKEN")?.into()),
        };
        let code = CodeConfig {
            base_url: get("DAYBOOK_CODE_URL").unwrap_or_else(|| "https://api.github.com".into()),
            login: required(&mut get, "DAYBOOK_CODE_LOGIN")?,
            token: SecretString::new(required(&mut get, "DAYBOOK_CODE_TOKEN")?.into()),
        };
        let reading = ReadingConfig {
            base_url: get("DAYBOOK_READING_URL")
                .unwrap_or_else(|| "https://www.goodreads.com".into()),
            api_key: SecretString::new(required(&mut get, "DAYBOOK_READING_KEY")?.into()),
            book_id: get("DAYBOOK_READING_BOOK").unwrap_or_else(|| "13496".into()),
        };

        Ok(Self {
            weight_start,
            weight_goal,
            step_goal,
            sleep_goal,
            protein_goal,
            commit_goal,
            report_dir,
            weight_lookback,
            nutrition,
            activity,
            code,
            reading,
        })
    }
}
