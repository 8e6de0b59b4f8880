//! Daily report assembly and persistence.
//!
//! A [`DailyReport`] is built fresh for each day from the collected records,
//! evaluated against the configured goals, and written once as pretty-printed
//! JSON named by the compact date (`YYYYMMDD.json`). Field order below is the
//! persisted key order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use daybook_sources::{DailyRecord, code};
use serde::Serialize;

use crate::config::Config;
use crate::error::{CollectError, CollectResult};
use crate::goal::{Goal, GoalKind, GoalOutcome};

#[derive(Debug, Serialize)]
pub struct WeightSummary {
    pub start: f64,
    pub goal: f64,
    pub current: f64,
    pub loss: f64,
}

#[derive(Debug, Serialize)]
pub struct DailyReport {
    pub date_long: String,
    pub date: String,
    pub weight: WeightSummary,
    pub collections: BTreeMap<String, DailyRecord>,
    pub goals: BTreeMap<String, GoalOutcome>,
}

/// Pull a numeric metric out of one source's record.
fn metric(
    collections: &BTreeMap<String, DailyRecord>,
    source: &'static str,
    name: &'static str,
) -> CollectResult<f64> {
    collections
        .get(source)
        .and_then(|record| record.get(name))
        .and_then(serde_json::Value::as_f64)
        .ok_or(CollectError::MissingMetric {
            source,
            metric: name,
        })
}

impl DailyReport {
    /// Assemble the day's report from the collected records and evaluate
    /// every configured goal against it.
    pub fn assemble(
        config: &Config,
        day: NaiveDate,
        collections: BTreeMap<String, DailyRecord>,
    ) -> CollectResult<Self> {
        let current_weight = metric(&collections, "nutrition", "weight")?;
        let calories_in = metric(&collections, "nutrition", "calories")?;
        let protein = metric(&collections, "nutrition", "protein")?;
        let calories_out = metric(&collections, "activity", "totalKilocalories")?;
        let steps = metric(&collections, "activity", "totalSteps")?;
        let sleep = metric(&collections, "activity", "sleepingSeconds")?;
        let commits = collections
            .get("code")
            .map(code::commit_count)
            .unwrap_or(0) as f64;

        let mut goals = BTreeMap::new();
        goals.insert(
            "deficit".into(),
            Goal::new(GoalKind::AtMost, calories_out, calories_in).report(),
        );
        goals.insert(
            "steps".into(),
            Goal::new(GoalKind::AtLeast, config.step_goal, steps).report(),
        );
        goals.insert(
            "sleep".into(),
            Goal::new(GoalKind::AtLeast, config.sleep_goal, sleep).report(),
        );
        goals.insert(
            "protein".into(),
            Goal::new(GoalKind::AtLeast, config.protein_goal, protein).report(),
        );
        goals.insert(
            "code".into(),
            Goal::new(GoalKind::AtLeast, config.commit_goal, commits).report(),
        );

        Ok(Self {
            date_long: day
                .and_hms_opt(0, 0, 0)
                .expect("midnight exists")
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            date: day.format("%Y%m%d").to_string(),
            weight: WeightSummary {
                start: config.weight_start,
                goal: config.weight_goal,
                current: current_weight,
                loss: config.weight_start - current_weight,
            },
            collections,
            goals,
        })
    }

    /// Write the report to `{dir}/{YYYYMMDD}.json` and return the path.
    pub fn write(&self, dir: &Path) -> CollectResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", self.date));
        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(path)
    }
}
