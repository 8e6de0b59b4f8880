//! The run orchestrator: one pass over a date range, one report per day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use daybook_sources::activity::ActivityClient;
use daybook_sources::code::CodeClient;
use daybook_sources::nutrition::NutritionClient;
use daybook_sources::reading::ReadingClient;
use daybook_sources::{DailyRecord, SourceError};

use crate::config::Config;
use crate::error::{CollectError, CollectResult};
use crate::report::DailyReport;

/// The closed set of collectors. Each variant owns its client; dispatch is a
/// match, so there is no abstract base to misuse.
pub enum Source {
    Nutrition(NutritionClient),
    Activity(ActivityClient),
    Code(CodeClient),
    Reading(ReadingClient),
}

impl Source {
    /// The key this source's record is filed under in the report.
    pub fn name(&self) -> &'static str {
        match self {
            Source::Nutrition(_) => "nutrition",
            Source::Activity(_) => "activity",
            Source::Code(_) => "code",
            Source::Reading(_) => "reading",
        }
    }

    pub async fn collect(&self, day: NaiveDate) -> Result<DailyRecord, SourceError> {
        match self {
            Source::Nutrition(client) => client.collect(day).await,
            Source::Activity(client) => client.collect(day).await,
            Source::Code(client) => client.collect(day).await,
            Source::Reading(client) => client.collect(day).await,
        }
    }
}

/// Build the fixed, ordered collector list from configuration.
///
/// Nutrition runs first: the weight block and several goals read its record.
pub fn sources(config: &Config) -> Vec<Source> {
    vec![
        Source::Nutrition(
            NutritionClient::new(
                &config.nutrition.base_url,
                config.nutrition.username.clone(),
                config.nutrition.api_key.clone(),
            )
            .with_max_lookback(config.weight_lookback),
        ),
        Source::Activity(ActivityClient::new(
            &config.activity.base_url,
            config.activity.user_token.clone(),
        )),
        Source::Code(CodeClient::new(
            &config.code.base_url,
            config.code.login.clone(),
            config.code.token.clone(),
        )),
        Source::Reading(ReadingClient::new(
            &config.reading.base_url,
            config.reading.api_key.clone(),
            config.reading.book_id.clone(),
        )),
    ]
}

/// Collect one day end to end: every source in order, then assembly, then a
/// single write. Nothing is persisted if any step fails.
pub async fn run_day(config: &Config, sources: &[Source], day: NaiveDate) -> CollectResult<()> {
    let mut collections = BTreeMap::new();
    for source in sources {
        let record = source
            .collect(day)
            .await
            .map_err(|source_err| CollectError::Source {
                name: source.name(),
                source: source_err,
            })?;
        collections.insert(source.name().to_string(), record);
    }

    let report = DailyReport::assemble(config, day, collections)?;
    let path = report.write(&config.report_dir)?;
    tracing::info!("wrote report for {} to {}", day, path.display());
    Ok(())
}

/// Run every day in the inclusive range, oldest to newest, sequentially.
///
/// Each day is an independent unit of work: a failure is logged and skipped
/// without stopping the remaining days. Returns the days that were skipped.
pub async fn run_range(
    config: &Config,
    sources: &[Source],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    let mut skipped = Vec::new();
    let mut day = start;
    while day <= end {
        if let Err(err) = run_day(config, sources, day).await {
            tracing::error!("skipping {}: {}", day, err);
            skipped.push(day);
        }
        day = day + chrono::Duration::days(1);
    }
    skipped
}
