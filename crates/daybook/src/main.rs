use clap::Parser;

use daybook::cli::Cli;
use daybook::config::Config;
use daybook::run;

/// Exit codes: 0 all days written, 1 at least one day skipped,
/// 2 configuration or usage error.
const EXIT_PARTIAL: i32 = 1;
const EXIT_CONFIG: i32 = 2;

#[tokio::main]
async fn main() {
    // Configure logging from `DAYBOOK_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("DAYBOOK_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();
    let (start, end) = match cli.range() {
        Ok(range) => range,
        Err(msg) => {
            tracing::error!("daybook: {msg}");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("daybook: {err}");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let sources = run::sources(&config);
    tracing::info!("daybook: collecting {} through {}", start, end);

    let skipped = run::run_range(&config, &sources, start, end).await;
    if !skipped.is_empty() {
        tracing::warn!("daybook: {} day(s) skipped", skipped.len());
        std::process::exit(EXIT_PARTIAL);
    }
}
