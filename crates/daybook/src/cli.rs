//! Command line surface: one command, a day or an inclusive range.

use chrono::{Local, NaiveDate};
use clap::Parser;

/// Daybook — collect data about yourself.
#[derive(Debug, Parser)]
#[command(name = "daybook")]
pub struct Cli {
    /// Single day to report on (YYYY-MM-DD). Defaults to today.
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub date: Option<NaiveDate>,

    /// First day of an inclusive range (YYYY-MM-DD).
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of an inclusive range (YYYY-MM-DD).
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,
}

impl Cli {
    /// Resolve the arguments to an inclusive `(start, end)` pair.
    pub fn range(&self) -> Result<(NaiveDate, NaiveDate), String> {
        match (self.date, self.start, self.end) {
            (Some(day), None, None) => Ok((day, day)),
            (None, Some(start), Some(end)) => {
                if start > end {
                    Err(format!("--start {start} is after --end {end}"))
                } else {
                    Ok((start, end))
                }
            }
            (None, None, None) => {
                let today = Local::now().date_naive();
                Ok((today, today))
            }
            // clap's `requires`/`conflicts_with_all` rules reject the rest.
            _ => Err("use either --date or --start/--end".into()),
        }
    }
}
