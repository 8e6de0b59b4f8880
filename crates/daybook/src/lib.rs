//! Daybook: a personal quantified-self aggregator.
//!
//! Collects one day's data from a fixed set of upstream services, evaluates
//! numeric goals against it, and persists a single JSON report per day.

pub mod cli;
pub mod config;
pub mod error;
pub mod goal;
pub mod report;
pub mod run;
