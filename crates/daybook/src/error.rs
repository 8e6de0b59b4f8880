//! Errors that abort one day's collection.

use std::fmt;

use daybook_sources::SourceError;

// Hand-written impls instead of `#[derive(thiserror::Error)]`: the
// `MissingMetric.source` field is a source *name*, not an error cause, and
// thiserror unconditionally treats any field named `source` as the cause.
#[derive(Debug)]
pub enum CollectError {
    Source {
        name: &'static str,
        source: SourceError,
    },

    MissingMetric {
        source: &'static str,
        metric: &'static str,
    },

    Io(std::io::Error),

    Serialization(serde_json::Error),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source { name, source } => write!(f, "{name}: {source}"),
            Self::MissingMetric { source, metric } => {
                write!(f, "{source} record has no numeric metric `{metric}`")
            }
            Self::Io(err) => write!(f, "failed to write report: {err}"),
            Self::Serialization(err) => write!(f, "failed to serialize report: {err}"),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source { source, .. } => Some(source),
            Self::MissingMetric { .. } => None,
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CollectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

pub type CollectResult<T> = Result<T, CollectError>;
