use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GtdError {
    #[error("error reading input: {0}")]
    InvalidInput(String),

    #[error("error reading date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("task num not recognised: '{0}'")]
    InvalidId(String),

    #[error("id must not be negative: {0}")]
    NegativeId(i64),

    #[error("task {0} not found")]
    TaskNotFound(i64),

    #[error("invalid command '{0}'")]
    UnknownCommand(String),

    #[error("task file unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GtdError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidId(_) => "invalid_id",
            Self::NegativeId(_) => "negative_id",
            Self::TaskNotFound(_) => "task_not_found",
            Self::UnknownCommand(_) => "unknown_command",
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    /// Fatal errors mean the backing file cannot be trusted for further
    /// commands; everything else is a bad request the user can retry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable { .. } | Self::Io(_) | Self::Json(_)
        )
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GtdError>;
