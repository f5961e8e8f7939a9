use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";
pub const TASKS_FILE_ENV: &str = "GTD_FILE";

/// Runtime settings for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tasks_file: PathBuf,
}

impl Config {
    /// Resolve settings from an explicit flag, then `$GTD_FILE`, then the default.
    pub fn resolve(file_flag: Option<PathBuf>) -> Self {
        Self::resolve_with(file_flag, |key| std::env::var_os(key))
    }

    pub(crate) fn resolve_with<F>(file_flag: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let tasks_file = file_flag
            .or_else(|| {
                lookup(TASKS_FILE_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE));
        Self { tasks_file }
    }
}
