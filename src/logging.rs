use std::env;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_FILTER_ENV: &str = "GTD_LOG";
pub const LOG_FORMAT_ENV: &str = "GTD_LOG_FORMAT";

/// Default filter when `$GTD_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug { "gtd=debug,info" } else { "gtd=warn" }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(env::var("DEBUG").is_ok())));

    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
