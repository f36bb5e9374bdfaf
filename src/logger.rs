//! Installs the `tracing` subscriber for programs embedding the executor.
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::{AppError, AppResult};

/// Environment variables read for filter directives, first match wins.
const LOG_ENV_VARS: [&str; 2] = ["VOLLEY_LOG", "RUST_LOG"];

/// Where formatted events go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogOutput {
    #[default]
    Stderr,
    /// Routed through the test harness so output is captured per test.
    TestCapture,
}

/// Installs a global fmt subscriber. Directives come from `VOLLEY_LOG`, then
/// `RUST_LOG`; without either the level is `info`, or `debug` when `verbose`.
///
/// # Errors
///
/// Returns `AppError::LogFilter` when the directives do not parse and
/// `AppError::Logging` when a global subscriber is already installed.
pub fn init_logging(verbose: bool, output: LogOutput) -> AppResult<()> {
    let directives = LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .filter(|value| !value.trim().is_empty());
    let filter = build_filter(directives.as_deref(), verbose)?;

    let builder = FmtSubscriber::builder().with_env_filter(filter);
    match output {
        LogOutput::Stderr => tracing::subscriber::set_global_default(builder.finish())?,
        LogOutput::TestCapture => {
            tracing::subscriber::set_global_default(builder.with_test_writer().finish())?;
        }
    }
    Ok(())
}

fn build_filter(directives: Option<&str>, verbose: bool) -> AppResult<EnvFilter> {
    match directives {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|source| AppError::LogFilter {
                directives: directives.to_owned(),
                source,
            })
        }
        None if verbose => Ok(EnvFilter::new("debug")),
        None => Ok(EnvFilter::new("info")),
    }
}
