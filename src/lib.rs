pub mod animation;
pub mod dashboard;
pub mod dataset;
pub mod engines;
pub mod errors;
pub mod format;
pub mod models;
pub mod navigation;
pub mod pipeline;
pub mod settings;

pub use crate::dashboard::DashboardCore;
pub use crate::dataset::{Dataset, DatasetRecords};
pub use crate::errors::{AppError, AppResult};
pub use crate::models::AppSettings;

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Installs the global JSON subscriber writing to `<log_dir>/insightflow.log.<date>`.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "insightflow.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}

/// Flattens any error into the string handed across the presentation boundary.
pub fn to_client_error(error: impl std::fmt::Display) -> String {
    error.to_string()
}
