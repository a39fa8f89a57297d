use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber from config.
///
/// Stdout layer always; a rolling file layer only when `log_dir` is set.
/// The returned guard flushes the file writer on drop, so the caller
/// holds it for the life of the run.
pub fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let filter_str = if config.enable_tracing {
        config.log_level.clone()
    } else {
        // Silence our own target; verification failures still reach the
        // user through the process exit path
        format!("{},rulebench=off", config.log_level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let registry = tracing_subscriber::registry().with(filter);
    let stdout_layer = fmt::layer().with_target(false).with_ansi(true);

    if config.log_dir.is_empty() {
        registry.with(stdout_layer).init();
        return None;
    }

    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true) // Keep target in JSON for structured queries
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(stdout_layer).with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false) // Hide redundant target in text output
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(stdout_layer).with(file_layer).init();
    }

    Some(guard)
}
