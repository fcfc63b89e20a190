//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies.
//! Production emits JSON lines.

use std::path::Path;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional daily-rolling file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>, json: bool) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    match (json, log_dir.and_then(daily_appender)) {
        (true, Some(appender)) => builder.json().with_writer(appender).init(),
        (true, None) => builder.json().init(),
        (false, Some(appender)) => builder.with_ansi(false).with_writer(appender).init(),
        (false, None) => builder.init(),
    }
}

fn daily_appender(dir: &str) -> Option<RollingFileAppender> {
    let log_path = Path::new(dir);
    if !log_path.exists() && std::fs::create_dir_all(log_path).is_err() {
        eprintln!("Cannot create log directory {dir}, logging to stdout");
        return None;
    }
    Some(tracing_appender::rolling::daily(log_path, "comanda-server"))
}
