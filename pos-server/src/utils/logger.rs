//! Logging Infrastructure
//!
//! Structured logging setup. `RUST_LOG` wins over the configured level;
//! when a log directory exists, output also goes to a daily-rolling file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with the default level and no file output
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with an optional level fallback and log directory
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided and exists
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "pos-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
