//! Logging Infrastructure
//!
//! `RUST_LOG` 优先；未设置时使用配置里的级别。

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::ClientConfig;

/// Initialize the logger from client configuration
pub fn init_logger(config: &ClientConfig) {
    init_logger_with_file(Some(&config.log_level), None);
}

/// Initialize the logger with optional daily-rolling file output
///
/// 重复初始化会被忽略 (测试里多次调用是安全的)。
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && Path::new(dir).exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "matjip-client");
        let _ = subscriber
            .with_ansi(false)
            .with_writer(file_appender)
            .try_init();
        return;
    }

    let _ = subscriber.try_init();
}
