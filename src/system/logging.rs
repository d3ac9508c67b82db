//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

/// 默认日志文件名（配置只给了目录时使用）
const DEFAULT_LOG_FILE: &str = "golinks.log";

/// 日志输出目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// 按天滚动：目录 + 文件名前缀
    Rolling { dir: String, prefix: String },
    /// 追加写入单个文件
    Append(String),
}

/// 根据配置决定日志输出目标
pub fn resolve_target(config: &LoggingConfig) -> LogTarget {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.trim().is_empty()) else {
        return LogTarget::Stdout;
    };

    if !config.enable_rotation {
        return LogTarget::Append(log_file.to_string());
    }

    let path = Path::new(log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(DEFAULT_LOG_FILE);

    LogTarget::Rolling {
        dir: dir.to_string_lossy().into_owned(),
        prefix: filename.trim_end_matches(".log").to_string(),
    }
}

/// Initialize logging system based on configuration
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
///
/// 全局 subscriber 只能设置一次，重复调用返回错误。
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let target = resolve_target(config);

    let writer: Box<dyn std::io::Write + Send + Sync> = match &target {
        LogTarget::Stdout => Box::new(std::io::stdout()),
        LogTarget::Rolling { dir, prefix } => {
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(config.max_backups.max(1) as usize)
                .build(dir)
                .context("Failed to create rolling log appender")?;
            Box::new(appender)
        }
        LogTarget::Append(file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .with_context(|| format!("Failed to open log file {}", file))?;
            Box::new(file)
        }
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(target == LogTarget::Stdout);

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
