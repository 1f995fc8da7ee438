use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 初始化日誌系統；`RUST_LOG` 優先於配置中的級別
pub fn init_logging(log_config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_config.level.to_lowercase()))
        .map_err(|e| anyhow!("invalid log level {}: {}", log_config.level, e))?;

    // CloudWatch 不解析 ANSI 色碼
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    let result = if log_config.is_json() {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    info!(level = %log_config.level, format = %log_config.format, "logging initialized");
    Ok(())
}
