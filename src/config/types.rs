use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use crate::error::{MigratorError, MigratorResult};

/// libpq 支援的 sslmode 值
pub const SSL_MODES: &[&str] = &[
    "disable",
    "allow",
    "prefer",
    "require",
    "verify-ca",
    "verify-full",
];

/// 遷移器配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigratorConfig {
    /// 遷移檔案目錄（相對於工作目錄）
    pub migrations_dir: String,
    /// 組合連接字串時使用的 sslmode
    pub ssl_mode: String,
    pub log: LogConfig,
}

impl MigratorConfig {
    pub fn migrations_path(&self) -> PathBuf {
        PathBuf::from(&self.migrations_dir)
    }
}

impl Validator for MigratorConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.migrations_dir, "migrations_dir")?;
        ValidationUtils::one_of(&self.ssl_mode, SSL_MODES, "ssl_mode")?;
        self.log.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl LogConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(
            &self.level,
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;
        ValidationUtils::one_of(&self.format, &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 從行程環境變數讀入的資料庫參數，任何欄位都可能缺少
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseEnv {
    #[serde(default)]
    pub db_username: Option<String>,
    #[serde(default)]
    pub db_address: Option<String>,
    #[serde(default)]
    pub db_port: Option<String>,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub db_secret_arn: Option<String>,
}

impl DatabaseEnv {
    /// 確認所有必要變數都存在且非空，否則回報所有缺少的變數名稱
    pub fn require(&self) -> MigratorResult<DatabaseSettings> {
        let mut missing = Vec::new();
        let mut take = |name: &'static str, value: &Option<String>| match value.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let settings = DatabaseSettings {
            username: take("DB_USERNAME", &self.db_username),
            host: take("DB_ADDRESS", &self.db_address),
            port: take("DB_PORT", &self.db_port),
            database: take("DB_NAME", &self.db_name),
            secret_arn: take("DB_SECRET_ARN", &self.db_secret_arn),
        };

        if !missing.is_empty() {
            return Err(MigratorError::MissingEnvironment(missing));
        }
        Ok(settings)
    }
}

/// 經檢查後的資料庫參數（不含密碼）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub username: String,
    pub host: String,
    pub port: String,
    pub database: String,
    pub secret_arn: String,
}
