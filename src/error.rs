use thiserror::Error;

use crate::config::ValidationError;

/// 遷移器錯誤類型
#[derive(Error, Debug)]
pub enum MigratorError {
    /// 配置載入錯誤
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    /// 配置驗證錯誤
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// 缺少必要的環境變數
    #[error("missing one or more required environment variables: {}", .0.join(", "))]
    MissingEnvironment(Vec<&'static str>),

    /// 無法從密鑰服務取得密鑰
    #[error("failed to get secret value: {0}")]
    SecretFetch(String),

    /// 密鑰內容為二進位格式
    #[error("secret value is binary, not supported")]
    BinarySecret,

    /// 密鑰不是有效的 JSON 物件
    #[error("failed to unmarshal secret JSON: {0}")]
    SecretFormat(String),

    /// 密鑰 JSON 中沒有 password 欄位
    #[error("password field not found in secret")]
    MissingPassword,

    /// 連接字串無效或無法建立連接
    #[error("failed to connect to DB: {0}")]
    Connect(#[source] sqlx::Error),

    /// 無法讀取遷移目錄
    #[error("failed to load migrations from {path}: {source}")]
    MigrationSource {
        path: String,
        #[source]
        source: sqlx::migrate::MigrateError,
    },

    /// 遷移執行失敗
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// 遷移器結果類型別名
pub type MigratorResult<T> = Result<T, MigratorError>;
