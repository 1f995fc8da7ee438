//! 密鑰讀取
//!
//! 資料庫密碼存放在 AWS Secrets Manager，內容為至少包含 `password` 欄位的 JSON 物件。

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use serde_json::error::Category;
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

use crate::error::{MigratorError, MigratorResult};

/// 密鑰服務回傳的原始內容
#[derive(Clone, PartialEq, Eq)]
pub enum SecretValue {
    Text(String),
    Binary(Vec<u8>),
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValue::Text(_) => f.write_str("Text([REDACTED])"),
            SecretValue::Binary(bytes) => write!(f, "Binary({} bytes)", bytes.len()),
        }
    }
}

/// 依識別碼讀取密鑰的存取介面
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret(&self, secret_id: &str) -> MigratorResult<SecretValue>;
}

/// 以 AWS Secrets Manager 實作的密鑰存取
#[derive(Clone, Debug)]
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 使用預設的 AWS 憑證鏈與區域建立客戶端
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn get_secret(&self, secret_id: &str) -> MigratorResult<SecretValue> {
        debug!(secret_id, "fetching secret value");
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| MigratorError::SecretFetch(DisplayErrorContext(e).to_string()))?;

        if let Some(text) = output.secret_string {
            return Ok(SecretValue::Text(text));
        }
        match output.secret_binary {
            Some(blob) => Ok(SecretValue::Binary(blob.into_inner())),
            None => Err(MigratorError::SecretFetch(format!(
                "secret {} has no value",
                secret_id
            ))),
        }
    }
}

/// 從密鑰 JSON 取出 `password` 欄位
pub fn extract_password(secret: SecretValue) -> MigratorResult<String> {
    let text = match secret {
        SecretValue::Text(text) => text,
        SecretValue::Binary(_) => return Err(MigratorError::BinarySecret),
    };

    // serde_json 的錯誤訊息可能引用密鑰內容，只保留類別與位置
    let value: Value = serde_json::from_str(&text).map_err(|e| {
        let category = match e.classify() {
            Category::Io => "I/O",
            Category::Syntax => "syntax",
            Category::Data => "data",
            Category::Eof => "unexpected end of input",
        };
        MigratorError::SecretFormat(format!(
            "{} error at line {} column {}",
            category,
            e.line(),
            e.column()
        ))
    })?;
    let Value::Object(fields) = value else {
        return Err(MigratorError::SecretFormat(
            "secret is not a JSON object".to_string(),
        ));
    };

    match fields.get("password") {
        Some(Value::String(password)) => Ok(password.clone()),
        _ => Err(MigratorError::MissingPassword),
    }
}

/// 讀取並解析資料庫密碼
pub async fn fetch_db_password(store: &dyn SecretStore, secret_id: &str) -> MigratorResult<String> {
    let secret = store.get_secret(secret_id).await?;
    let password = extract_password(secret)?;
    info!(secret_id, "database password retrieved");
    Ok(password)
}
