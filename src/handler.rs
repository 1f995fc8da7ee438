//! Lambda 呼叫處理
//!
//! 每次呼叫：解析連接字串（事件中的 `db_url` 優先，否則使用 `DB_*` 環境變數加上密鑰），
//! 記錄遮蔽後的連接字串，套用所有未套用的遷移，再把結果對應成 `{"message": ...}`。

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::{DatabaseEnv, MigratorConfig};
use crate::connection::{build_postgres_url, redact_url};
use crate::error::{MigratorError, MigratorResult};
use crate::secrets::SecretStore;
use crate::storage::{MigrationRunner, SqlxMigrationRunner};

pub const MIGRATION_SUCCESSFUL: &str = "Migration successful";
pub const MIGRATION_FAILED: &str = "Migration failed";
pub const CONNECT_FAILED: &str = "Failed to connect to DB";

/// 呼叫事件，所有欄位皆可省略
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MigrationEvent {
    #[serde(default)]
    pub db_url: Option<String>,
}

/// 回傳給呼叫端的訊息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationResponse {
    pub message: String,
}

impl MigrationResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 呼叫失敗：對外只顯示通用訊息，詳細原因放在 `source`
#[derive(Debug, Error)]
#[error("{}", .response.message)]
pub struct InvocationError {
    pub response: MigrationResponse,
    #[source]
    pub source: MigratorError,
}

impl InvocationError {
    fn new(message: impl Into<String>, source: MigratorError) -> Self {
        Self {
            response: MigrationResponse::new(message),
            source,
        }
    }
}

/// 遷移呼叫處理器，在冷啟動時建立一次
pub struct MigrationHandler {
    config: MigratorConfig,
    database_env: DatabaseEnv,
    secrets: Arc<dyn SecretStore>,
    runner: Arc<dyn MigrationRunner>,
}

impl MigrationHandler {
    pub fn new(config: MigratorConfig, database_env: DatabaseEnv, secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            config,
            database_env,
            secrets,
            runner: Arc::new(SqlxMigrationRunner),
        }
    }

    /// 替換遷移執行器
    pub fn with_runner(mut self, runner: Arc<dyn MigrationRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    /// 解析本次呼叫使用的連接字串
    pub async fn resolve_url(&self, event: &MigrationEvent) -> MigratorResult<String> {
        if let Some(url) = event.db_url.as_deref().filter(|url| !url.is_empty()) {
            info!("using connection string from invocation payload");
            return Ok(url.to_string());
        }

        let settings = self.database_env.require()?;
        build_postgres_url(settings, self.secrets.as_ref(), &self.config.ssl_mode).await
    }

    /// 處理一次呼叫
    #[instrument(skip_all)]
    pub async fn invoke(&self, event: MigrationEvent) -> Result<MigrationResponse, InvocationError> {
        info!("starting migration handler");

        let url = match self.resolve_url(&event).await {
            Ok(url) => url,
            Err(err) => {
                error!(error = %err, "failed to build DB URL");
                return Err(InvocationError::new(format!("Failed to build DB URL: {}", err), err));
            }
        };

        info!(url = %redact_url(&url), "connecting to DB");
        match self
            .runner
            .run(&url, &self.config.migrations_path())
            .await
        {
            Ok(()) => {
                info!("migration successful");
                Ok(MigrationResponse::new(MIGRATION_SUCCESSFUL))
            }
            Err(err @ MigratorError::Connect(_)) => {
                error!(error = %err, "failed to connect to DB");
                Err(InvocationError::new(CONNECT_FAILED, err))
            }
            Err(err) => {
                error!(error = %err, "migration failed");
                Err(InvocationError::new(MIGRATION_FAILED, err))
            }
        }
    }
}
