use db_migrator::config::{ConfigLoader, LogConfig};
use db_migrator::logging::init_logging;
use db_migrator::secrets::SecretsManagerStore;
use db_migrator::{MigrationEvent, MigrationHandler};
use lambda_runtime::{service_fn, LambdaEvent};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // 冷啟動時載入配置並初始化日誌
    let loader = ConfigLoader::from_env();
    let config = match loader.load() {
        Ok(config) => config,
        Err(err) => {
            // 配置無效時以預設日誌設定記錄錯誤再結束
            init_logging(&LogConfig::default())?;
            error!(error = %err, "failed to load migrator configuration");
            return Err(anyhow::Error::new(err)
                .context("failed to load migrator configuration")
                .into());
        }
    };
    init_logging(&config.log)?;

    let database_env = match loader.database_env() {
        Ok(env) => env,
        Err(err) => {
            error!(error = %err, "failed to read DB_* environment variables");
            return Err(anyhow::Error::new(err)
                .context("failed to read DB_* environment variables")
                .into());
        }
    };
    let secrets = Arc::new(SecretsManagerStore::from_env().await);
    let handler = MigrationHandler::new(config, database_env, secrets);
    info!(migrations_dir = %handler.config().migrations_dir, "migration lambda ready");

    let handler = &handler;
    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<Option<MigrationEvent>>| async move {
            // 空的或 null 的事件走環境變數路徑
            let payload = event.payload.unwrap_or_default();
            handler
                .invoke(payload)
                .await
                .map_err(lambda_runtime::Error::from)
        },
    ))
    .await
}
