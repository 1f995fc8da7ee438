use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use db_migrator::config::ConfigLoader;
use db_migrator::logging::init_logging;
use db_migrator::secrets::SecretsManagerStore;
use db_migrator::storage::migration_status;
use db_migrator::{MigrationEvent, MigrationHandler};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "migrate", about = "db-migrator 資料庫遷移工具")]
struct Cli {
    /// 直接使用此連接字串，不讀取 DB_* 環境變數與密鑰
    #[arg(long, global = true)]
    db_url: Option<String>,

    /// 遷移檔案目錄（覆寫配置中的 migrations_dir）
    #[arg(long, global = true)]
    migrations_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 運行所有未應用的遷移
    Run,

    /// 檢查遷移狀態
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = ConfigLoader::from_env();
    let mut config = loader.load().context("failed to load migrator configuration")?;
    if let Some(dir) = cli.migrations_dir {
        config.migrations_dir = dir;
    }
    init_logging(&config.log)?;

    let database_env = loader
        .database_env()
        .context("failed to read DB_* environment variables")?;
    let secrets = Arc::new(SecretsManagerStore::from_env().await);
    let handler = MigrationHandler::new(config, database_env, secrets);
    let event = MigrationEvent { db_url: cli.db_url };

    match cli.command {
        Commands::Run => {
            let response = handler.invoke(event).await?;
            println!("{}", serde_json::to_string(&response)?);
        }
        Commands::Status => {
            let url = handler
                .resolve_url(&event)
                .await
                .context("failed to build DB URL")?;
            let report = migration_status(&url, &handler.config().migrations_path())
                .await
                .context("failed to read migration status")?;

            for entry in report {
                let state = if entry.applied { "applied" } else { "pending" };
                println!("{:<16} {:<8} {}", entry.version, state, entry.description);
            }
        }
    }

    Ok(())
}
