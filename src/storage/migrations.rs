use async_trait::async_trait;
use serde::Serialize;
use sqlx::migrate::{Migrate, Migration, Migrator};
use sqlx::postgres::PgConnection;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{MigratorError, MigratorResult};
use crate::storage::database;

/// 單一遷移的套用狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// 對給定的連接字串套用遷移目錄
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MigrationRunner: Send + Sync {
    async fn run(&self, url: &str, dir: &Path) -> MigratorResult<()>;
}

/// 以 `sqlx::migrate` 執行遷移
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlxMigrationRunner;

#[async_trait]
impl MigrationRunner for SqlxMigrationRunner {
    async fn run(&self, url: &str, dir: &Path) -> MigratorResult<()> {
        run_migrations(url, dir).await
    }
}

/// 在執行時從目錄讀取遷移檔案
pub async fn load_migrator(dir: &Path) -> MigratorResult<Migrator> {
    Migrator::new(dir)
        .await
        .map_err(|source| MigratorError::MigrationSource {
            path: dir.display().to_string(),
            source,
        })
}

/// 套用目錄中所有未套用的遷移，結束時一律關閉連接
pub async fn run_migrations(url: &str, dir: &Path) -> MigratorResult<()> {
    let mut conn = database::connect(url).await?;
    let result = apply_pending(&mut conn, dir).await;
    database::close(conn).await;
    result
}

async fn apply_pending(conn: &mut PgConnection, dir: &Path) -> MigratorResult<()> {
    let migrator = load_migrator(dir).await?;
    info!(
        dir = %dir.display(),
        known = migrator.iter().count(),
        "running pending migrations"
    );

    migrator.run_direct(conn).await?;
    Ok(())
}

/// 查詢目錄中每個遷移是否已套用
pub async fn migration_status(url: &str, dir: &Path) -> MigratorResult<Vec<MigrationStatus>> {
    let mut conn = database::connect(url).await?;
    let result = collect_status(&mut conn, dir).await;
    database::close(conn).await;
    result
}

async fn collect_status(conn: &mut PgConnection, dir: &Path) -> MigratorResult<Vec<MigrationStatus>> {
    let migrator = load_migrator(dir).await?;

    conn.ensure_migrations_table().await?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(status_report(migrator.iter(), &applied))
}

/// 以已套用版本集合對照本地遷移（略過 down 遷移）
pub fn status_report<'a>(
    migrations: impl IntoIterator<Item = &'a Migration>,
    applied: &HashSet<i64>,
) -> Vec<MigrationStatus> {
    migrations
        .into_iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect()
}
