pub mod database;
pub mod migrations;

// 匯出遷移功能
pub use migrations::{
    load_migrator, migration_status, run_migrations, MigrationRunner, MigrationStatus,
    SqlxMigrationRunner,
};
