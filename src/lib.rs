// 模組定義
pub mod config;
pub mod connection;
pub mod error;
pub mod handler;
pub mod logging;
pub mod secrets;
pub mod storage;

pub use error::{MigratorError, MigratorResult};
pub use handler::{InvocationError, MigrationEvent, MigrationHandler, MigrationResponse};
