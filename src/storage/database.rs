use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{MigratorError, MigratorResult};

/// 以連接字串建立單一資料庫連接
pub async fn connect(url: &str) -> MigratorResult<PgConnection> {
    let options = PgConnectOptions::from_str(url)
        .map_err(MigratorError::Connect)?
        .disable_statement_logging();

    let conn = PgConnection::connect_with(&options)
        .await
        .map_err(MigratorError::Connect)?;
    debug!("database connection established");

    Ok(conn)
}

/// 關閉連接；關閉失敗只記錄警告
pub async fn close(conn: PgConnection) {
    if let Err(err) = conn.close().await {
        warn!(error = %err, "failed to close database connection");
    }
}
