use std::path::Path;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{GoLinksError, Result};
use migration::{Migrator, MigratorTrait};

/// 把配置中的文件路径转换为 SQLite 连接 URL
///
/// 已经是 `sqlite:` URL 的原样返回；普通路径转换为 `sqlite://{path}?mode=rwc`。
pub fn sqlite_url_from_path(path: &str) -> Result<String> {
    let path = path.trim();
    if path.is_empty() {
        return Err(GoLinksError::database_config("数据库路径不能为空"));
    }

    if path.starts_with("sqlite:") {
        return Ok(path.to_string());
    }

    Ok(format!("sqlite://{}?mode=rwc", path))
}

/// 确保数据库文件所在目录存在
pub fn ensure_parent_dir(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            GoLinksError::file_operation(format!(
                "无法创建数据库目录 {}: {}",
                parent.display(),
                e
            ))
        })?;
        info!("Created database directory: {}", parent.display());
    }
    Ok(())
}

/// 连接 SQLite 数据库（带自动创建和 WAL）
///
/// 并发写入依赖 busy_timeout 等待文件锁，而不是立即失败。
pub async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::SqlitePool;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
    use std::str::FromStr;

    let opt = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| GoLinksError::database_config(format!("SQLite URL 解析失败: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(5));

    // 使用 sqlx 的连接池
    let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
        GoLinksError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
    })?;

    // 转换为 Sea-ORM 的 DatabaseConnection
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| GoLinksError::database_operation(format!("迁移失败: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}
