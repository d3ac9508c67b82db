//! SeaORM storage backend
//!
//! SQLite-only persistence for the `links` table. The schema itself lives in
//! the `migration` workspace crate and is applied on startup.

mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::errors::{GoLinksError, Result};

pub use connection::{connect_sqlite, ensure_parent_dir, run_migrations, sqlite_url_from_path};
pub use converters::{model_to_link, new_link_active_model};

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(GoLinksError::database_config("数据库路径未设置"));
        }

        let db = connect_sqlite(database_url).await?;

        let storage = SeaOrmStorage { db };

        // 运行迁移
        run_migrations(&storage.db).await?;

        warn!("SQLITE Storage initialized.");
        Ok(storage)
    }

    /// 关闭连接池（优雅停机时调用）
    pub async fn close(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| GoLinksError::database_connection(format!("关闭数据库连接失败: {}", e)))?;
        info!("Database connection pool closed");
        Ok(())
    }
}
