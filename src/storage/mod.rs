use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::Link;

pub struct StorageFactory;

impl StorageFactory {
    /// 按配置打开（必要时创建）SQLite 数据库并完成迁移
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = backend::sqlite_url_from_path(&config.path)?;
        if !config.path.trim().starts_with("sqlite:") {
            backend::ensure_parent_dir(config.path.trim())?;
        }
        let storage = SeaOrmStorage::new(&database_url).await?;
        Ok(Arc::new(storage))
    }
}
