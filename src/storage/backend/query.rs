//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::model_to_link;
use crate::errors::{GoLinksError, Result};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    /// 按 path 精确查找（大小写敏感）
    pub async fn get_by_path(&self, path: &str) -> Result<Link> {
        link::Entity::find()
            .filter(link::Column::Path.eq(path))
            .one(&self.db)
            .await
            .map_err(|e| GoLinksError::database_operation(format!("查询链接失败: {}", e)))?
            .map(model_to_link)
            .ok_or_else(|| GoLinksError::link_not_found(format!("Link '{}' not found", path)))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Link> {
        link::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GoLinksError::database_operation(format!("查询链接失败: {}", e)))?
            .map(model_to_link)
            .ok_or_else(|| GoLinksError::link_not_found(format!("Link {} not found", id)))
    }

    /// 加载全部链接，按 path 升序
    pub async fn get_all(&self) -> Result<Vec<Link>> {
        let models = link::Entity::find()
            .order_by_asc(link::Column::Path)
            .all(&self.db)
            .await
            .map_err(|e| GoLinksError::database_operation(format!("加载所有链接失败: {}", e)))?;

        debug!("Loaded {} links", models.len());
        Ok(models.into_iter().map(model_to_link).collect())
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let count = link::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(|e| GoLinksError::database_operation(format!("查询链接失败: {}", e)))?;
        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| GoLinksError::database_operation(format!("统计链接数量失败: {}", e)))
    }
}
