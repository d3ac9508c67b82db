//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations. Each write is a single
//! statement; path uniqueness is left to the `UNIQUE` constraint.

use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, SqlErr};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::new_link_active_model;
use crate::errors::{GoLinksError, Result};

use migration::entities::link;

/// 按驱动返回的结构化错误分类：唯一约束冲突 → LinkAlreadyExists
fn classify_write_error(err: DbErr, path: &str, context: &str) -> GoLinksError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => GoLinksError::link_already_exists(
            format!("A link with path '{}' already exists", path),
        ),
        _ => GoLinksError::database_operation(format!("{}: {}", context, err)),
    }
}

impl SeaOrmStorage {
    /// 插入新链接，返回数据库分配的 id
    pub async fn create(&self, path: &str, url: &str) -> Result<i64> {
        let result = link::Entity::insert(new_link_active_model(path, url))
            .exec(&self.db)
            .await
            .map_err(|e| classify_write_error(e, path, "创建链接失败"))?;

        info!("Link created: {} (id={})", path, result.last_insert_id);
        Ok(result.last_insert_id)
    }

    /// 原地更新 path 和 url
    ///
    /// 不检查 id 是否存在：目标行不存在时是一次无影响的写入。
    pub async fn update(&self, id: i64, path: &str, url: &str) -> Result<()> {
        link::Entity::update_many()
            .set(new_link_active_model(path, url))
            .filter(link::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| classify_write_error(e, path, "更新链接失败"))?;

        info!("Link updated: {} (id={})", path, id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = link::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| GoLinksError::database_operation(format!("删除链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(GoLinksError::link_not_found(format!("Link {} not found", id)));
        }

        info!("Link deleted: id={}", id);
        Ok(())
    }
}
