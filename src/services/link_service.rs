//! Link management service
//!
//! Validation plus persistence for links. The JSON API, the portal and the
//! CLI all go through this type, so their rules cannot drift apart.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{GoLinksError, Result};
use crate::storage::{Link, SeaOrmStorage};
use crate::utils::validation::validate_link;

// ============ Request DTOs ============

/// 创建/更新链接的输入
///
/// 缺失字段按空字符串处理，交给验证阶段报告（而不是反序列化失败）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkInput {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub url: String,
}

impl LinkInput {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// 大小写不敏感的子串过滤（匹配 path 或 url）
pub fn filter_links(links: Vec<Link>, search: Option<&str>) -> Vec<Link> {
    let needle = match search.map(str::trim) {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return links,
    };

    links
        .into_iter()
        .filter(|link| {
            link.path.to_lowercase().contains(&needle) || link.url.to_lowercase().contains(&needle)
        })
        .collect()
}

// ============ LinkService ============

/// Link management service
pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    /// Create a new LinkService instance
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 列出全部链接（按 path 排序），可选搜索过滤
    pub async fn list_links(&self, search: Option<&str>) -> Result<Vec<Link>> {
        let links = self.storage.get_all().await?;
        Ok(filter_links(links, search))
    }

    /// 按别名解析跳转目标
    pub async fn resolve(&self, path: &str) -> Result<Link> {
        self.storage.get_by_path(path).await
    }

    pub async fn get_link(&self, id: i64) -> Result<Link> {
        self.storage.get_by_id(id).await
    }

    /// Create a new link
    ///
    /// 验证失败不会触及存储；重复 path 由唯一约束报告为 LinkAlreadyExists。
    pub async fn create_link(&self, input: LinkInput) -> Result<Link> {
        let (path, url) = validate_link(&input.path, &input.url)?;

        let id = self.storage.create(&path, &url).await.inspect_err(|e| {
            if matches!(e, GoLinksError::LinkAlreadyExists(_)) {
                warn!("LinkService: duplicate path rejected: {}", path);
            }
        })?;

        info!("LinkService: created link '{}' -> {}", path, url);
        Ok(Link { id, path, url })
    }

    /// Update an existing link in place
    ///
    /// 顺序：验证 → 存在性检查 → 写入。
    pub async fn update_link(&self, id: i64, input: LinkInput) -> Result<Link> {
        let (path, url) = validate_link(&input.path, &input.url)?;

        if !self.storage.exists(id).await? {
            return Err(GoLinksError::link_not_found(format!(
                "Link {} not found",
                id
            )));
        }

        self.storage.update(id, &path, &url).await?;

        info!("LinkService: updated link {} to '{}' -> {}", id, path, url);
        Ok(Link { id, path, url })
    }

    pub async fn delete_link(&self, id: i64) -> Result<()> {
        self.storage.delete(id).await?;
        info!("LinkService: deleted link {}", id);
        Ok(())
    }
}
