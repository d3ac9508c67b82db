use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{RouteConfig, StaticConfig};
use crate::services::LinkService;
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub route_config: RouteConfig,
}

/// 准备服务器启动的上下文：存储、服务、路由配置
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;

    let link_count = storage.count().await.context("Failed to count links")?;
    info!(
        "Using SQLite database {} ({} links)",
        config.database.path, link_count
    );

    let link_service = Arc::new(LinkService::new(storage.clone()));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        link_service,
        route_config: config.routes.clone(),
    })
}
