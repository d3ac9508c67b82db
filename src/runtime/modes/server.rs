//! Server mode
//!
//! Builds the actix application and runs it until a shutdown signal arrives.

use actix_web::{App, HttpServer, middleware::Compress};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::configure_routes;
use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let storage = startup.storage.clone();
    let link_service = startup.link_service.clone();
    let route_config = startup.route_config.clone();
    let portal_prefix = route_config.portal_prefix.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware::new(&portal_prefix)) // 最外层，记录请求延迟
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(Compress::default())
            .configure(|cfg| configure_routes(cfg, link_service.clone(), route_config.clone()))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    // 信号由 wait_for_signal 统一处理
    .disable_signals();

    let server = match config.server.workers {
        Some(workers) if workers > 0 => server.workers(workers),
        _ => server,
    };

    let address = config.address();
    let server = server
        .bind(&address)
        .with_context(|| format!("Failed to bind {}", address))?
        .run();

    warn!("Starting server at http://{}", address);
    info!(
        "Portal available at http://{}{}",
        address, startup.route_config.portal_prefix
    );

    let handle = server.handle();
    let signal = lifetime::shutdown::wait_for_signal();
    tokio::pin!(server);
    tokio::pin!(signal);

    // Wait for server or shutdown signal
    let stopped_by_signal = tokio::select! {
        res = &mut server => {
            if let Err(e) = res {
                warn!("Server exited with error: {}", e);
            }
            false
        }
        _ = &mut signal => true,
    };

    if stopped_by_signal {
        // 停止接收新连接，等待在途请求结束
        handle.stop(true).await;
        if let Err(e) = server.await {
            warn!("Server exited with error: {}", e);
        }
    }

    lifetime::shutdown::close_storage(&storage).await;
    Ok(())
}
