//! Request dispatcher
//!
//! Services are registered in precedence order: portal, JSON API,
//! `/favicon.ico`, then the alias fallback. A matched resource that has no
//! route for the request method answers 405.

use std::sync::Arc;

use actix_web::web;

use crate::config::RouteConfig;
use crate::services::LinkService;

use super::services::helpers::{api_not_found, json_config, method_not_allowed};
use super::services::{RedirectService, links, portal_routes, redirect_routes};

/// JSON API 路由 `/api`
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .app_data(json_config())
        .service(
            web::resource("/links")
                .route(web::get().to(links::list_links))
                .route(web::post().to(links::create_link))
                .default_service(web::route().to(method_not_allowed)),
        )
        .service(
            web::resource("/links/{id}")
                .route(web::put().to(links::update_link))
                .route(web::delete().to(links::delete_link))
                .default_service(web::route().to(method_not_allowed)),
        )
        .default_service(web::route().to(api_not_found))
}

/// 注册全部路由及其共享状态
pub fn configure_routes(
    cfg: &mut web::ServiceConfig,
    link_service: Arc<LinkService>,
    route_config: RouteConfig,
) {
    let portal_prefix = route_config.portal_prefix.clone();

    cfg.app_data(web::Data::new(link_service))
        .app_data(web::Data::new(route_config))
        .service(portal_routes(&portal_prefix))
        .service(api_routes())
        .service(web::resource("/favicon.ico").route(web::route().to(RedirectService::favicon)))
        .service(redirect_routes());
}
