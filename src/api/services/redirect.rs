use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::errors::GoLinksError;
use crate::services::LinkService;
use crate::utils::validation::is_lookup_candidate;

pub struct RedirectService;

impl RedirectService {
    /// GET /{alias}
    pub async fn handle_redirect(
        req: HttpRequest,
        service: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        let alias = req.match_info().query("alias");

        if !is_lookup_candidate(alias) {
            // 不可能存在的别名，直接 404，不查库
            trace!("Invalid alias rejected: {}", alias);
            return Self::not_found_response();
        }

        match service.resolve(alias).await {
            Ok(link) => {
                debug!("Redirecting /{} -> {}", alias, link.url);
                HttpResponse::Found()
                    .insert_header((header::LOCATION, link.url))
                    .finish()
            }
            Err(GoLinksError::LinkNotFound(_)) => {
                debug!("Redirect link not found: {}", alias);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Database error during redirect lookup: {}", e);
                Self::error_response()
            }
        }
    }

    /// /favicon.ico 不参与别名查找
    pub async fn favicon() -> HttpResponse {
        HttpResponse::NotFound().finish()
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body("Not Found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// 兜底路由：其余所有路径都视为别名
pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{alias:.*}").route(web::get().to(RedirectService::handle_redirect))
}
