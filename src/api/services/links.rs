//! JSON API：链接 CRUD

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::{LinkInput, LinkService};

use super::helpers::{error_from_golinks, parse_link_id};

/// GET /api/links
pub async fn list_links(service: web::Data<Arc<LinkService>>) -> HttpResponse {
    match service.list_links(None).await {
        Ok(links) => {
            trace!("API: returning {} links", links.len());
            HttpResponse::Ok().json(links)
        }
        Err(e) => error_from_golinks(&e),
    }
}

/// POST /api/links
pub async fn create_link(
    service: web::Data<Arc<LinkService>>,
    payload: web::Json<LinkInput>,
) -> HttpResponse {
    match service.create_link(payload.into_inner()).await {
        Ok(_) => HttpResponse::Created().finish(),
        Err(e) => error_from_golinks(&e),
    }
}

/// PUT /api/links/{id}
pub async fn update_link(
    service: web::Data<Arc<LinkService>>,
    id: web::Path<String>,
    payload: web::Json<LinkInput>,
) -> HttpResponse {
    let id = match parse_link_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.update_link(id, payload.into_inner()).await {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => error_from_golinks(&e),
    }
}

/// DELETE /api/links/{id}
pub async fn delete_link(
    service: web::Data<Arc<LinkService>>,
    id: web::Path<String>,
) -> HttpResponse {
    let id = match parse_link_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.delete_link(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_from_golinks(&e),
    }
}
