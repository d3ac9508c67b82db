//! Web portal
//!
//! Server-rendered management UI. Every write goes through `LinkService`, and
//! every render reads the current storage state. Plain form posts work
//! without JavaScript; htmx requests hit the `/fragments` endpoints and get
//! partial HTML back.

mod views;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::RouteConfig;
use crate::errors::GoLinksError;
use crate::services::{LinkInput, LinkService};
use crate::storage::Link;

pub use views::{FormFragment, LinkFormView, PortalPage, RowsFragment};

/// htmx 成功后通知表单容器重置
const LINK_SAVED_EVENT: &str = "link-saved";

#[derive(Debug, Default, Deserialize)]
pub struct PortalQuery {
    pub q: Option<String>,
    pub flash: Option<String>,
    pub error: Option<String>,
    pub edit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// htmx 表单提交，附带 hx-include 进来的搜索词
#[derive(Debug, Default, Deserialize)]
pub struct FragmentForm {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub url: String,
    pub q: Option<String>,
}

impl FragmentForm {
    fn split(self) -> (LinkInput, Option<String>) {
        (LinkInput::new(self.path, self.url), self.q)
    }
}

/// portal 路由，挂在配置的前缀下
pub fn portal_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .app_data(web::FormConfig::default().error_handler(|err, _req| {
            let resp = HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body("Bad Request");
            actix_web::error::InternalError::from_response(err, resp).into()
        }))
        .service(web::resource("").route(web::get().to(portal_index)))
        .service(web::resource("/").route(web::get().to(portal_index)))
        .service(web::resource("/links").route(web::post().to(create_link_form)))
        .service(web::resource("/links/{id}/update").route(web::post().to(update_link_form)))
        .service(web::resource("/links/{id}/delete").route(web::post().to(delete_link_form)))
        .service(web::resource("/fragments/search").route(web::get().to(search_fragment)))
        .service(web::resource("/fragments/new").route(web::get().to(new_form_fragment)))
        .service(
            web::resource("/fragments/links").route(web::post().to(create_link_fragment)),
        )
        .service(
            web::resource("/fragments/links/{id}/edit").route(web::get().to(edit_form_fragment)),
        )
        .service(
            web::resource("/fragments/links/{id}")
                .route(web::put().to(update_link_fragment))
                .route(web::delete().to(delete_link_fragment)),
        )
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body("Not Found")
        }))
}

// ============ 渲染辅助 ============

fn render_html<T: Template>(status: StatusCode, template: &T) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => internal_error(&GoLinksError::from(e)),
    }
}

fn internal_error(err: &GoLinksError) -> HttpResponse {
    error!("Portal: {}", err);
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("Internal Server Error")
}

fn plain(status: StatusCode, body: &'static str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

/// 303 回到 portal 首页并带上提示
fn redirect_with(prefix: &str, key: &str, message: &str) -> HttpResponse {
    let location = format!("{}?{}={}", prefix, key, urlencoding::encode(message));
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

async fn render_page(
    service: &LinkService,
    prefix: &str,
    status: StatusCode,
    form: LinkFormView,
    search: Option<&str>,
    flash: Option<String>,
    error: Option<String>,
) -> HttpResponse {
    let links = match service.list_links(search).await {
        Ok(links) => links,
        Err(e) => return internal_error(&e),
    };

    let page = PortalPage {
        prefix: prefix.to_string(),
        links,
        search: search.unwrap_or_default().to_string(),
        flash,
        error,
        form,
    };
    render_html(status, &page)
}

fn rows_response(status: StatusCode, prefix: &str, links: Vec<Link>) -> HttpResponse {
    render_html(
        status,
        &RowsFragment {
            prefix: prefix.to_string(),
            links,
        },
    )
}

fn form_response(status: StatusCode, prefix: &str, form: LinkFormView) -> HttpResponse {
    render_html(
        status,
        &FormFragment {
            prefix: prefix.to_string(),
            form,
        },
    )
}

/// 写入成功后返回按当前搜索词过滤的表格，改投到 #link-rows，并触发表单重置
async fn saved_rows_response(
    service: &LinkService,
    prefix: &str,
    search: Option<&str>,
) -> HttpResponse {
    match service.list_links(search).await {
        Ok(links) => {
            let mut resp = rows_response(StatusCode::OK, prefix, links);
            let headers = resp.headers_mut();
            headers.insert(
                header::HeaderName::from_static("hx-retarget"),
                header::HeaderValue::from_static("#link-rows"),
            );
            headers.insert(
                header::HeaderName::from_static("hx-reswap"),
                header::HeaderValue::from_static("innerHTML"),
            );
            headers.insert(
                header::HeaderName::from_static("hx-trigger"),
                header::HeaderValue::from_static(LINK_SAVED_EVENT),
            );
            resp
        }
        Err(e) => internal_error(&e),
    }
}

// ============ 完整页面 ============

/// GET {prefix}
pub async fn portal_index(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    query: web::Query<PortalQuery>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let query = query.into_inner();

    // ?edit={id} 让无 JS 的浏览器也能进入编辑表单
    let form = match query.edit.as_deref().and_then(parse_id) {
        Some(id) => match service.get_link(id).await {
            Ok(link) => LinkFormView::for_link(prefix, &link),
            Err(e) if e.is_client_error() => LinkFormView::create(prefix).with_error(&e),
            Err(e) => return internal_error(&e),
        },
        None => LinkFormView::create(prefix),
    };

    render_page(
        &service,
        prefix,
        StatusCode::OK,
        form,
        query.q.as_deref(),
        query.flash,
        query.error,
    )
    .await
}

/// POST {prefix}/links
pub async fn create_link_form(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    form: web::Form<LinkInput>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let input = form.into_inner();

    match service.create_link(input.clone()).await {
        Ok(link) => redirect_with(prefix, "flash", &format!("Created /{}", link.path)),
        Err(e) if e.is_client_error() => {
            debug!("Portal: create rejected: {}", e);
            let form = LinkFormView::create(prefix).with_values(&input).with_error(&e);
            render_page(&service, prefix, e.http_status(), form, None, None, None).await
        }
        Err(e) => internal_error(&e),
    }
}

/// POST {prefix}/links/{id}/update
pub async fn update_link_form(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    id: web::Path<String>,
    form: web::Form<LinkInput>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let Some(id) = parse_id(&id) else {
        return plain(StatusCode::BAD_REQUEST, "Invalid link ID");
    };
    let input = form.into_inner();

    match service.update_link(id, input.clone()).await {
        Ok(link) => redirect_with(prefix, "flash", &format!("Updated /{}", link.path)),
        Err(e) if e.is_client_error() => {
            debug!("Portal: update of {} rejected: {}", id, e);
            let form = LinkFormView::edit(prefix, id)
                .with_values(&input)
                .with_error(&e);
            render_page(&service, prefix, e.http_status(), form, None, None, None).await
        }
        Err(e) => internal_error(&e),
    }
}

/// POST {prefix}/links/{id}/delete
pub async fn delete_link_form(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    id: web::Path<String>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let Some(id) = parse_id(&id) else {
        return plain(StatusCode::BAD_REQUEST, "Invalid link ID");
    };

    match service.delete_link(id).await {
        Ok(()) => redirect_with(prefix, "flash", "Link deleted"),
        Err(GoLinksError::LinkNotFound(_)) => redirect_with(prefix, "error", "Link not found"),
        Err(e) => internal_error(&e),
    }
}

// ============ htmx 片段 ============

/// GET {prefix}/fragments/search?q=
pub async fn search_fragment(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    match service.list_links(query.q.as_deref()).await {
        Ok(links) => rows_response(StatusCode::OK, &routes.portal_prefix, links),
        Err(e) => internal_error(&e),
    }
}

/// GET {prefix}/fragments/new
pub async fn new_form_fragment(routes: web::Data<RouteConfig>) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    form_response(StatusCode::OK, prefix, LinkFormView::create(prefix))
}

/// GET {prefix}/fragments/links/{id}/edit
pub async fn edit_form_fragment(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    id: web::Path<String>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let Some(id) = parse_id(&id) else {
        return plain(StatusCode::BAD_REQUEST, "Invalid link ID");
    };

    match service.get_link(id).await {
        Ok(link) => form_response(StatusCode::OK, prefix, LinkFormView::for_link(prefix, &link)),
        Err(e) if e.is_client_error() => form_response(
            e.http_status(),
            prefix,
            LinkFormView::create(prefix).with_error(&e),
        ),
        Err(e) => internal_error(&e),
    }
}

/// POST {prefix}/fragments/links
pub async fn create_link_fragment(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    form: web::Form<FragmentForm>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let (input, search) = form.into_inner().split();

    match service.create_link(input.clone()).await {
        Ok(_) => saved_rows_response(&service, prefix, search.as_deref()).await,
        Err(e) if e.is_client_error() => form_response(
            e.http_status(),
            prefix,
            LinkFormView::create(prefix).with_values(&input).with_error(&e),
        ),
        Err(e) => internal_error(&e),
    }
}

/// PUT {prefix}/fragments/links/{id}
pub async fn update_link_fragment(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    id: web::Path<String>,
    form: web::Form<FragmentForm>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let Some(id) = parse_id(&id) else {
        return plain(StatusCode::BAD_REQUEST, "Invalid link ID");
    };
    let (input, search) = form.into_inner().split();

    match service.update_link(id, input.clone()).await {
        Ok(_) => saved_rows_response(&service, prefix, search.as_deref()).await,
        Err(e) if e.is_client_error() => form_response(
            e.http_status(),
            prefix,
            LinkFormView::edit(prefix, id)
                .with_values(&input)
                .with_error(&e),
        ),
        Err(e) => internal_error(&e),
    }
}

/// DELETE {prefix}/fragments/links/{id}
///
/// 无论成功还是链接已不存在，都返回当前（按搜索词过滤的）表格。
pub async fn delete_link_fragment(
    service: web::Data<Arc<LinkService>>,
    routes: web::Data<RouteConfig>,
    id: web::Path<String>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let prefix = routes.portal_prefix.as_str();
    let Some(id) = parse_id(&id) else {
        return plain(StatusCode::BAD_REQUEST, "Invalid link ID");
    };

    let status = match service.delete_link(id).await {
        Ok(()) => StatusCode::OK,
        Err(GoLinksError::LinkNotFound(_)) => StatusCode::NOT_FOUND,
        Err(e) => return internal_error(&e),
    };

    match service.list_links(query.q.as_deref()).await {
        Ok(links) => rows_response(status, prefix, links),
        Err(e) => internal_error(&e),
    }
}
