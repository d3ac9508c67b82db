//! JSON API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::GoLinksError;

/// 错误响应体：`{"error": "<状态文本>", "message": "<详情>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// 构建错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        error: status.canonical_reason().unwrap_or("Unknown").to_string(),
        message: message.into(),
    })
}

/// 从 GoLinksError 构建错误响应
///
/// 5xx 只记录日志，不把底层错误文本返回给客户端。
pub fn error_from_golinks(err: &GoLinksError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("API request failed: {}", err);
        return error_response(status, "internal server error");
    }
    error_response(status, err.message())
}

/// 解析路径中的整数 id
pub fn parse_link_id(raw: &str) -> Result<i64, HttpResponse> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "invalid link id"))
}

/// JSON 请求体配置：语法错误、类型错误、Content-Type 不对都返回 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let resp = error_response(StatusCode::BAD_REQUEST, "invalid request body");
            actix_web::error::InternalError::from_response(err, resp).into()
        })
}

pub async fn method_not_allowed() -> HttpResponse {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

pub async fn api_not_found() -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, "not found")
}
