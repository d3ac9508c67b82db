//! HTTP timing middleware
//!
//! Logs method, endpoint class, status and latency of every request at
//! `debug` level (inside the request span opened by `RequestIdMiddleware`).

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// HTTP timing middleware factory
#[derive(Clone)]
pub struct TimingMiddleware {
    portal_prefix: Arc<str>,
}

impl TimingMiddleware {
    pub fn new(portal_prefix: &str) -> Self {
        Self {
            portal_prefix: Arc::from(portal_prefix),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
            portal_prefix: self.portal_prefix.clone(),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
    portal_prefix: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let start = Instant::now();
        let method = req.method().clone();
        let endpoint = classify_endpoint(req.path(), &self.portal_prefix);

        Box::pin(async move {
            let result = srv.call(req).await;

            let status = match &result {
                Ok(response) => response.status().as_u16(),
                Err(_) => 500,
            };
            debug!(
                method = %method,
                endpoint,
                status,
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "request completed"
            );

            result
        })
    }
}

fn under_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Classify request path into endpoint category
pub fn classify_endpoint(path: &str, portal_prefix: &str) -> &'static str {
    if under_prefix(path, portal_prefix) {
        "portal"
    } else if under_prefix(path, "/api") {
        "api"
    } else if path == "/favicon.ico" {
        "static"
    } else {
        "redirect"
    }
}
