//! HTTP layer: middleware, route table and request handlers

pub mod middleware;
pub mod routes;
pub mod services;

pub use routes::{api_routes, configure_routes};
