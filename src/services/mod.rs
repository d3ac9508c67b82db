//! Service layer for business logic
//!
//! This module provides the link operations shared by every interface
//! (JSON API, web portal, CLI).

mod link_service;

pub use link_service::*;
