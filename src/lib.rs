//! golinks - a go-links redirector
//!
//! Maps short aliases (`/docs`) to full URLs and redirects to them. Links are
//! managed through a JSON API, a server-rendered portal, or the CLI.
//!
//! # Architecture
//! - `storage`: SQLite persistence through sea-orm
//! - `services`: `LinkService`, shared by every management surface
//! - `api`: HTTP routes, handlers and middleware
//! - `interfaces`: CLI commands
//! - `config`: Configuration loading
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
