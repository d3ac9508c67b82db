//! CLI interface module
//!
//! Offline link management. Commands open the configured database and go
//! through `LinkService`, so they apply the same validation as the HTTP
//! surfaces.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::GoLinksError;
use crate::services::LinkService;
use crate::storage::StorageFactory;
use commands::{add_link, config_generate, list_links, remove_link, update_link};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ConfigError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ConfigError(msg) => format!("Config error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ConfigError(msg) => {
                format!("{} {}", "Config error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<GoLinksError> for CliError {
    fn from(err: GoLinksError) -> Self {
        match err {
            // 用户输入导致的错误只展示规则本身
            GoLinksError::Validation(_)
            | GoLinksError::LinkNotFound(_)
            | GoLinksError::LinkAlreadyExists(_) => CliError::CommandError(err.message()),
            GoLinksError::Configuration(msg) => CliError::ConfigError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::CommandError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // config generate 不需要数据库
    if let Commands::Config { action } = cmd {
        let ConfigCommands::Generate { output_path, force } = action;
        return config_generate(output_path, force).await;
    }

    let storage = StorageFactory::create(&config.database).await?;
    let service = LinkService::new(Arc::clone(&storage));

    let result = match cmd {
        Commands::Add { path, url } => add_link(&service, path, url).await,
        Commands::Update { id, path, url } => update_link(&service, id, path, url).await,
        Commands::Remove { id } => remove_link(&service, id).await,
        Commands::List { search } => list_links(&service, search).await,
        Commands::Serve | Commands::Config { .. } => Err(CliError::CommandError(
            "not a link management command".to_string(),
        )),
    };

    if let Err(e) = storage.close().await {
        warn!("Failed to close storage: {}", e);
    }
    result
}
