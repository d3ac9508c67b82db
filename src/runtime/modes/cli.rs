//! CLI mode

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::interfaces::cli::{CliError, run_cli_command};

/// Run CLI mode
pub async fn run_cli(command: Commands, config: &StaticConfig) -> Result<(), CliError> {
    run_cli_command(command, config).await
}
