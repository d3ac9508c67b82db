//! Command-line interface definitions using clap
//!
//! Without a subcommand the binary runs the HTTP server. Link management
//! subcommands work on the database file directly.

use clap::{ArgAction, Parser, Subcommand};

use crate::config::ConfigOverrides;

/// golinks - a go-links redirector with a JSON API and web portal
#[derive(Parser, Debug)]
#[command(name = "golinks")]
#[command(version)]
#[command(about = "A go-links redirector with a JSON API and web portal", long_about = None)]
// -h 留给 --host，帮助只保留长选项
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, short = 'p', global = true)]
    pub port: Option<u16>,

    /// Host to bind (empty = all interfaces)
    #[arg(long, short = 'h', global = true)]
    pub host: Option<String>,

    /// Path to the SQLite database file
    #[arg(long = "db-path", short = 'd', global = true)]
    pub db_path: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help, global = true)]
    pub help: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// 命令行参数转为配置覆盖项
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            port: self.port,
            host: self.host.clone(),
            db_path: self.db_path.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Add a link
    Add {
        /// Alias, e.g. "docs"
        path: String,

        /// Target URL (http or https)
        url: String,
    },

    /// Update a link by id
    Update {
        /// Link id
        id: i64,

        /// New alias
        path: String,

        /// New target URL
        url: String,
    },

    /// Remove a link by id
    Remove {
        /// Link id
        id: i64,
    },

    /// List all links
    List {
        /// Case-insensitive filter on path or url
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_server() {
        let cli = Cli::try_parse_from(["golinks"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_server_flags_short_and_long() {
        let cli = Cli::try_parse_from(["golinks", "-p", "8080", "-h", "127.0.0.1", "-d", "/tmp/x.db"])
            .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.port, Some(8080));
        assert_eq!(overrides.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(overrides.db_path.as_deref(), Some("/tmp/x.db"));

        let cli = Cli::try_parse_from(["golinks", "serve", "--port", "9000", "--db-path", "a.db"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.db_path.as_deref(), Some("a.db"));
    }

    #[test]
    fn test_add_and_update_arguments() {
        let cli = Cli::try_parse_from(["golinks", "add", "g", "https://google.com"]).unwrap();
        match cli.command {
            Some(Commands::Add { path, url }) => {
                assert_eq!(path, "g");
                assert_eq!(url, "https://google.com");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["golinks", "update", "3", "gh", "https://github.com"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Update { id: 3, .. })));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["golinks", "--port", "70000"]).is_err());
        assert!(Cli::try_parse_from(["golinks", "remove", "abc"]).is_err());
    }
}
