use clap::Parser;

use golinks::cli::Cli;
use golinks::config::{StaticConfig, get_config, init_config};
use golinks::runtime::modes::{self, Mode};
use golinks::system::logging::init_logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match StaticConfig::load_with_overrides(&cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };
    init_config(config);
    let config = get_config();

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            // guard 需要活到进程结束，否则文件日志会丢失
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("Failed to initialize logging: {:#}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = modes::run_server(config).await {
                tracing::error!("{:#}", e);
                eprintln!("Server error: {:#}", e);
                std::process::exit(1);
            }
        }
        Mode::Cli => {
            let Some(command) = cli.command else {
                return;
            };
            if let Err(e) = modes::run_cli(command, config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    }
}
