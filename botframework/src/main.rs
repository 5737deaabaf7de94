//! Binary: `run` polls Telegram, `check` validates the config.

use anyhow::Result;
use botframework::{build_manager, describe_commands, fallback_tracing, load_config, run_bot, Cli, Commands};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, token } => {
            let config = match load_config(config, token) {
                Ok(config) => config,
                Err(e) => {
                    let _guard = fallback_tracing();
                    error!(error = %e, "Invalid configuration");
                    std::process::exit(1);
                }
            };
            run_bot(config).await
        }
        Commands::Check { config } => {
            let _guard = fallback_tracing();
            let config = match load_config(config, None) {
                Ok(config) => config,
                Err(e) => {
                    error!(error = %e, "Invalid configuration");
                    std::process::exit(1);
                }
            };
            build_manager(&config)?;
            println!("Configuration OK");
            for line in describe_commands(&config) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}
