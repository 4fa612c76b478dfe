//! `aerodesk` - CLI for the contact-form service
//!
//! Runs the HTTP service and inspects its configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use aerodesk::cli::{Cli, Command, ConfigCommand, ServeCommand};
use aerodesk::{init_logging, Config, Result};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(&serve_cmd, config)?,
        Command::Config(config_cmd) => handle_config(&config, cli.config, config_cmd)?,
    }
    Ok(())
}

fn handle_serve(cmd: &ServeCommand, config: Config) -> Result<()> {
    let config = cmd.apply(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(aerodesk::server::serve(&config))?;
    Ok(())
}

fn handle_config(
    config: &Config,
    config_path: Option<std::path::PathBuf>,
    cmd: ConfigCommand,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Bind address:       {}", config.server.bind_addr);
                println!("  Max body bytes:     {}", config.server.max_body_bytes);
                println!("  Shutdown grace ms:  {}", config.server.shutdown_grace_ms);
                println!();
                println!("[Store]");
                if config.store.max_submissions == 0 {
                    println!("  Max submissions:    unlimited");
                } else {
                    println!("  Max submissions:    {}", config.store.max_submissions);
                }
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
