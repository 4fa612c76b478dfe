//! Command-line interface for aerodesk.
//!
//! This module provides the CLI structure for the `aerodesk` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ServeCommand};

use crate::config::Config;
use crate::logging::Verbosity;

/// aerodesk - contact-form backend for the UAV systems site
///
/// Validates contact-form submissions and keeps them in memory for the
/// lifetime of the process.
#[derive(Debug, Parser)]
#[command(name = "aerodesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

impl ServeCommand {
    /// Apply command-line overrides on top of loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden configuration is invalid.
    pub fn apply(&self, mut config: Config) -> crate::Result<Config> {
        if let Some(bind) = &self.bind {
            config.server.bind_addr.clone_from(bind);
        }
        if let Some(max) = self.max_submissions {
            config.store.max_submissions = max;
        }
        config.validate()?;
        Ok(config)
    }
}
