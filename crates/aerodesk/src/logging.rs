//! Logging configuration for aerodesk.
//!
//! Verbosity comes from the CLI flags; `RUST_LOG` overrides it.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Default `EnvFilter` directive for this verbosity.
    #[must_use]
    pub fn default_directive(&self) -> String {
        format!("aerodesk={}", self.to_level_filter())
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `verbosity` when set. A subscriber installed earlier
/// (by an embedding program or another test) is left in place.
///
/// ```no_run
/// use aerodesk::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(fmt::layer().with_target(true))
        .try_init();
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()))
}
