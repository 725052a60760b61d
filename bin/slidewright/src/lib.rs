//! Slidewright CLI Library
//!
//! Command implementations behind the `slidewright` binary. The binary entry
//! point only parses arguments and dispatches here.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (list, show, lint, validate)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use slidewright::cmd;
//!
//! // Lint every deck, treating issues as failures
//! cmd::lint::run(Path::new("slidewright.toml"), None, true).unwrap();
//! ```

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

pub mod cmd;

// Re-export core types for convenience
pub use slidewright_core::{Config, DocumentRecord};
pub use slidewright_processor::{FsDocumentStore, ProcessingResult, Processor};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// slidewright::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Load configuration from `path` with environment overrides.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
    }

    Config::load_with_env(path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", path.display()))
}

/// Build a filesystem processor from the configuration at `path`.
pub fn processor(path: &Path) -> Result<Processor<FsDocumentStore>> {
    let config = load_config(path)?;
    tracing::debug!(dir = %config.content.dir.display(), "using document directory");
    Ok(Processor::from_config(&config))
}
