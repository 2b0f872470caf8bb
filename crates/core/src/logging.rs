//! Structured logging setup
//!
//! Log records go to stderr so they never mix with the output a pre-push hook prints
//! on stdout. The subscriber is installed at most once per process; `RUST_LOG` still
//! wins over the configured level when it is set.
//!
//! ```no_run
//! use pushgate_core::logging::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::info!("ready");
//! ```

use crate::config::ConfigError;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for pushgate's own targets
    pub level: Level,

    /// Emit JSON lines instead of human-readable records
    pub use_json: bool,

    /// Include the module target (e.g. pushgate_pipeline::orchestrator)
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with source locations, for CI log collectors
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }
}

const VALID_LEVELS: &str = "trace, debug, info, warn, error";

/// Parses a log level name, case-insensitively
pub fn parse_level(level_str: &str) -> Result<Level, ConfigError> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigError::ValidationFailed(format!(
            "Invalid log level: {}. Valid options: {}",
            level_str, VALID_LEVELS
        ))),
    }
}

/// The level for this process
///
/// Precedence: an explicit `--log-level`, then `-v` (DEBUG) or `-q` (ERROR), then
/// `PUSHGATE_LOG_LEVEL`, then INFO. An unknown name is an error wherever it came from.
pub fn resolve_level(
    explicit: Option<&str>,
    verbose: bool,
    quiet: bool,
) -> Result<Level, ConfigError> {
    if let Some(level_str) = explicit {
        return parse_level(level_str);
    }
    if verbose {
        return Ok(Level::DEBUG);
    }
    if quiet {
        return Ok(Level::ERROR);
    }
    match env::var("PUSHGATE_LOG_LEVEL") {
        Ok(level_str) => parse_level(&level_str),
        Err(_) => Ok(Level::INFO),
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut directives = vec![format!("pushgate={}", level)];
    if env::var("RUST_LOG").is_err() {
        directives.extend(
            ["h2=warn", "hyper=warn", "hyper_util=warn", "reqwest=warn"]
                .iter()
                .map(|d| d.to_string()),
        );
    }

    directives
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            filter.add_directive(directive)
        })
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}
