//! Core building blocks for pushgate
//!
//! Everything the pre-push pipeline touches outside its own memory goes through one of
//! three ports so that the pipeline can run against injected project roots in tests:
//!
//! - [`fs::FileSystem`]: descriptor probes, recipe file writes and cleanup
//! - [`process::ProcessRunner`]: the transformation engine and the build tool
//! - [`fetch::DocumentFetcher`]: the remote recipe document
//!
//! Configuration, the shared error types, progress events and logging setup live here
//! as well so the CLI and the pipeline agree on them.

pub mod config;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod logging;
pub mod process;
pub mod progress;

pub use config::{CleanupPolicy, ConfigError, PushgateConfig, RecipeStrategy};
pub use error::{FetchError, ProcessError};
pub use fetch::{DocumentFetcher, HttpFetcher, MockFetcher};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use logging::{init_logging, parse_level, resolve_level, LoggingConfig};
pub use process::{Invocation, MockProcessRunner, ProcessRunner, SystemProcessRunner};
pub use progress::{LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
