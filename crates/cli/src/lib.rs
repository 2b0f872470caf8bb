//! Command-line front end for the pushgate pre-push pipeline

pub mod cli;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
