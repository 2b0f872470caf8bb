pub mod commands;
pub mod hook;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, InstallHookArgs, RunArgs};
pub use hook::{install_pre_push_hook, HookError};
pub use output::{ConsoleProgress, DetectionReport, OutputFormat, OutputFormatter};
