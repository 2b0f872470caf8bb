//! External process execution
//!
//! The transformation engine and the build tool are both plain child processes whose
//! stdout and stderr belong to the operator's terminal. [`ProcessRunner`] is the seam the
//! pipeline calls through; [`SystemProcessRunner`] spawns for real, [`MockProcessRunner`]
//! records what would have been spawned.

mod mock;
mod system;

pub use mock::MockProcessRunner;
pub use system::SystemProcessRunner;

use crate::error::ProcessError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Program plus arguments for one child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Exit code of a finished child process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    pub fn success(&self) -> bool {
        self.0 == 0
    }

    pub fn code(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit code {}", self.0)
    }
}

/// A single blocking process execution with inherited output streams
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<ExitStatus, ProcessError>;
}

/// One call observed by a runner, kept for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    pub invocation: Invocation,
    pub working_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display_quotes_whitespace() {
        let invocation = Invocation::new("mvn")
            .arg("clean")
            .arg("-Dmessage=hello world");
        assert_eq!(invocation.to_string(), "mvn clean '-Dmessage=hello world'");
    }

    #[test]
    fn test_invocation_builder() {
        let invocation = Invocation::new("./gradlew").args(["test", "--info"]);
        assert_eq!(invocation.program, "./gradlew");
        assert!(invocation.has_arg("test"));
        assert!(!invocation.has_arg("build"));
    }

    #[test]
    fn test_exit_status() {
        assert!(ExitStatus(0).success());
        assert!(!ExitStatus(2).success());
        assert_eq!(ExitStatus(2).to_string(), "exit code 2");
    }
}
