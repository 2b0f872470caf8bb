use super::{ExitStatus, Invocation, ProcessRunner};
use crate::error::ProcessError;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Spawns real child processes that write straight to our own stdout and stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<ExitStatus, ProcessError> {
        debug!("Spawning `{}` in {}", invocation, working_dir.display());

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        debug!("`{}` finished with {:?}", invocation.program, status.code());

        status
            .code()
            .map(ExitStatus)
            .ok_or_else(|| ProcessError::Terminated {
                program: invocation.program.clone(),
            })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reports_exit_code() {
        let temp = TempDir::new().unwrap();
        let runner = SystemProcessRunner::new();

        let ok = runner
            .run(&Invocation::new("sh").args(["-c", "exit 0"]), temp.path())
            .unwrap();
        assert!(ok.success());

        let failed = runner
            .run(&Invocation::new("sh").args(["-c", "exit 3"]), temp.path())
            .unwrap();
        assert_eq!(failed.code(), 3);
    }

    #[test]
    fn test_runs_in_working_dir() {
        let temp = TempDir::new().unwrap();
        let runner = SystemProcessRunner::new();

        let status = runner
            .run(
                &Invocation::new("sh").args(["-c", "touch marker"]),
                temp.path(),
            )
            .unwrap();

        assert!(status.success());
        assert!(temp.path().join("marker").exists());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let runner = SystemProcessRunner::new();

        let err = runner
            .run(
                &Invocation::new("pushgate-no-such-program-4711"),
                temp.path(),
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }
}
