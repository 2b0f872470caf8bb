use super::{ExitStatus, Invocation, ProcessRunner, RecordedInvocation};
use crate::error::ProcessError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Records every invocation and answers with a scripted exit code
///
/// A code scripted for a program and argument wins over one scripted for the program
/// alone. Invocations matching neither exit with 0.
#[derive(Default)]
pub struct MockProcessRunner {
    exit_codes: RwLock<HashMap<String, i32>>,
    arg_exit_codes: RwLock<Vec<(String, String, i32)>>,
    unspawnable: RwLock<Vec<String>>,
    calls: RwLock<Vec<RecordedInvocation>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the exit code every run of `program` returns
    pub fn with_exit_code(self, program: &str, code: i32) -> Self {
        self.exit_codes
            .write()
            .unwrap()
            .insert(program.to_string(), code);
        self
    }

    /// Script the exit code of runs of `program` whose arguments include `arg`
    ///
    /// Lets one program pass one call and fail another, e.g. `mvn` rewriting fine
    /// and then failing `clean install`.
    pub fn with_exit_code_for(self, program: &str, arg: &str, code: i32) -> Self {
        self.arg_exit_codes
            .write()
            .unwrap()
            .push((program.to_string(), arg.to_string(), code));
        self
    }

    /// Make `program` fail to spawn, as if it were not installed
    pub fn with_missing_program(self, program: &str) -> Self {
        self.unspawnable.write().unwrap().push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedInvocation> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Number of recorded invocations of `program`
    pub fn count_of(&self, program: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.invocation.program == program)
            .count()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(&self, invocation: &Invocation, working_dir: &Path) -> Result<ExitStatus, ProcessError> {
        self.calls.write().unwrap().push(RecordedInvocation {
            invocation: invocation.clone(),
            working_dir: working_dir.to_path_buf(),
        });

        if self
            .unspawnable
            .read()
            .unwrap()
            .contains(&invocation.program)
        {
            return Err(ProcessError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            });
        }

        let by_arg = self
            .arg_exit_codes
            .read()
            .unwrap()
            .iter()
            .find(|(program, arg, _)| {
                *program == invocation.program && invocation.has_arg(arg)
            })
            .map(|(_, _, code)| *code);
        let code = by_arg.unwrap_or_else(|| {
            self.exit_codes
                .read()
                .unwrap()
                .get(&invocation.program)
                .copied()
                .unwrap_or(0)
        });
        Ok(ExitStatus(code))
    }
}
