//! Build and test with the project's own build system

use super::detect::ProjectType;
use crate::pipeline::context::ProjectContext;
use crate::pipeline::stage::{Stage, StageFailure, StageResult};
use pushgate_core::fs::FileSystem;
use pushgate_core::process::{Invocation, ProcessRunner};
use std::path::Path;
use tracing::info;

#[cfg(windows)]
const MAVEN_WRAPPER: &str = "mvnw.cmd";
#[cfg(not(windows))]
const MAVEN_WRAPPER: &str = "mvnw";

#[cfg(windows)]
const GRADLE_WRAPPER: &str = "gradlew.bat";
#[cfg(not(windows))]
const GRADLE_WRAPPER: &str = "gradlew";

pub struct BuildRunner<'a> {
    runner: &'a dyn ProcessRunner,
    fs: &'a dyn FileSystem,
}

impl<'a> BuildRunner<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, fs: &'a dyn FileSystem) -> Self {
        Self { runner, fs }
    }

    /// Build command for `project_type` rooted at the absolute `root`
    ///
    /// Maven projects shipping a wrapper are tested through it, otherwise with a full
    /// `mvn clean install`. Gradle projects always go through their wrapper.
    pub fn invocation(&self, root: &Path, project_type: ProjectType) -> Option<Invocation> {
        match project_type {
            ProjectType::Maven => {
                let wrapper = root.join(MAVEN_WRAPPER);
                if self.fs.is_file(&wrapper) {
                    Some(Invocation::new(wrapper.display().to_string()).arg("test"))
                } else {
                    Some(Invocation::new("mvn").args(["clean", "install"]))
                }
            }
            ProjectType::Gradle => Some(
                Invocation::new(root.join(GRADLE_WRAPPER).display().to_string()).arg("test"),
            ),
            ProjectType::Unknown => None,
        }
    }

    pub fn run(&self, ctx: &ProjectContext, project_type: ProjectType) -> StageResult {
        let root = self.fs.canonicalize(ctx.root()).map_err(|e| {
            StageFailure::new(
                Stage::Build,
                format!("Cannot resolve project root: {:#}", e),
            )
        })?;

        let invocation = self.invocation(&root, project_type).ok_or_else(|| {
            StageFailure::new(
                Stage::Build,
                format!("Unsupported project type: {}", project_type),
            )
        })?;

        info!("Building {} project: {}", project_type, invocation);

        let status = self
            .runner
            .run(&invocation, &root)
            .map_err(|e| StageFailure::new(Stage::Build, e.to_string()))?;

        if !status.success() {
            return Err(StageFailure::new(
                Stage::Build,
                format!("'{}' exited with {}", invocation.program, status),
            ));
        }

        Ok(())
    }
}
