use super::context::ProjectContext;
use super::stage::{Stage, StageFailure};
use super::stages::build::BuildRunner;
use super::stages::detect::{ProjectDetector, ProjectType};
use super::stages::recipe::{RecipeProvider, RecipeSource, RecipeSpec};
use super::stages::transform::TransformRunner;
use pushgate_core::config::{CleanupPolicy, PushgateConfig};
use pushgate_core::fetch::DocumentFetcher;
use pushgate_core::fs::FileSystem;
use pushgate_core::process::ProcessRunner;
use pushgate_core::progress::{ProgressEvent, ProgressHandler};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Where a run currently stands
///
/// `Passed` and `Failed` are terminal; every other state carries what the next
/// stage needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Detected(ProjectType),
    RecipeResolved(ProjectType, RecipeSpec),
    Transformed(ProjectType, RecipeSpec),
    Built(RecipeSpec),
    Passed,
    Failed(StageFailure),
}

impl PipelineState {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Detected(..) => "detected",
            PipelineState::RecipeResolved(..) => "recipe-resolved",
            PipelineState::Transformed(..) => "transformed",
            PipelineState::Built(..) => "built",
            PipelineState::Passed => "passed",
            PipelineState::Failed(..) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Passed | PipelineState::Failed(_))
    }
}

/// Terminal result of a whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Passed,
    FailedAt(StageFailure),
}

impl PipelineOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, PipelineOutcome::Passed)
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            PipelineOutcome::Passed => None,
            PipelineOutcome::FailedAt(failure) => Some(failure.stage),
        }
    }

    /// 0 lets the push proceed; every failure maps to the same non-zero code
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineOutcome::Passed => 0,
            PipelineOutcome::FailedAt(_) => 1,
        }
    }
}

pub struct PipelineController {
    config: PushgateConfig,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn ProcessRunner>,
    fetcher: Arc<dyn DocumentFetcher>,
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl PipelineController {
    pub fn new(
        config: PushgateConfig,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn ProcessRunner>,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        Self {
            config,
            fs,
            runner,
            fetcher,
            progress_handler: None,
        }
    }

    pub fn with_progress(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.progress_handler = Some(handler);
        self
    }

    /// Run every stage once, in order, stopping at the first failure
    pub fn execute(&self, ctx: &ProjectContext) -> PipelineOutcome {
        let start = Instant::now();
        info!("Starting pre-push pipeline for: {}", ctx.root().display());
        self.emit(ProgressEvent::Started {
            project_root: ctx.root().display().to_string(),
        });

        let mut state = PipelineState::Init;
        while !state.is_terminal() {
            let from = state.name();
            state = self.advance(ctx, state);
            debug!("Pipeline state: {} -> {}", from, state.name());
        }

        let outcome = match state {
            PipelineState::Failed(failure) => {
                debug!(
                    "Pipeline failed at {} stage: {}",
                    failure.stage, failure.cause
                );
                PipelineOutcome::FailedAt(failure)
            }
            _ => PipelineOutcome::Passed,
        };

        info!("Pipeline finished in {:?}", start.elapsed());
        self.emit(ProgressEvent::Completed {
            passed: outcome.is_passed(),
            total_time: start.elapsed(),
        });

        outcome
    }

    /// Perform the single transition out of a non-terminal state
    pub fn advance(&self, ctx: &ProjectContext, state: PipelineState) -> PipelineState {
        match state {
            PipelineState::Init => {
                let detected = self.run_stage(
                    Stage::Detect,
                    || match ProjectDetector::new(self.fs.as_ref()).detect(ctx) {
                        ProjectType::Unknown => Err(StageFailure::new(
                            Stage::Detect,
                            format!(
                                "Not a recognized project: no pom.xml, build.gradle or \
                                 build.gradle.kts in {}",
                                ctx.root().display()
                            ),
                        )),
                        known => Ok(known),
                    },
                    |project_type| project_type.to_string(),
                );
                match detected {
                    Ok(project_type) => PipelineState::Detected(project_type),
                    Err(failure) => PipelineState::Failed(failure),
                }
            }
            PipelineState::Detected(project_type) => {
                let provider = RecipeProvider::new(
                    RecipeSource::from_config(&self.config),
                    self.fetcher.as_ref(),
                    self.fs.as_ref(),
                );
                let resolved = self.run_stage(
                    Stage::Recipe,
                    || {
                        provider
                            .resolve(ctx)
                            .map_err(|e| StageFailure::new(Stage::Recipe, e.to_string()))
                    },
                    RecipeSpec::describe,
                );
                match resolved {
                    Ok(spec) => PipelineState::RecipeResolved(project_type, spec),
                    Err(failure) => PipelineState::Failed(failure),
                }
            }
            PipelineState::RecipeResolved(project_type, spec) => {
                let transform = TransformRunner::new(self.runner.as_ref(), &self.config);
                let summary = transform.invocation(&spec).to_string();
                match self.run_stage(
                    Stage::Transform,
                    || transform.run(ctx, &spec),
                    |_| summary.clone(),
                ) {
                    Ok(()) => PipelineState::Transformed(project_type, spec),
                    Err(failure) => PipelineState::Failed(failure),
                }
            }
            PipelineState::Transformed(project_type, spec) => {
                let build = BuildRunner::new(self.runner.as_ref(), self.fs.as_ref());
                match self.run_stage(
                    Stage::Build,
                    || build.run(ctx, project_type),
                    |_| project_type.to_string(),
                ) {
                    Ok(()) => PipelineState::Built(spec),
                    Err(failure) => PipelineState::Failed(failure),
                }
            }
            PipelineState::Built(spec) => {
                self.cleanup(&spec);
                PipelineState::Passed
            }
            terminal => terminal,
        }
    }

    fn run_stage<T>(
        &self,
        stage: Stage,
        body: impl FnOnce() -> Result<T, StageFailure>,
        summarize: impl FnOnce(&T) -> String,
    ) -> Result<T, StageFailure> {
        info!("Stage: {}", stage);
        self.emit(ProgressEvent::StageStarted {
            stage: stage.to_string(),
        });

        let stage_start = Instant::now();
        match body() {
            Ok(value) => {
                let summary = summarize(&value);
                debug!("Stage {} complete: {}", stage, summary);
                self.emit(ProgressEvent::StageCompleted {
                    stage: stage.to_string(),
                    summary,
                    duration: stage_start.elapsed(),
                });
                Ok(value)
            }
            Err(failure) => {
                self.emit(ProgressEvent::StageFailed {
                    stage: stage.to_string(),
                    cause: failure.cause.clone(),
                });
                Err(failure)
            }
        }
    }

    fn cleanup(&self, spec: &RecipeSpec) {
        let Some(path) = spec.materialized_path() else {
            return;
        };

        match self.config.cleanup {
            CleanupPolicy::Never => {
                debug!("Keeping recipe file {} (cleanup: never)", path.display());
            }
            CleanupPolicy::OnSuccess => match self.fs.remove_file(path) {
                Ok(()) => debug!("Removed recipe file {}", path.display()),
                Err(e) => warn!("Failed to remove recipe file {}: {:#}", path.display(), e),
            },
        }
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use pushgate_core::fetch::MockFetcher;
    use pushgate_core::fs::MockFileSystem;
    use pushgate_core::process::MockProcessRunner;

    mock! {
        Handler {}
        impl ProgressHandler for Handler {
            fn on_progress(&self, event: &ProgressEvent);
        }
    }

    fn controller(fs: MockFileSystem, runner: MockProcessRunner) -> PipelineController {
        PipelineController::new(
            PushgateConfig::builtin(),
            Arc::new(fs),
            Arc::new(runner),
            Arc::new(MockFetcher::new()),
        )
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(PipelineOutcome::Passed.exit_code(), 0);
        for stage in Stage::ALL {
            let outcome = PipelineOutcome::FailedAt(StageFailure::new(stage, "boom"));
            assert_eq!(outcome.exit_code(), 1);
            assert_eq!(outcome.failed_stage(), Some(stage));
        }
    }

    #[test]
    fn test_terminal_states_are_absorbing() {
        let controller = controller(MockFileSystem::new(), MockProcessRunner::new());
        let ctx = ProjectContext::new("/mock");

        let failed = PipelineState::Failed(StageFailure::new(Stage::Build, "boom"));
        assert_eq!(controller.advance(&ctx, failed.clone()), failed);
        assert_eq!(
            controller.advance(&ctx, PipelineState::Passed),
            PipelineState::Passed
        );
    }

    #[test]
    fn test_init_advances_to_detected() {
        let fs = MockFileSystem::new();
        fs.add_file("build.gradle.kts", "plugins {}");
        let controller = controller(fs, MockProcessRunner::new());

        let state = controller.advance(&ProjectContext::new("/mock"), PipelineState::Init);
        assert_eq!(state, PipelineState::Detected(ProjectType::Gradle));
        assert_eq!(state.name(), "detected");
    }

    #[test]
    fn test_built_with_inline_recipe_passes_without_cleanup() {
        let controller = controller(MockFileSystem::new(), MockProcessRunner::new());
        let spec = RecipeSpec::Inline {
            recipe: "org.openrewrite.java.RemoveUnusedImports".to_string(),
        };

        let state = controller.advance(&ProjectContext::new("/mock"), PipelineState::Built(spec));
        assert_eq!(state, PipelineState::Passed);
    }

    #[test]
    fn test_detection_failure_events() {
        let mut handler = MockHandler::new();
        handler
            .expect_on_progress()
            .withf(|e| matches!(e, ProgressEvent::Started { .. }))
            .times(1)
            .return_const(());
        handler
            .expect_on_progress()
            .withf(|e| {
                matches!(e, ProgressEvent::StageStarted { stage } if stage.as_str() == "detect")
            })
            .times(1)
            .return_const(());
        handler
            .expect_on_progress()
            .withf(|e| {
                matches!(
                    e,
                    ProgressEvent::StageFailed { stage, .. } if stage.as_str() == "detect"
                )
            })
            .times(1)
            .return_const(());
        handler
            .expect_on_progress()
            .withf(|e| matches!(e, ProgressEvent::Completed { passed: false, .. }))
            .times(1)
            .return_const(());

        let controller = controller(MockFileSystem::new(), MockProcessRunner::new())
            .with_progress(Arc::new(handler));

        let outcome = controller.execute(&ProjectContext::new("/mock"));
        assert_eq!(outcome.failed_stage(), Some(Stage::Detect));
    }

    #[test]
    fn test_success_reports_every_stage() {
        let mut handler = MockHandler::new();
        handler
            .expect_on_progress()
            .withf(|e| matches!(e, ProgressEvent::StageCompleted { .. }))
            .times(4)
            .return_const(());
        handler
            .expect_on_progress()
            .withf(|e| {
                !matches!(
                    e,
                    ProgressEvent::StageCompleted { .. } | ProgressEvent::StageFailed { .. }
                )
            })
            .times(6)
            .return_const(());

        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", "<project/>");
        let config = PushgateConfig {
            strategy: pushgate_core::config::RecipeStrategy::Static,
            ..PushgateConfig::builtin()
        };
        let controller = PipelineController::new(
            config,
            Arc::new(fs),
            Arc::new(MockProcessRunner::new()),
            Arc::new(MockFetcher::new()),
        )
        .with_progress(Arc::new(handler));

        assert!(controller
            .execute(&ProjectContext::new("/mock"))
            .is_passed());
    }
}
