//! OpenRewrite execution through the Maven plugin

use super::recipe::RecipeSpec;
use crate::pipeline::context::ProjectContext;
use crate::pipeline::stage::{Stage, StageFailure, StageResult};
use pushgate_core::config::PushgateConfig;
use pushgate_core::process::{Invocation, ProcessRunner};
use tracing::info;

const REWRITE_PLUGIN_GOAL: &str = "org.openrewrite.maven:rewrite-maven-plugin:run";

pub struct TransformRunner<'a> {
    runner: &'a dyn ProcessRunner,
    engine_program: String,
    recipe_artifact: String,
    active_recipe: String,
}

impl<'a> TransformRunner<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, config: &PushgateConfig) -> Self {
        Self {
            runner,
            engine_program: config.engine_program.clone(),
            recipe_artifact: config.recipe_artifact.clone(),
            active_recipe: config.active_recipe.clone(),
        }
    }

    /// Engine command line for `spec`
    ///
    /// A materialized document is activated by the recipe name it declares and located
    /// through `rewrite.configLocation`; an inline identifier is the active recipe itself.
    pub fn invocation(&self, spec: &RecipeSpec) -> Invocation {
        let active = match spec {
            RecipeSpec::Materialized { .. } => self.active_recipe.as_str(),
            RecipeSpec::Inline { recipe } => recipe.as_str(),
        };

        let mut invocation = Invocation::new(&self.engine_program)
            .arg("-U")
            .arg(REWRITE_PLUGIN_GOAL)
            .arg(format!(
                "-Drewrite.recipeArtifactCoordinates={}",
                self.recipe_artifact
            ))
            .arg(format!("-Drewrite.activeRecipes={}", active));

        if let RecipeSpec::Materialized { path, .. } = spec {
            invocation = invocation.arg(format!("-Drewrite.configLocation={}", path.display()));
        }

        invocation.arg("-Drewrite.exportDatatables=true")
    }

    pub fn run(&self, ctx: &ProjectContext, spec: &RecipeSpec) -> StageResult {
        let invocation = self.invocation(spec);
        info!("Running OpenRewrite recipes: {}", spec.describe());

        let status = self
            .runner
            .run(&invocation, ctx.root())
            .map_err(|e| StageFailure::new(Stage::Transform, e.to_string()))?;

        if !status.success() {
            return Err(StageFailure::new(
                Stage::Transform,
                format!("'{}' exited with {}", invocation.program, status),
            ));
        }

        info!("OpenRewrite executed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushgate_core::process::MockProcessRunner;
    use std::path::{Path, PathBuf};

    fn materialized() -> RecipeSpec {
        RecipeSpec::Materialized {
            path: PathBuf::from("/repo/rewrite.yml"),
            source_url: "https://recipes.example.com/recipes.yml".to_string(),
        }
    }

    #[test]
    fn test_materialized_invocation() {
        let runner = MockProcessRunner::new();
        let config = PushgateConfig::builtin();
        let invocation = TransformRunner::new(&runner, &config).invocation(&materialized());

        assert_eq!(invocation.program, "mvn");
        assert_eq!(
            invocation.args,
            vec![
                "-U",
                "org.openrewrite.maven:rewrite-maven-plugin:run",
                "-Drewrite.recipeArtifactCoordinates=org.openrewrite.recipe:rewrite-spring:RELEASE",
                "-Drewrite.activeRecipes=java-spring-recipes",
                "-Drewrite.configLocation=/repo/rewrite.yml",
                "-Drewrite.exportDatatables=true",
            ]
        );
    }

    #[test]
    fn test_inline_invocation_uses_identifier() {
        let runner = MockProcessRunner::new();
        let config = PushgateConfig::builtin();
        let spec = RecipeSpec::Inline {
            recipe: "org.openrewrite.java.RemoveUnusedImports".to_string(),
        };

        let invocation = TransformRunner::new(&runner, &config).invocation(&spec);

        assert!(invocation
            .has_arg("-Drewrite.activeRecipes=org.openrewrite.java.RemoveUnusedImports"));
        assert!(invocation.has_arg("-Drewrite.exportDatatables=true"));
        assert!(!invocation
            .args
            .iter()
            .any(|a| a.starts_with("-Drewrite.configLocation")));
    }

    #[test]
    fn test_run_in_project_root() {
        let runner = MockProcessRunner::new();
        let config = PushgateConfig::builtin();

        TransformRunner::new(&runner, &config)
            .run(&ProjectContext::new("/repo"), &materialized())
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].working_dir, Path::new("/repo"));
    }

    #[test]
    fn test_non_zero_exit_is_failure() {
        let runner = MockProcessRunner::new().with_exit_code("mvn", 1);
        let config = PushgateConfig::builtin();

        let failure = TransformRunner::new(&runner, &config)
            .run(&ProjectContext::new("/repo"), &materialized())
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Transform);
        assert!(failure.cause.contains("exit code 1"));
    }

    #[test]
    fn test_missing_engine_is_failure() {
        let runner = MockProcessRunner::new().with_missing_program("mvn");
        let config = PushgateConfig::builtin();

        let failure = TransformRunner::new(&runner, &config)
            .run(&ProjectContext::new("/repo"), &materialized())
            .unwrap_err();

        assert_eq!(failure.stage, Stage::Transform);
        assert!(failure.cause.contains("Failed to spawn"));
    }
}
