use std::fmt;
use thiserror::Error;

/// One discrete, non-retried step of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Detect,
    Recipe,
    Transform,
    Build,
}

impl Stage {
    /// Stages in execution order
    pub const ALL: [Stage; 4] = [Stage::Detect, Stage::Recipe, Stage::Transform, Stage::Build];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Detect => "detect",
            Stage::Recipe => "recipe",
            Stage::Transform => "transform",
            Stage::Build => "build",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stage that did not succeed, with the reason shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} stage failed: {cause}")]
pub struct StageFailure {
    pub stage: Stage,
    pub cause: String,
}

impl StageFailure {
    pub fn new(stage: Stage, cause: impl Into<String>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }
}

pub type StageResult = Result<(), StageFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = Stage::ALL.iter().map(Stage::name).collect();
        assert_eq!(names, ["detect", "recipe", "transform", "build"]);
    }

    #[test]
    fn test_failure_display() {
        let failure = StageFailure::new(Stage::Build, "'mvn' exited with exit code 1");
        assert_eq!(
            failure.to_string(),
            "build stage failed: 'mvn' exited with exit code 1"
        );
    }
}
