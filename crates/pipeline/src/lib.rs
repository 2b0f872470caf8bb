//! The pre-push pipeline: detect, resolve recipe, transform, build.
//!
//! [`PipelineController`] runs the four stages strictly in order and stops at the first
//! failure. Every stage talks to the outside world through the ports of
//! [`pushgate_core`], so the whole pipeline can be driven against a temporary project
//! root with mock collaborators.

pub mod pipeline;

pub use pipeline::context::ProjectContext;
pub use pipeline::orchestrator::{PipelineController, PipelineOutcome, PipelineState};
pub use pipeline::stage::{Stage, StageFailure, StageResult};
pub use pipeline::stages::build::BuildRunner;
pub use pipeline::stages::detect::{ProjectDetector, ProjectType};
pub use pipeline::stages::recipe::{RecipeError, RecipeProvider, RecipeSource, RecipeSpec};
pub use pipeline::stages::transform::TransformRunner;
