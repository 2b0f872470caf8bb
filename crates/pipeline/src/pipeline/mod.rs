pub mod context;
pub mod orchestrator;
pub mod stage;
pub mod stages;

pub use context::ProjectContext;
pub use orchestrator::{PipelineController, PipelineOutcome, PipelineState};
pub use stage::{Stage, StageFailure, StageResult};
