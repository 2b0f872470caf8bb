use super::{ProgressEvent, ProgressHandler};
use tracing::{error, info};

/// Forwards progress events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { project_root } => {
                info!(project_root = %project_root, "Pre-push pipeline started");
            }
            ProgressEvent::StageStarted { stage } => {
                info!(stage = %stage, "Stage started");
            }
            ProgressEvent::StageCompleted {
                stage,
                summary,
                duration,
            } => {
                info!(
                    stage = %stage,
                    summary = %summary,
                    duration_ms = duration.as_millis() as u64,
                    "Stage completed"
                );
            }
            ProgressEvent::StageFailed { stage, cause } => {
                error!(stage = %stage, cause = %cause, "Stage failed");
            }
            ProgressEvent::Completed { passed, total_time } => {
                info!(
                    passed = *passed,
                    total_ms = total_time.as_millis() as u64,
                    "Pre-push pipeline finished"
                );
            }
        }
    }
}
