//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while the pipeline runs
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Pipeline started for a project root
    Started { project_root: String },

    /// A stage is about to run
    StageStarted { stage: String },

    /// A stage finished successfully; `summary` names what it produced or ran
    StageCompleted {
        stage: String,
        summary: String,
        duration: Duration,
    },

    /// A stage failed; no further stage will run
    StageFailed { stage: String, cause: String },

    /// Pipeline reached a terminal state
    Completed { passed: bool, total_time: Duration },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// Handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        NoOpHandler.on_progress(&ProgressEvent::Started {
            project_root: "/repo".to_string(),
        });
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::StageStarted {
            stage: "detect".to_string(),
        });
        handler.on_progress(&ProgressEvent::StageCompleted {
            stage: "detect".to_string(),
            summary: "maven".to_string(),
            duration: Duration::from_millis(3),
        });
        handler.on_progress(&ProgressEvent::Completed {
            passed: true,
            total_time: Duration::from_secs(42),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
