//! Terminal output for the CLI
//!
//! [`OutputFormatter`] renders `detect` results as text or JSON. [`ConsoleProgress`]
//! turns pipeline progress events into the short status lines a developer sees while a
//! push is held back: normal progress on stdout, failures on stderr.

use anyhow::{Context, Result};
use pushgate_core::progress::{ProgressEvent, ProgressHandler};
use pushgate_pipeline::ProjectType;
use serde::Serialize;
use std::path::PathBuf;

pub const SUCCESS_MESSAGE: &str = "Rewrite successful and build passed. Proceeding with push.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Human,
}

/// Result of `pushgate detect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub project_root: PathBuf,
    pub project_type: ProjectType,
    pub descriptor: Option<String>,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_detection(&self, report: &DetectionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize detection result to JSON"),
            OutputFormat::Human => Ok(Self::format_detection_human(report)),
        }
    }

    fn format_detection_human(report: &DetectionReport) -> String {
        match &report.descriptor {
            Some(descriptor) => format!(
                "{} ({} in {})",
                report.project_type,
                descriptor,
                report.project_root.display()
            ),
            None => format!(
                "{}: no pom.xml, build.gradle or build.gradle.kts in {}",
                report.project_type,
                report.project_root.display()
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Prints pipeline progress for a person watching the push
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress {
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// The line to print for `event`, if any
    pub fn render(&self, event: &ProgressEvent) -> Option<(Stream, String)> {
        let line = match event {
            ProgressEvent::Started { project_root } => {
                format!("pushgate: running pre-push checks in {}", project_root)
            }
            ProgressEvent::StageStarted { stage } => match stage.as_str() {
                "transform" => "Applying OpenRewrite recipe...".to_string(),
                "build" => "Running build...".to_string(),
                _ => return None,
            },
            ProgressEvent::StageCompleted { stage, summary, .. } => match stage.as_str() {
                "detect" => format!("Detected {} project", summary),
                "recipe" => format!("Using recipe {}", summary),
                "transform" => "Rewrite applied".to_string(),
                _ => return None,
            },
            ProgressEvent::StageFailed { stage, cause } => {
                return Some((Stream::Stderr, format!("[{}] {}", stage, cause)));
            }
            ProgressEvent::Completed { passed: true, .. } => SUCCESS_MESSAGE.to_string(),
            ProgressEvent::Completed { passed: false, .. } => {
                return Some((Stream::Stderr, "Push aborted.".to_string()));
            }
        };

        if self.quiet {
            None
        } else {
            Some((Stream::Stdout, line))
        }
    }
}

impl ProgressHandler for ConsoleProgress {
    fn on_progress(&self, event: &ProgressEvent) {
        match self.render(event) {
            Some((Stream::Stdout, line)) => println!("{}", line),
            Some((Stream::Stderr, line)) => eprintln!("{}", line),
            None => {}
        }
    }
}
