//! Build-system detection from descriptor files in the project root

use crate::pipeline::context::ProjectContext;
use pushgate_core::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Build-system family of the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Maven,
    Gradle,
    Unknown,
}

impl ProjectType {
    pub fn name(&self) -> &'static str {
        match self {
            ProjectType::Maven => "maven",
            ProjectType::Gradle => "gradle",
            ProjectType::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != ProjectType::Unknown
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptor file names, highest priority first
pub const DESCRIPTORS: &[(&str, ProjectType)] = &[
    ("pom.xml", ProjectType::Maven),
    ("build.gradle", ProjectType::Gradle),
    ("build.gradle.kts", ProjectType::Gradle),
];

pub struct ProjectDetector<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ProjectDetector<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// First descriptor present in the root wins; no descriptor is `Unknown`
    pub fn detect(&self, ctx: &ProjectContext) -> ProjectType {
        self.descriptor(ctx)
            .map(|(_, project_type)| project_type)
            .unwrap_or(ProjectType::Unknown)
    }

    /// The winning descriptor file name together with the type it implies
    pub fn descriptor(&self, ctx: &ProjectContext) -> Option<(&'static str, ProjectType)> {
        for (filename, project_type) in DESCRIPTORS {
            let path = ctx.file(filename);
            if self.fs.is_file(&path) {
                debug!("Found {} at {}", filename, path.display());
                return Some((*filename, *project_type));
            }
        }

        debug!("No build descriptor in {}", ctx.root().display());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushgate_core::fs::MockFileSystem;
    use yare::parameterized;

    fn detect_with(files: &[&str]) -> ProjectType {
        let fs = MockFileSystem::new();
        for file in files {
            fs.add_file(file, "");
        }
        ProjectDetector::new(&fs).detect(&ProjectContext::new("/mock"))
    }

    #[parameterized(
        maven_only = { &["pom.xml"], ProjectType::Maven },
        groovy_gradle = { &["build.gradle"], ProjectType::Gradle },
        kotlin_gradle = { &["build.gradle.kts"], ProjectType::Gradle },
        maven_wins_over_gradle = { &["build.gradle", "pom.xml"], ProjectType::Maven },
        both_gradle_dsls = { &["build.gradle", "build.gradle.kts"], ProjectType::Gradle },
        empty = { &[], ProjectType::Unknown },
        settings_only = { &["settings.gradle"], ProjectType::Unknown },
        nested_pom = { &["module/pom.xml"], ProjectType::Unknown },
        wrong_case = { &["POM.xml"], ProjectType::Unknown },
    )]
    fn test_detect(files: &[&str], expected: ProjectType) {
        assert_eq!(detect_with(files), expected);
    }

    #[test]
    fn test_directory_named_like_descriptor_is_ignored() {
        let fs = MockFileSystem::new();
        fs.add_dir("pom.xml");

        let detected = ProjectDetector::new(&fs).detect(&ProjectContext::new("/mock"));
        assert_eq!(detected, ProjectType::Unknown);
    }

    #[test]
    fn test_descriptor_reports_winning_file() {
        let fs = MockFileSystem::new();
        fs.add_file("build.gradle.kts", "");
        let detector = ProjectDetector::new(&fs);

        assert_eq!(
            detector.descriptor(&ProjectContext::new("/mock")),
            Some(("build.gradle.kts", ProjectType::Gradle))
        );
        assert_eq!(
            detector.descriptor(&ProjectContext::new("/elsewhere")),
            None
        );
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProjectType::Gradle).unwrap(),
            "\"gradle\""
        );
        assert_eq!(ProjectType::Maven.to_string(), "maven");
        assert!(!ProjectType::Unknown.is_known());
    }
}
