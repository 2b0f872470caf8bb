use anyhow::{Context, Result};
use pushgate_core::fs::FileSystem;
use std::path::{Path, PathBuf};

/// The project a run operates on
///
/// Every stage receives the root explicitly instead of reading the process working
/// directory, so relative-path drift in one stage cannot leak into the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `root` to an absolute, existing directory
    pub fn resolve(root: &Path, fs: &dyn FileSystem) -> Result<Self> {
        let root = fs
            .canonicalize(root)
            .with_context(|| {
                format!("Project root does not exist: {}", root.display())
            })?;

        if !fs.is_dir(&root) {
            anyhow::bail!("Project root is not a directory: {}", root.display());
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file directly inside the project root
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushgate_core::fs::{MockFileSystem, RealFileSystem};
    use tempfile::TempDir;

    #[test]
    fn test_resolve_real_directory() {
        let temp = TempDir::new().unwrap();
        let ctx = ProjectContext::resolve(temp.path(), &RealFileSystem::new()).unwrap();

        assert!(ctx.root().is_absolute());
        assert_eq!(ctx.file("pom.xml"), ctx.root().join("pom.xml"));
    }

    #[test]
    fn test_resolve_missing_directory() {
        let fs = MockFileSystem::new();
        let err = ProjectContext::resolve(Path::new("/elsewhere"), &fs).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_file_is_rejected() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", "<project/>");

        let err = ProjectContext::resolve(Path::new("/mock/pom.xml"), &fs).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
