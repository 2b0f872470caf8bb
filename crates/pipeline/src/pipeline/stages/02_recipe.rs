//! Recipe resolution: download the recipe document or use a fixed identifier

use crate::pipeline::context::ProjectContext;
use pushgate_core::config::{PushgateConfig, RecipeStrategy};
use pushgate_core::error::FetchError;
use pushgate_core::fetch::DocumentFetcher;
use pushgate_core::fs::FileSystem;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// The transformation to apply; exactly one representation per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeSpec {
    /// A recipe document written into the project, with the URL it came from
    Materialized { path: PathBuf, source_url: String },
    /// A recipe identifier passed straight to the engine
    Inline { recipe: String },
}

impl RecipeSpec {
    pub fn materialized_path(&self) -> Option<&Path> {
        match self {
            RecipeSpec::Materialized { path, .. } => Some(path),
            RecipeSpec::Inline { .. } => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RecipeSpec::Materialized { path, source_url } => {
                format!("{} (from {})", path.display(), source_url)
            }
            RecipeSpec::Inline { recipe } => recipe.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Failed to fetch recipe document from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Recipe document request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("I/O error on recipe document {location}: {message}")]
    Io { location: String, message: String },
}

impl From<FetchError> for RecipeError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network { url, message } => RecipeError::Fetch { url, message },
            FetchError::HttpStatus { url, status } => RecipeError::HttpStatus { url, status },
            FetchError::Body { url, message } => RecipeError::Io {
                location: url,
                message,
            },
        }
    }
}

/// Where the recipe comes from, fixed per deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeSource {
    Remote { url: String, file_name: String },
    Static { recipe: String },
}

impl RecipeSource {
    pub fn from_config(config: &PushgateConfig) -> Self {
        match config.strategy {
            RecipeStrategy::Remote => RecipeSource::Remote {
                url: config.recipe_url.clone(),
                file_name: config.recipe_file.clone(),
            },
            RecipeStrategy::Static => RecipeSource::Static {
                recipe: config.active_recipe.clone(),
            },
        }
    }
}

pub struct RecipeProvider<'a> {
    source: RecipeSource,
    fetcher: &'a dyn DocumentFetcher,
    fs: &'a dyn FileSystem,
}

impl<'a> RecipeProvider<'a> {
    pub fn new(
        source: RecipeSource,
        fetcher: &'a dyn DocumentFetcher,
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            source,
            fetcher,
            fs,
        }
    }

    /// Produce the recipe for this run; the remote strategy always re-downloads
    pub fn resolve(&self, ctx: &ProjectContext) -> Result<RecipeSpec, RecipeError> {
        match &self.source {
            RecipeSource::Static { recipe } => {
                debug!("Using static recipe {}", recipe);
                Ok(RecipeSpec::Inline {
                    recipe: recipe.clone(),
                })
            }
            RecipeSource::Remote { url, file_name } => {
                let body = self.fetcher.fetch(url)?;
                let path = ctx.file(file_name);

                self.fs.write(&path, &body).map_err(|e| RecipeError::Io {
                    location: path.display().to_string(),
                    message: format!("{:#}", e),
                })?;

                info!("Downloaded recipe file from {} to {}", url, path.display());
                Ok(RecipeSpec::Materialized {
                    path,
                    source_url: url.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushgate_core::fetch::MockFetcher;
    use pushgate_core::fs::MockFileSystem;

    const URL: &str = "https://recipes.example.com/recipes.yml";

    fn remote() -> RecipeSource {
        RecipeSource::Remote {
            url: URL.to_string(),
            file_name: "rewrite.yml".to_string(),
        }
    }

    #[test]
    fn test_remote_writes_body_verbatim() {
        let fs = MockFileSystem::new();
        let fetcher =
            MockFetcher::new().with_body(URL, "type: specs.openrewrite.org/v1beta/recipe\n");

        let spec = RecipeProvider::new(remote(), &fetcher, &fs)
            .resolve(&ProjectContext::new("/mock"))
            .unwrap();

        assert_eq!(
            spec,
            RecipeSpec::Materialized {
                path: PathBuf::from("/mock/rewrite.yml"),
                source_url: URL.to_string(),
            }
        );
        assert_eq!(
            fs.read_to_string(Path::new("/mock/rewrite.yml")).unwrap(),
            "type: specs.openrewrite.org/v1beta/recipe\n"
        );
    }

    #[test]
    fn test_remote_overwrites_stale_file() {
        let fs = MockFileSystem::new();
        fs.add_file("rewrite.yml", "stale");
        let fetcher = MockFetcher::new().with_body(URL, "fresh");

        RecipeProvider::new(remote(), &fetcher, &fs)
            .resolve(&ProjectContext::new("/mock"))
            .unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("/mock/rewrite.yml")).unwrap(),
            "fresh"
        );
        assert_eq!(fetcher.request_count(), 1);
    }

    #[test]
    fn test_remote_http_status_error() {
        let fs = MockFileSystem::new();
        let fetcher = MockFetcher::new().with_status(URL, 503);

        let err = RecipeProvider::new(remote(), &fetcher, &fs)
            .resolve(&ProjectContext::new("/mock"))
            .unwrap_err();

        assert!(matches!(err, RecipeError::HttpStatus { status: 503, .. }));
        assert!(!fs.exists(Path::new("/mock/rewrite.yml")));
    }

    #[test]
    fn test_remote_network_error() {
        let fs = MockFileSystem::new();
        let fetcher = MockFetcher::new().with_network_error(URL);

        let err = RecipeProvider::new(remote(), &fetcher, &fs)
            .resolve(&ProjectContext::new("/mock"))
            .unwrap_err();

        assert!(matches!(err, RecipeError::Fetch { .. }));
    }

    #[test]
    fn test_remote_body_read_error_is_io() {
        let fs = MockFileSystem::new();
        let fetcher = MockFetcher::new().with_broken_body(URL);

        let err = RecipeProvider::new(remote(), &fetcher, &fs)
            .resolve(&ProjectContext::new("/mock"))
            .unwrap_err();

        assert!(matches!(err, RecipeError::Io { .. }));
    }

    #[test]
    fn test_remote_write_error_is_io() {
        let fs = MockFileSystem::new();
        fs.set_read_only(true);
        let fetcher = MockFetcher::new().with_body(URL, "doc");

        let err = RecipeProvider::new(remote(), &fetcher, &fs)
            .resolve(&ProjectContext::new("/mock"))
            .unwrap_err();

        match err {
            RecipeError::Io { location, .. } => assert_eq!(location, "/mock/rewrite.yml"),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_static_has_no_side_effects() {
        let fs = MockFileSystem::new();
        let fetcher = MockFetcher::new();
        let source = RecipeSource::Static {
            recipe: "org.openrewrite.java.spring.boot3.UpgradeSpringBoot_3_2".to_string(),
        };

        let spec = RecipeProvider::new(source, &fetcher, &fs)
            .resolve(&ProjectContext::new("/mock"))
            .unwrap();

        assert_eq!(spec.materialized_path(), None);
        assert_eq!(
            spec.describe(),
            "org.openrewrite.java.spring.boot3.UpgradeSpringBoot_3_2"
        );
        assert_eq!(fetcher.request_count(), 0);
        assert!(!fs.exists(Path::new("/mock/rewrite.yml")));
    }

    #[test]
    fn test_source_from_config() {
        let config = PushgateConfig::builtin();
        assert!(matches!(
            RecipeSource::from_config(&config),
            RecipeSource::Remote { ref file_name, .. } if file_name == "rewrite.yml"
        ));

        let config = PushgateConfig {
            strategy: RecipeStrategy::Static,
            ..PushgateConfig::builtin()
        };
        assert_eq!(
            RecipeSource::from_config(&config),
            RecipeSource::Static {
                recipe: "java-spring-recipes".to_string()
            }
        );
    }
}
