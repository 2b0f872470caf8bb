use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_RECIPE_URL: &str =
    "https://raw.githubusercontent.com/sshehrozali/openrewrite-tool/main/java-spring-recipes/recipes.yml";
pub const DEFAULT_RECIPE_FILE: &str = "rewrite.yml";
pub const DEFAULT_ACTIVE_RECIPE: &str = "java-spring-recipes";
pub const DEFAULT_RECIPE_ARTIFACT: &str = "org.openrewrite.recipe:rewrite-spring:RELEASE";
pub const DEFAULT_ENGINE_PROGRAM: &str = "mvn";

/// Where the recipe configuration comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeStrategy {
    /// Download the recipe document and hand the engine a local copy
    Remote,
    /// Hand the engine a fixed recipe identifier
    Static,
}

impl FromStr for RecipeStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(RecipeStrategy::Remote),
            "static" => Ok(RecipeStrategy::Static),
            _ => Err(ConfigError::ParseError {
                field: "recipe strategy".to_string(),
                error: format!("'{}' is not one of: remote, static", s),
            }),
        }
    }
}

/// What happens to a downloaded recipe file once the run is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupPolicy {
    /// Delete it when the pipeline passes, keep it on failure
    OnSuccess,
    /// Always keep it
    Never,
}

impl FromStr for CleanupPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on-success" | "on_success" => Ok(CleanupPolicy::OnSuccess),
            "never" => Ok(CleanupPolicy::Never),
            _ => Err(ConfigError::ParseError {
                field: "cleanup policy".to_string(),
                error: format!("'{}' is not one of: on-success, never", s),
            }),
        }
    }
}

impl fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupPolicy::OnSuccess => write!(f, "on-success"),
            CleanupPolicy::Never => write!(f, "never"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Runtime settings for one pipeline run
///
/// With no environment overrides the values equal the fixed deployment: the Spring
/// recipe document is downloaded to `rewrite.yml` and removed after a passing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushgateConfig {
    pub strategy: RecipeStrategy,
    pub recipe_url: String,
    pub recipe_file: String,
    /// Active recipe name; for the static strategy this is the inline identifier
    pub active_recipe: String,
    pub recipe_artifact: String,
    pub engine_program: String,
    pub cleanup: CleanupPolicy,
    pub fetch_timeout: Option<Duration>,
}

impl PushgateConfig {
    /// The built-in values, ignoring the environment
    pub fn builtin() -> Self {
        Self {
            strategy: RecipeStrategy::Remote,
            recipe_url: DEFAULT_RECIPE_URL.to_string(),
            recipe_file: DEFAULT_RECIPE_FILE.to_string(),
            active_recipe: DEFAULT_ACTIVE_RECIPE.to_string(),
            recipe_artifact: DEFAULT_RECIPE_ARTIFACT.to_string(),
            engine_program: DEFAULT_ENGINE_PROGRAM.to_string(),
            cleanup: CleanupPolicy::OnSuccess,
            fetch_timeout: None,
        }
    }

    /// Built-in values overlaid with `PUSHGATE_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::builtin();

        if let Ok(v) = env::var("PUSHGATE_RECIPE_STRATEGY") {
            config.strategy = v.parse()?;
        }
        if let Ok(v) = env::var("PUSHGATE_RECIPE_URL") {
            config.recipe_url = v;
        }
        if let Ok(v) = env::var("PUSHGATE_RECIPE_FILE") {
            config.recipe_file = v;
        }
        if let Ok(v) = env::var("PUSHGATE_RECIPE") {
            config.active_recipe = v;
        }
        if let Ok(v) = env::var("PUSHGATE_RECIPE_ARTIFACT") {
            config.recipe_artifact = v;
        }
        if let Ok(v) = env::var("PUSHGATE_CLEANUP") {
            config.cleanup = v.parse()?;
        }
        if let Ok(v) = env::var("PUSHGATE_FETCH_TIMEOUT") {
            let secs = v.parse::<u64>().map_err(|e| ConfigError::ParseError {
                field: "PUSHGATE_FETCH_TIMEOUT".to_string(),
                error: e.to_string(),
            })?;
            config.fetch_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("recipe URL", &self.recipe_url),
            ("recipe file", &self.recipe_file),
            ("active recipe", &self.active_recipe),
            ("recipe artifact", &self.recipe_artifact),
            ("engine program", &self.engine_program),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        if self.strategy == RecipeStrategy::Remote
            && !(self.recipe_url.starts_with("http://") || self.recipe_url.starts_with("https://"))
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Recipe URL must use http or https: {}",
                self.recipe_url
            )));
        }

        if self.recipe_file.contains('/')
            || self.recipe_file.contains('\\')
            || self.recipe_file == ".."
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Recipe file must be a plain file name inside the project root: {}",
                self.recipe_file
            )));
        }

        if let Some(timeout) = self.fetch_timeout {
            if timeout.is_zero() {
                return Err(ConfigError::ValidationFailed(
                    "Fetch timeout must be at least 1 second".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for PushgateConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
