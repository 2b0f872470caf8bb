use clap::{Args, Parser, Subcommand, ValueEnum};
use pushgate_core::config::{CleanupPolicy, PushgateConfig, RecipeStrategy};
use std::path::PathBuf;

/// Pre-push quality gate for Maven and Gradle projects
#[derive(Parser, Debug)]
#[command(
    name = "pushgate",
    about = "Pre-push quality gate: apply OpenRewrite recipes, then build and test",
    version,
    long_about = "pushgate detects the project's build system, resolves an OpenRewrite recipe, \
                  rewrites the sources with the rewrite-maven-plugin and then runs the project's \
                  build. Any failure stops the run with exit code 1, which aborts a git push \
                  when invoked from a pre-push hook."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,

    #[arg(long, global = true, help = "Emit log records as JSON lines")]
    pub log_json: bool,
}

impl CliArgs {
    /// The subcommand to run; a bare `pushgate` means `pushgate run` in the current directory
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        about = "Run the pre-push pipeline (default)",
        long_about = "Detects the build system, resolves the recipe, runs the rewrite and then \
                      the build. Exits 0 only when every stage passed.\n\n\
                      Examples:\n  \
                      pushgate run\n  \
                      pushgate run /path/to/project\n  \
                      pushgate run --static-recipe org.openrewrite.java.spring.boot3.UpgradeSpringBoot_3_2\n  \
                      pushgate run --keep-recipe"
    )]
    Run(RunArgs),

    #[command(
        about = "Print the detected build system",
        long_about = "Looks for pom.xml, build.gradle and build.gradle.kts (in that order) in the \
                      project root. Exits 1 when none is present.\n\n\
                      Examples:\n  \
                      pushgate detect\n  \
                      pushgate detect /path/to/project --format json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Install a git pre-push hook that runs pushgate",
        long_about = "Writes .git/hooks/pre-push in the given repository. An existing hook is \
                      left untouched unless --force is passed.\n\n\
                      Examples:\n  \
                      pushgate install-hook\n  \
                      pushgate install-hook /path/to/repo --force"
    )]
    InstallHook(InstallHookArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(value_name = "PATH", help = "Project root (defaults to current directory)")]
    pub project_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "RECIPE",
        help = "Use a recipe identifier directly instead of downloading a recipe document"
    )]
    pub static_recipe: Option<String>,

    #[arg(long, value_name = "URL", help = "Recipe document to download")]
    pub recipe_url: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "File name for the downloaded recipe inside the project root"
    )]
    pub recipe_file: Option<String>,

    #[arg(long, value_name = "NAME", help = "Active recipe name")]
    pub recipe: Option<String>,

    #[arg(
        long,
        value_name = "COORDINATES",
        help = "Recipe artifact coordinates (group:artifact:version)"
    )]
    pub artifact: Option<String>,

    #[arg(long, help = "Keep the downloaded recipe file after a passing run")]
    pub keep_recipe: bool,
}

impl RunArgs {
    /// Overlay command-line flags on a configuration built from the environment
    pub fn apply(&self, mut config: PushgateConfig) -> PushgateConfig {
        if let Some(recipe) = &self.static_recipe {
            config.strategy = RecipeStrategy::Static;
            config.active_recipe = recipe.clone();
        }
        if let Some(url) = &self.recipe_url {
            config.recipe_url = url.clone();
        }
        if let Some(file) = &self.recipe_file {
            config.recipe_file = file.clone();
        }
        if let Some(recipe) = &self.recipe {
            config.active_recipe = recipe.clone();
        }
        if let Some(artifact) = &self.artifact {
            config.recipe_artifact = artifact.clone();
        }
        if self.keep_recipe {
            config.cleanup = CleanupPolicy::Never;
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "PATH", help = "Project root (defaults to current directory)")]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct InstallHookArgs {
    #[arg(value_name = "PATH", help = "Repository root (defaults to current directory)")]
    pub repository_path: Option<PathBuf>,

    #[arg(long, help = "Overwrite an existing pre-push hook")]
    pub force: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
        }
    }
}
