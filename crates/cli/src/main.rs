use pushgate_cli::cli::commands::{CliArgs, Commands, DetectArgs, InstallHookArgs, RunArgs};
use pushgate_cli::cli::hook::install_pre_push_hook;
use pushgate_cli::cli::output::{ConsoleProgress, DetectionReport, OutputFormat, OutputFormatter};
use pushgate_cli::{NAME, VERSION};
use pushgate_core::config::{ConfigError, PushgateConfig};
use pushgate_core::fetch::HttpFetcher;
use pushgate_core::fs::{FileSystem, RealFileSystem};
use pushgate_core::logging::{init_logging, resolve_level, LoggingConfig};
use pushgate_core::process::SystemProcessRunner;
use pushgate_core::progress::{LoggingHandler, ProgressHandler};
use pushgate_pipeline::{PipelineController, ProjectContext, ProjectDetector, ProjectType};

use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{debug, info};

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = init_logging_from_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command_or_default() {
        Commands::Run(run_args) => handle_run(run_args, &args),
        Commands::Detect(detect_args) => handle_detect(detect_args),
        Commands::InstallHook(hook_args) => handle_install_hook(hook_args, args.quiet),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) -> Result<(), ConfigError> {
    let level = resolve_level(args.log_level.as_deref(), args.verbose, args.quiet)?;

    let config = if args.log_json {
        LoggingConfig {
            level,
            ..LoggingConfig::production()
        }
    } else {
        LoggingConfig::with_level(level)
    };

    init_logging(config);
    Ok(())
}

/// Explicit path, or the process working directory when none was given
fn resolve_project_root(path: Option<&Path>, fs: &dyn FileSystem) -> Option<ProjectContext> {
    let root: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: Failed to get current directory: {}", e);
                return None;
            }
        },
    };

    match ProjectContext::resolve(&root, fs) {
        Ok(ctx) => {
            debug!("Project root: {}", ctx.root().display());
            Some(ctx)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            None
        }
    }
}

fn handle_run(run_args: &RunArgs, args: &CliArgs) -> i32 {
    let config = match PushgateConfig::from_env() {
        Ok(config) => run_args.apply(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        eprintln!("Check the PUSHGATE_* environment variables and flags.");
        return 1;
    }
    debug!("Configuration: {:?}", config);

    let fs = Arc::new(RealFileSystem::new());
    let Some(ctx) = resolve_project_root(run_args.project_path.as_deref(), fs.as_ref()) else {
        return 1;
    };

    let fetcher = match HttpFetcher::new(config.fetch_timeout) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let progress: Arc<dyn ProgressHandler> = if args.log_json {
        Arc::new(LoggingHandler)
    } else {
        Arc::new(ConsoleProgress::new(args.quiet))
    };

    let controller = PipelineController::new(
        config,
        fs,
        Arc::new(SystemProcessRunner::new()),
        Arc::new(fetcher),
    )
    .with_progress(progress);

    controller.execute(&ctx).exit_code()
}

fn handle_detect(args: &DetectArgs) -> i32 {
    let fs = RealFileSystem::new();
    let Some(ctx) = resolve_project_root(args.project_path.as_deref(), &fs) else {
        return 1;
    };

    let (descriptor, project_type) = match ProjectDetector::new(&fs).descriptor(&ctx) {
        Some((descriptor, project_type)) => (Some(descriptor.to_string()), project_type),
        None => (None, ProjectType::Unknown),
    };
    info!("Detected project type: {}", project_type);

    let report = DetectionReport {
        project_root: ctx.root().to_path_buf(),
        project_type,
        descriptor,
    };

    let format: OutputFormat = args.format.into();
    match OutputFormatter::new(format).format_detection(&report) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: Failed to format output: {:#}", e);
            return 1;
        }
    }

    if project_type.is_known() {
        0
    } else {
        1
    }
}

fn handle_install_hook(args: &InstallHookArgs, quiet: bool) -> i32 {
    let fs = RealFileSystem::new();
    let Some(ctx) = resolve_project_root(args.repository_path.as_deref(), &fs) else {
        return 1;
    };

    match install_pre_push_hook(ctx.root(), args.force) {
        Ok(path) => {
            if !quiet {
                println!("Installed pre-push hook at {}", path.display());
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
