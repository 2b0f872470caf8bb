//! Git pre-push hook installation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const HOOK_MARKER: &str = "# installed by pushgate";

const HOOK_SCRIPT: &str = r#"#!/bin/sh
# installed by pushgate
# Runs the rewrite and the project build before every push; a failure aborts the push.
exec pushgate run "$(git rev-parse --show-toplevel)"
"#;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("Not a git repository (no .git directory): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("A pre-push hook already exists at {}; pass --force to overwrite it", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write hook {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes an executable `.git/hooks/pre-push` under `repo_root`
///
/// Returns the path of the written hook.
pub fn install_pre_push_hook(repo_root: &Path, force: bool) -> Result<PathBuf, HookError> {
    let git_dir = repo_root.join(".git");
    if !git_dir.is_dir() {
        return Err(HookError::NotARepository(repo_root.to_path_buf()));
    }

    let hooks_dir = git_dir.join("hooks");
    let hook_path = hooks_dir.join("pre-push");

    if hook_path.exists() && !force {
        return Err(HookError::AlreadyExists(hook_path));
    }

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| HookError::Io { path, source }
    };

    fs::create_dir_all(&hooks_dir).map_err(io_err(&hooks_dir))?;
    fs::write(&hook_path, HOOK_SCRIPT).map_err(io_err(&hook_path))?;
    make_executable(&hook_path).map_err(io_err(&hook_path))?;

    debug!("Hook script:\n{}", HOOK_SCRIPT);
    info!("Installed pre-push hook at {}", hook_path.display());
    Ok(hook_path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
