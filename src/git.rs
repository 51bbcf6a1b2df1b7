//! Repository acquisition via the system git command.
//!
//! Cloning goes through the `git` binary rather than a library so that the
//! user's existing authentication setup applies unchanged:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! The contract with the rest of the pipeline is narrow: exit code 0 and a
//! populated working tree on success, non-zero with captured stderr on
//! failure. Nothing else about git's behavior is relied upon.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::SourceConfig;
use crate::error::{Error, Result};

/// Materialize a snapshot of a source repository under the site root.
///
/// The working directory name is derived deterministically from the source
/// name; any leftover directory of the same name from a previous run is
/// removed first so stale state cannot leak across runs.
///
/// In sparse mode only the source's `sourceDir` (and, when configured, its
/// external nav file) is checked out; in full mode the whole tree at the
/// requested branch is fetched.
pub fn acquire(source: &SourceConfig, root: &Path) -> Result<PathBuf> {
    let temp_path = root.join(source.temp_dir_name());

    if temp_path.exists() {
        fs::remove_dir_all(&temp_path)?;
    }

    let mut clone_args: Vec<String> = vec![
        "clone".to_string(),
        "--depth=1".to_string(),
        "--branch".to_string(),
        source.branch.clone(),
    ];
    if source.sparse_checkout {
        clone_args.push("--sparse".to_string());
    }
    clone_args.push(source.repo.clone());
    clone_args.push(temp_path.to_string_lossy().into_owned());

    let args: Vec<&str> = clone_args.iter().map(String::as_str).collect();
    run_git(&args, None).map_err(|e| clone_error(source, e))?;

    if source.sparse_checkout {
        run_git(&["sparse-checkout", "init"], Some(&temp_path))?;

        let mut paths: Vec<&str> = vec!["sparse-checkout", "add", &source.source_dir];
        if let Some(nav) = &source.external_nav {
            paths.push(nav);
        }
        run_git(&paths, Some(&temp_path))?;
    }

    Ok(temp_path)
}

/// The path `acquire` would use, without touching disk or network.
///
/// Used in dry-run mode; the returned path is not guaranteed to exist, so
/// callers must check before reading.
pub fn intended_path(source: &SourceConfig, root: &Path) -> PathBuf {
    root.join(source.temp_dir_name())
}

fn clone_error(source: &SourceConfig, err: Error) -> Error {
    let detail = match &err {
        Error::GitCommand { stderr, .. } => stderr.clone(),
        other => other.to_string(),
    };

    // Surface a pointed message for the common authentication failures.
    let message = if detail.contains("Authentication failed")
        || detail.contains("Permission denied")
        || detail.contains("Could not read from remote repository")
    {
        format!(
            "Authentication failed. Make sure you have access to the repository \
             (SSH key in ssh-agent, credentials configured, or a personal access \
             token set up). Error: {}",
            detail
        )
    } else {
        detail
    };

    Error::GitClone {
        url: source.repo.clone(),
        branch: source.branch.clone(),
        message,
    }
}

fn run_git(args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let mut command = Command::new("git");
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output().map_err(|e| Error::GitCommand {
        command: format!("git {}", args.join(" ")),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command: format!("git {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}
