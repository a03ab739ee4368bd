//! Working out where the push step should go
//!
//! Anything not given on the command line or in the settings file is read
//! from the repository with read-only git queries. If the remote or the
//! branch cannot be determined the push step is left out.

use crate::core::PushTarget;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Remote and branch requested by the user, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushPreference {
    pub remote: Option<String>,
    pub branch: Option<String>,
}

/// Fill in the missing parts of `preference` from the repository at `cwd`
pub async fn resolve(cwd: &Path, preference: &PushPreference) -> Option<PushTarget> {
    let branch = match &preference.branch {
        Some(branch) => branch.clone(),
        None => {
            let head = git_stdout(cwd, &["symbolic-ref", "--short", "-q", "HEAD"]).await?;
            parse_branch(&head)?
        }
    };

    let remote = match &preference.remote {
        Some(remote) => remote.clone(),
        None => match upstream_remote(cwd, &branch).await {
            Some(remote) => remote,
            None => parse_first_remote(&git_stdout(cwd, &["remote"]).await?)?,
        },
    };

    debug!("Push target: {} {}", remote, branch);
    Some(PushTarget::new(remote, branch))
}

async fn upstream_remote(cwd: &Path, branch: &str) -> Option<String> {
    let key = format!("branch.{}.remote", branch);
    let output = git_stdout(cwd, &["config", &key]).await?;
    parse_first_remote(&output)
}

/// Current branch from `git symbolic-ref --short -q HEAD`.
///
/// Works before the first commit; a detached `HEAD` makes git exit
/// non-zero, so it never gets here.
pub fn parse_branch(output: &str) -> Option<String> {
    match output.trim() {
        "" => None,
        branch => Some(branch.to_string()),
    }
}

/// First remote listed by `git remote`
pub fn parse_first_remote(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

async fn git_stdout(cwd: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            debug!("git {} exited with {}", args.join(" "), output.status);
            None
        }
        Err(e) => {
            debug!("Failed to run git {}: {}", args.join(" "), e);
            None
        }
    }
}
