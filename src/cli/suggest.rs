//! Hints for common git failures

use crate::execution::Suggester;
use regex::Regex;
use tracing::debug;

const RULES: &[(&str, &str)] = &[
    (
        r"(?i)not a git repository",
        "run meow inside a git repository, or create one with `git init`",
    ),
    (
        r"(?i)please tell me who you are|unable to auto-detect email address",
        "set your identity with `git config --global user.name` and `git config --global user.email`",
    ),
    (
        r"(?i)index\.lock.*exists",
        "another git process is running; if it is not, remove .git/index.lock",
    ),
    (
        r"(?i)\[rejected\].*(non-fast-forward|fetch first)|updates were rejected",
        "the remote has commits you do not have; try again with --pull",
    ),
    (
        r"(?i)has no upstream branch|no upstream configured",
        "set an upstream with `git push -u <remote> <branch>` or pass --remote and --branch",
    ),
    (
        r"(?i)authentication failed|permission denied \(publickey\)|could not read username",
        "check your credentials or SSH key for this remote",
    ),
    (
        r"(?i)does not appear to be a git repository|repository .* not found",
        "check the remote name and URL with `git remote -v`",
    ),
    (
        r"(?i)could not resolve host|unable to access",
        "check your network connection and the remote URL",
    ),
    (
        r"(?i)your local changes to the following files would be overwritten",
        "commit or stash your local changes first; try --stash",
    ),
    (
        r"(?i)\bconflict\b|fix conflicts|unmerged files",
        "resolve the conflicts, stage the files, and run meow again",
    ),
    (
        r"(?i)pathspec .* did not match any files",
        "check the paths given to --add",
    ),
    (
        r"(?i)nothing to commit|no changes added to commit",
        "there is nothing to commit; make some changes first",
    ),
];

/// Matches stderr against known git error messages
#[derive(Debug)]
pub struct GitSuggester {
    rules: Vec<(Regex, &'static str)>,
}

impl GitSuggester {
    pub fn new() -> Self {
        let rules = RULES
            .iter()
            .filter_map(|(pattern, hint)| match Regex::new(pattern) {
                Ok(re) => Some((re, *hint)),
                Err(e) => {
                    debug!("Skipping suggestion rule {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();
        Self { rules }
    }
}

impl Default for GitSuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl Suggester for GitSuggester {
    fn suggest(&self, stderr: &str) -> Option<String> {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(stderr))
            .map(|(_, hint)| format!("hint: {}", hint))
    }
}
