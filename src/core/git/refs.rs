use super::repository::{execute_git_command, GitRepository};
use crate::utils::error::{Result, SweepError};
use chrono::{DateTime, Utc};
use regex::Regex;

/// One local or remote-tracking branch reference with the committer
/// date of its tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Full reference path as listed, e.g. `refs/heads/feature/foo`.
    pub ref_path: String,
    /// Short name with the `heads/` or `remotes/<remote>/` prefix stripped.
    pub name: String,
    /// Remote name for remote-tracking branches, `None` for local ones.
    pub remote: Option<String>,
    pub last_commit: DateTime<Utc>,
}

impl BranchRef {
    pub fn is_local(&self) -> bool {
        self.remote.is_none()
    }

    /// Display origin of the branch: the remote name, or "local".
    pub fn origin(&self) -> &str {
        self.remote.as_deref().unwrap_or("local")
    }
}

/// Compiled reference-path shapes, built once per collection pass.
pub struct RefPatterns {
    local: Regex,
    remote: Regex,
}

impl RefPatterns {
    pub fn new() -> Result<Self> {
        let local = Regex::new(r"^(?:refs/)?heads/(.+)$")
            .map_err(|e| SweepError::git_operation(format!("Regex error: {}", e)))?;
        let remote = Regex::new(r"^(?:refs/)?remotes/([^/]+)/(.+)$")
            .map_err(|e| SweepError::git_operation(format!("Regex error: {}", e)))?;
        Ok(Self { local, remote })
    }
}

/// Parse one `%(refname)%00%(committerdate:iso8601)` listing line.
/// Lines that match neither reference shape, or whose date does not
/// parse, yield `None`.
pub fn parse_ref_line(line: &str, patterns: &RefPatterns) -> Option<BranchRef> {
    let (ref_path, date) = line.split_once('\0')?;
    let last_commit = DateTime::parse_from_str(date.trim(), "%Y-%m-%d %H:%M:%S %z")
        .ok()?
        .with_timezone(&Utc);

    if let Some(captures) = patterns.local.captures(ref_path) {
        return Some(BranchRef {
            ref_path: ref_path.to_string(),
            name: captures[1].to_string(),
            remote: None,
            last_commit,
        });
    }

    if let Some(captures) = patterns.remote.captures(ref_path) {
        return Some(BranchRef {
            ref_path: ref_path.to_string(),
            name: captures[2].to_string(),
            remote: Some(captures[1].to_string()),
            last_commit,
        });
    }

    None
}

pub struct RefCollector<'a> {
    repo: &'a GitRepository,
}

impl<'a> RefCollector<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    /// List every local and remote-tracking branch with its last-commit
    /// date, in the order git reports them. Unrecognized lines are
    /// skipped with a warning; `refs/remotes/<remote>/HEAD` symrefs are
    /// silently dropped.
    pub fn collect(&self) -> Result<Vec<BranchRef>> {
        let output = execute_git_command(
            self.repo,
            &[
                "for-each-ref",
                "refs/heads",
                "refs/remotes",
                "--format=%(refname)%00%(committerdate:iso8601)",
            ],
        )?;

        if self.repo.debug {
            eprintln!("{}", output.replace('\0', " "));
        }

        let patterns = RefPatterns::new()?;
        let mut refs = Vec::new();
        for line in output.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_ref_line(line, &patterns) {
                Some(branch) if !branch.is_local() && branch.name == "HEAD" => continue,
                Some(branch) => refs.push(branch),
                None => eprintln!(
                    "Warning: skipping unrecognized ref line: {}",
                    line.replace('\0', " ")
                ),
            }
        }

        Ok(refs)
    }

    pub fn list_remotes(&self) -> Result<Vec<String>> {
        let output = execute_git_command(self.repo, &["remote"])?;
        Ok(output
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    /// Fetch and prune every configured remote. A single remote's
    /// failure is reported and skipped, never fatal.
    pub fn fetch_and_prune(&self) -> Result<()> {
        for remote in self.list_remotes()? {
            println!("Fetching and pruning '{}'...", remote);
            if let Err(e) = execute_git_command(self.repo, &["fetch", "--prune", &remote]) {
                eprintln!("Warning: failed to fetch '{}': {}", remote, e);
            }
        }
        Ok(())
    }
}
