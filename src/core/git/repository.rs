use crate::config::Config;
use crate::utils::error::{Result, SweepError};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct GitRepository {
    pub root: PathBuf,
    pub git_dir: PathBuf,
    pub debug: bool,
}

impl GitRepository {
    pub fn discover(config: &Config) -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            SweepError::git_operation(format!("Failed to get current directory: {}", e))
        })?;

        Self::discover_from(&current_dir, config)
    }

    pub fn discover_from(path: &Path, config: &Config) -> Result<Self> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| SweepError::git_operation(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SweepError::git_operation(format!(
                "Not a git repository or git not found: {}",
                stderr.trim()
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let root = PathBuf::from(root);

        let git_dir = Self::get_git_dir(&root)?;

        Ok(Self {
            root,
            git_dir,
            debug: config.debug,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(SweepError::git_operation(
                "Repository root does not exist".to_string(),
            ));
        }

        if !self.git_dir.exists() {
            return Err(SweepError::git_operation(
                "Git directory does not exist".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_current_branch(&self) -> Result<String> {
        execute_git_command(self, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// Best-effort detection of the repository's default branch.
    pub fn get_default_branch(&self) -> Result<String> {
        if execute_git_command(
            self,
            &["show-ref", "--verify", "--quiet", "refs/heads/main"],
        )
        .is_ok()
        {
            return Ok("main".to_string());
        }

        if let Ok(branch_ref) =
            execute_git_command(self, &["symbolic-ref", "refs/remotes/origin/HEAD"])
        {
            if let Some(branch_name) = branch_ref.strip_prefix("refs/remotes/origin/") {
                return Ok(branch_name.to_string());
            }
        }

        if execute_git_command(
            self,
            &["show-ref", "--verify", "--quiet", "refs/heads/master"],
        )
        .is_ok()
        {
            return Ok("master".to_string());
        }

        if execute_git_command(
            self,
            &["show-ref", "--verify", "--quiet", "refs/heads/develop"],
        )
        .is_ok()
        {
            return Ok("develop".to_string());
        }

        Ok("main".to_string())
    }

    fn get_git_dir(repo_root: &Path) -> Result<PathBuf> {
        let output = Command::new("git")
            .current_dir(repo_root)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map_err(|e| SweepError::git_operation(format!("Failed to get git dir: {}", e)))?;

        if !output.status.success() {
            return Err(SweepError::git_operation(
                "Failed to determine git directory".to_string(),
            ));
        }

        let git_dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let git_dir = if git_dir.starts_with('/') {
            PathBuf::from(git_dir)
        } else {
            repo_root.join(git_dir)
        };

        Ok(git_dir)
    }
}

/// Run a git command in the repository, returning trimmed stdout.
pub fn execute_git_command(repo: &GitRepository, args: &[&str]) -> Result<String> {
    if repo.debug {
        eprintln!("+ git {}", args.join(" "));
    }

    let output = Command::new("git")
        .current_dir(&repo.root)
        .args(args)
        .output()
        .map_err(|e| SweepError::git_operation(format!("Failed to execute git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SweepError::git_operation(format!(
            "Git command failed ({}): {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim().to_string())
}

/// Run a git command inheriting the terminal. A failure carries the
/// full command line and the child's exit code.
pub fn execute_git_command_with_status(repo: &GitRepository, args: &[&str]) -> Result<()> {
    if repo.debug {
        eprintln!("+ git {}", args.join(" "));
    }

    let status = Command::new("git")
        .current_dir(&repo.root)
        .args(args)
        .status()
        .map_err(|e| SweepError::git_operation(format!("Failed to execute git: {}", e)))?;

    if !status.success() {
        return Err(SweepError::command_failed(
            format!("git {}", args.join(" ")),
            status.code().unwrap_or(-1),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::*;

    #[test]
    fn test_repository_discovery() {
        let (temp_dir, repo) = setup_test_repo();
        assert_eq!(repo.root, temp_dir.path().canonicalize().unwrap());
        assert!(repo.git_dir.exists());
    }

    #[test]
    fn test_repository_validation() {
        let (_temp_dir, repo) = setup_test_repo();
        assert!(repo.validate().is_ok());
    }

    #[test]
    fn test_discovery_outside_repository_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = GitRepository::discover_from(temp_dir.path(), &Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_get_current_branch() {
        let (_temp_dir, repo) = setup_test_repo();
        let branch = repo
            .get_current_branch()
            .expect("Failed to get current branch");
        assert_eq!(branch, "main");
    }

    #[test]
    fn test_get_default_branch_prefers_main() {
        let (_temp_dir, repo) = setup_test_repo();
        let branch = repo
            .get_default_branch()
            .expect("Failed to get default branch");
        assert_eq!(branch, "main");
    }

    #[test]
    fn test_failed_command_carries_exit_code() {
        let (_temp_dir, repo) = setup_test_repo();
        let result = execute_git_command_with_status(&repo, &["branch", "-d", "does-not-exist"]);
        match result {
            Err(SweepError::CommandFailed { command, code }) => {
                assert_eq!(command, "git branch -d does-not-exist");
                assert_ne!(code, 0);
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }
}
