use crate::core::git::refs::BranchRef;
use crate::core::git::repository::{execute_git_command, GitRepository};
use crate::utils::error::Result;
use std::collections::HashSet;

/// Which branches become deletion candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every collected branch.
    #[default]
    All,
    /// Only branches whose tips are merged into the default branch.
    Merged,
}

pub fn select_candidates(
    repo: &GitRepository,
    refs: Vec<BranchRef>,
    mode: SelectionMode,
) -> Result<Vec<BranchRef>> {
    match mode {
        SelectionMode::All => Ok(refs),
        SelectionMode::Merged => merged_only(repo, refs),
    }
}

fn merged_only(repo: &GitRepository, refs: Vec<BranchRef>) -> Result<Vec<BranchRef>> {
    let default_branch = repo.get_default_branch()?;

    let mut merged: HashSet<String> = HashSet::new();
    let local = execute_git_command(
        repo,
        &["branch", "--format=%(refname)", "--merged", &default_branch],
    )?;
    merged.extend(non_empty_lines(&local));

    let remote = execute_git_command(
        repo,
        &["branch", "-r", "--format=%(refname)", "--merged", &default_branch],
    )?;
    merged.extend(non_empty_lines(&remote));

    // The default branch and its remote counterparts are trivially
    // merged into themselves; they are never candidates.
    Ok(refs
        .into_iter()
        .filter(|branch| branch.name != default_branch && merged.contains(&branch.ref_path))
        .collect())
}

fn non_empty_lines(output: &str) -> impl Iterator<Item = String> + '_ {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
}
