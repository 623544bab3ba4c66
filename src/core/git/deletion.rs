use super::refs::BranchRef;
use super::repository::{execute_git_command_with_status, GitRepository};
use crate::config::Config;
use crate::utils::error::Result;
use std::collections::{BTreeMap, HashSet};

/// The branches to remove, partitioned into one batched local delete
/// and one batched push-delete per remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    pub local: Vec<String>,
    pub remote: BTreeMap<String, Vec<String>>,
}

impl DeletionPlan {
    pub fn from_refs(refs: &[BranchRef]) -> Self {
        let mut local = Vec::new();
        let mut remote: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for branch in refs {
            match &branch.remote {
                None => local.push(branch.name.clone()),
                Some(name) => remote.entry(name.clone()).or_default().push(branch.name.clone()),
            }
        }

        Self { local, remote }
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }
}

/// Everything in the candidate set the user did not preserve, in
/// candidate order.
pub fn compute_deletions(candidates: &[BranchRef], preserved: &HashSet<String>) -> Vec<BranchRef> {
    candidates
        .iter()
        .filter(|branch| !preserved.contains(&branch.ref_path))
        .cloned()
        .collect()
}

pub struct DeletionExecutor<'a> {
    repo: &'a GitRepository,
    config: &'a Config,
}

impl<'a> DeletionExecutor<'a> {
    pub fn new(repo: &'a GitRepository, config: &'a Config) -> Self {
        Self { repo, config }
    }

    /// Run the plan: one `git branch -D` for the local batch, one
    /// `git push --delete` per remote. The first failing command aborts
    /// the remaining batches.
    pub fn execute(&self, plan: &DeletionPlan) -> Result<()> {
        if !plan.local.is_empty() {
            let mut args = vec!["branch", "-D"];
            args.extend(plan.local.iter().map(String::as_str));
            self.run(&args)?;
        }

        for (remote, branches) in &plan.remote {
            let mut args = vec!["push", remote.as_str(), "--delete"];
            args.extend(branches.iter().map(String::as_str));
            self.run(&args)?;
        }

        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        if self.config.dry_run {
            println!("[dry-run] git {}", args.join(" "));
            return Ok(());
        }
        execute_git_command_with_status(self.repo, args)
    }
}
