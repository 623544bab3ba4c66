pub mod parser;

pub use parser::Cli;

use crate::config::Config;
use crate::core::editor;
use crate::core::git::{
    compute_deletions, DeletionExecutor, DeletionPlan, GitRepository, RefCollector,
};
use crate::core::listing::{self, GroupingMode};
use crate::core::selection::{select_candidates, SelectionMode};
use crate::utils::{Result, SweepError};
use chrono::Utc;
use dialoguer::Confirm;

/// The whole run is one linear pass:
/// collect -> select -> render -> edit -> diff -> confirm -> delete.
pub fn execute_command(cli: Cli) -> Result<()> {
    let config = Config::from_env().with_dry_run(cli.dry_run);

    let repo = GitRepository::discover(&config)?;
    repo.validate()?;

    let collector = RefCollector::new(&repo);
    if !cli.fast {
        collector.fetch_and_prune()?;
    }
    let refs = collector.collect()?;

    let mode = if cli.merged {
        SelectionMode::Merged
    } else {
        SelectionMode::All
    };
    let candidates = select_candidates(&repo, refs, mode)?;

    if candidates.is_empty() {
        return Err(SweepError::NothingToDelete);
    }

    let grouping = if cli.stale {
        GroupingMode::Staleness
    } else {
        GroupingMode::Origin
    };
    let document = listing::render_listing(&candidates, grouping, Utc::now());

    let preserved = editor::edit_and_get_preserved(&document, &candidates, &config)?;

    let to_delete = compute_deletions(&candidates, &preserved);
    if to_delete.is_empty() {
        return Err(SweepError::NothingToDelete);
    }

    println!("Branches selected for deletion:");
    for branch in &to_delete {
        println!("  {}", branch.ref_path);
    }

    if !confirm_deletion(to_delete.len())? {
        println!("Aborted, no branches deleted.");
        return Ok(());
    }

    let plan = DeletionPlan::from_refs(&to_delete);
    DeletionExecutor::new(&repo, &config).execute(&plan)?;

    if config.dry_run {
        println!(
            "Dry run: {} branches would have been deleted.",
            to_delete.len()
        );
    } else {
        println!("Deleted {} branches.", to_delete.len());
    }

    Ok(())
}

fn is_non_interactive() -> bool {
    std::env::var("SWEEP_NON_INTERACTIVE").is_ok()
        || std::env::var("CI").is_ok()
        || !atty::is(atty::Stream::Stdin)
}

/// Only `y`/`n` (case-insensitive) are accepted; anything else
/// re-prompts. Declining is a normal outcome, not an error.
fn confirm_deletion(count: usize) -> Result<bool> {
    if is_non_interactive() {
        return Err(SweepError::invalid_args(
            "Cannot confirm deletion in non-interactive mode. \
             Set DRY_RUN=1 to preview the commands instead.",
        ));
    }

    Confirm::new()
        .with_prompt(format!("Delete {} branches?", count))
        .interact()
        .map_err(|e| SweepError::invalid_args(format!("Confirmation prompt failed: {}", e)))
}
