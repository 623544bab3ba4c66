use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Interactive stale branch cleanup for git repositories")]
#[command(
    version,
    long_about = "Opens a listing of local and remote-tracking branches in your editor. \
Remove the lines of branches you no longer need; after confirmation, sweep deletes \
them locally and on their remotes."
)]
pub struct Cli {
    /// Skip the fetch-and-prune step
    #[arg(long, short = 'f')]
    pub fast: bool,

    /// Group branches by how long ago they were last committed to
    #[arg(long, short = 's')]
    pub stale: bool,

    /// Only consider branches merged into the default branch
    #[arg(long, short = 'm')]
    pub merged: bool,

    /// Print deletion commands instead of running them (same as DRY_RUN=1)
    #[arg(long)]
    pub dry_run: bool,
}
