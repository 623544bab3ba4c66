pub mod deletion;
pub mod refs;
pub mod repository;

pub use deletion::{compute_deletions, DeletionExecutor, DeletionPlan};
pub use refs::{BranchRef, RefCollector};
pub use repository::GitRepository;
