pub mod test_helpers {
    use crate::config::Config;
    use crate::core::git::repository::GitRepository;
    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .current_dir(dir)
            .args(args)
            .status()
            .unwrap_or_else(|e| panic!("Failed to run git {}: {}", args.join(" "), e));
        assert!(status.success(), "git {} failed", args.join(" "));
    }

    fn init_repo(path: &Path) {
        git(path, &["init", "--initial-branch=main"]);
        git(path, &["config", "user.name", "Test User"]);
        git(path, &["config", "user.email", "test@example.com"]);

        fs::write(path.join("README.md"), "# Test Repository").expect("Failed to write README");
        git(path, &["add", "README.md"]);
        git(path, &["commit", "-m", "Initial commit"]);
    }

    pub fn setup_test_repo() -> (TempDir, GitRepository) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        init_repo(temp_dir.path());

        let repo = GitRepository::discover_from(temp_dir.path(), &Config::default())
            .expect("Failed to discover repo");
        (temp_dir, repo)
    }

    /// An upstream repository plus a clone of it, so the clone carries
    /// `origin` remote-tracking refs including `origin/HEAD`.
    pub fn setup_test_repo_with_remote() -> (TempDir, GitRepository) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let upstream = temp_dir.path().join("upstream");
        fs::create_dir_all(&upstream).expect("Failed to create upstream dir");
        init_repo(&upstream);

        git(
            temp_dir.path(),
            &["clone", upstream.to_str().unwrap(), "clone"],
        );
        let clone_path = temp_dir.path().join("clone");
        git(&clone_path, &["config", "user.name", "Test User"]);
        git(&clone_path, &["config", "user.email", "test@example.com"]);

        let repo = GitRepository::discover_from(&clone_path, &Config::default())
            .expect("Failed to discover clone");
        (temp_dir, repo)
    }

    pub fn create_branch(repo: &GitRepository, name: &str) {
        git(&repo.root, &["branch", name]);
    }

    pub fn checkout_branch(repo: &GitRepository, name: &str) {
        git(&repo.root, &["checkout", name]);
    }

    pub fn commit_file(repo: &GitRepository, file: &str, content: &str, message: &str) {
        fs::write(repo.root.join(file), content).expect("Failed to write file");
        git(&repo.root, &["add", file]);
        git(&repo.root, &["commit", "-m", message]);
    }

    pub fn add_remote(repo: &GitRepository, name: &str, url: &str) {
        git(&repo.root, &["remote", "add", name, url]);
    }

    pub fn push_branch(repo: &GitRepository, remote: &str, branch: &str) {
        git(&repo.root, &["push", remote, branch]);
    }
}
