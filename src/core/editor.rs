use crate::config::Config;
use crate::core::git::refs::BranchRef;
use crate::core::listing;
use crate::utils::error::{Result, SweepError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// The editable listing on disk. Removed on drop, so every exit path
/// (including validation failure) cleans it up.
struct TempListing {
    path: PathBuf,
}

impl TempListing {
    fn create(document: &str) -> Result<Self> {
        let path = std::env::temp_dir().join(format!("sweep-{}.txt", Uuid::new_v4()));
        fs::write(&path, document).map_err(|e| {
            SweepError::file_operation(format!(
                "Failed to write listing {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { path })
    }

    fn read_back(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            SweepError::file_operation(format!(
                "Failed to read edited listing {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Drop for TempListing {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Write the listing to a temp file, block on the user's editor, and
/// read back the set of reference paths the user kept. The editor's
/// exit status is deliberately ignored; the edited file is the only
/// signal.
pub fn edit_and_get_preserved(
    document: &str,
    candidates: &[BranchRef],
    config: &Config,
) -> Result<HashSet<String>> {
    let temp = TempListing::create(document)?;

    launch_editor(&config.editor, &temp.path, config.debug)?;

    let edited = temp.read_back()?;
    let preserved = listing::parse_preserved_lines(&edited);
    listing::validate_preserved(&preserved, candidates)
}

fn launch_editor(editor: &str, path: &Path, debug: bool) -> Result<()> {
    if debug {
        eprintln!("+ {} {}", editor, path.display());
    }

    let status = Command::new(editor)
        .arg(path)
        .status()
        .map_err(|e| SweepError::editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if debug && !status.success() {
        eprintln!("Warning: editor exited with {}", status);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidates() -> Vec<BranchRef> {
        vec![
            BranchRef {
                ref_path: "refs/heads/keep-me".to_string(),
                name: "keep-me".to_string(),
                remote: None,
                last_commit: Utc::now(),
            },
            BranchRef {
                ref_path: "refs/remotes/origin/drop-me".to_string(),
                name: "drop-me".to_string(),
                remote: Some("origin".to_string()),
                last_commit: Utc::now(),
            },
        ]
    }

    fn document(refs: &[BranchRef]) -> String {
        listing::render_listing(refs, listing::GroupingMode::Origin, Utc::now())
    }

    #[cfg(unix)]
    fn fake_editor(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-editor.sh");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write editor script");
        let mut perms = fs::metadata(&path).expect("Failed to stat script").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to chmod script");
        path
    }

    #[test]
    fn test_temp_listing_is_removed_on_drop() {
        let temp = TempListing::create("refs/heads/a\n").expect("Failed to create listing");
        let path = temp.path.clone();
        assert!(path.exists());
        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_listing_names_do_not_collide() {
        let a = TempListing::create("").expect("Failed to create listing");
        let b = TempListing::create("").expect("Failed to create listing");
        assert_ne!(a.path, b.path);
    }

    #[cfg(unix)]
    #[test]
    fn test_untouched_listing_preserves_everything() {
        let refs = candidates();
        let config = Config {
            // leaves the file exactly as written
            editor: "true".to_string(),
            ..Config::default()
        };

        let preserved = edit_and_get_preserved(&document(&refs), &refs, &config)
            .expect("Untouched listing must validate");
        assert_eq!(preserved.len(), refs.len());
        assert!(preserved.contains("refs/heads/keep-me"));
        assert!(preserved.contains("refs/remotes/origin/drop-me"));
    }

    #[cfg(unix)]
    #[test]
    fn test_truncated_listing_preserves_nothing() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let editor = fake_editor(temp_dir.path(), ": > \"$1\"");

        let refs = candidates();
        let config = Config {
            editor: editor.to_string_lossy().to_string(),
            ..Config::default()
        };

        let preserved = edit_and_get_preserved(&document(&refs), &refs, &config)
            .expect("Empty listing is valid");
        assert!(preserved.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unknown_line_is_fatal() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let editor = fake_editor(temp_dir.path(), "echo 'refs/heads/typo' >> \"$1\"");

        let refs = candidates();
        let config = Config {
            editor: editor.to_string_lossy().to_string(),
            ..Config::default()
        };

        match edit_and_get_preserved(&document(&refs), &refs, &config) {
            Err(SweepError::UnknownBranches { lines }) => {
                assert_eq!(lines, vec!["refs/heads/typo".to_string()]);
            }
            other => panic!("Expected UnknownBranches, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_failure_status_is_ignored() {
        let refs = candidates();
        let config = Config {
            editor: "false".to_string(),
            ..Config::default()
        };

        assert!(edit_and_get_preserved(&document(&refs), &refs, &config).is_ok());
    }

    #[test]
    fn test_missing_editor_is_an_error() {
        let refs = candidates();
        let config = Config {
            editor: "/nonexistent/editor-binary".to_string(),
            ..Config::default()
        };

        match edit_and_get_preserved(&document(&refs), &refs, &config) {
            Err(SweepError::Editor { message }) => {
                assert!(message.contains("/nonexistent/editor-binary"));
            }
            other => panic!("Expected Editor error, got {:?}", other),
        }
    }
}
