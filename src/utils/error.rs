use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    #[error("Command failed with exit code {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("Unknown branches in edited listing: {}", .lines.join(", "))]
    UnknownBranches { lines: Vec<String> },

    #[error("No branches selected for deletion")]
    NothingToDelete,

    #[error("Editor error: {message}")]
    Editor { message: String },

    #[error("File operation failed: {message}")]
    FileOperation { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    pub fn command_failed(command: impl Into<String>, code: i32) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }

    pub fn unknown_branches(lines: Vec<String>) -> Self {
        Self::UnknownBranches { lines }
    }

    pub fn editor(message: impl Into<String>) -> Self {
        Self::Editor {
            message: message.into(),
        }
    }

    pub fn file_operation(message: impl Into<String>) -> Self {
        Self::FileOperation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SweepError::git_operation("fetch failed");
        assert_eq!(err.to_string(), "Git operation failed: fetch failed");

        let err = SweepError::command_failed("git branch -D foo", 1);
        assert_eq!(
            err.to_string(),
            "Command failed with exit code 1: git branch -D foo"
        );
    }

    #[test]
    fn test_unknown_branches_lists_every_line() {
        let err = SweepError::unknown_branches(vec![
            "refs/heads/typo".to_string(),
            "refs/heads/other".to_string(),
        ]);
        let message = err.to_string();
        assert!(message.contains("refs/heads/typo"));
        assert!(message.contains("refs/heads/other"));
    }
}
