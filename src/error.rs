//! Error types for the shell core.
//!
//! - [`FsError`] - virtual filesystem failures, displayed as the shell suffix
//!   (`No such file or directory`, `Is a directory`, ...)
//! - [`ShellError`] - what command handlers return; the interpreter turns it
//!   into an error [`CommandResult`](crate::command::CommandResult)
//! - [`LessonError`], [`ConfigError`], [`SnapshotError`] - loading external data

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("No such file or directory")]
    NotFound(String),
    #[error("Not a directory")]
    NotDirectory(String),
    #[error("Is a directory")]
    IsDirectory(String),
    #[error("File exists")]
    AlreadyExists(String),
    #[error("Invalid argument")]
    InvalidPath(String),
}

impl FsError {
    /// Absolute path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound(p)
            | Self::NotDirectory(p)
            | Self::IsDirectory(p)
            | Self::AlreadyExists(p)
            | Self::InvalidPath(p) => p,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    /// `cat: notes.txt: No such file or directory`
    #[error("{command}: {operand}: {source}")]
    Operand {
        command: &'static str,
        operand: String,
        source: FsError,
    },
    #[error("rm: cannot remove '{operand}': {source}")]
    CannotRemove { operand: String, source: FsError },
    #[error("mkdir: cannot create directory '{operand}': {source}")]
    CannotCreateDirectory { operand: String, source: FsError },
    #[error("ls: cannot access '{operand}': {source}")]
    CannotAccess { operand: String, source: FsError },
    #[error("touch: cannot touch '{operand}': {source}")]
    CannotTouch { operand: String, source: FsError },
    #[error("{command}: missing {what}")]
    MissingOperand {
        command: &'static str,
        what: &'static str,
    },
    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),
    #[error("{0}")]
    Usage(String),
    #[error("Command not found: {name}")]
    CommandNotFound {
        name: String,
        suggestion: Option<String>,
    },
    #[error("Error executing command: {0}")]
    HandlerFailure(String),
}

impl ShellError {
    pub fn missing_operand(command: &'static str) -> Self {
        Self::MissingOperand {
            command,
            what: "operand",
        }
    }

    pub fn missing_file_operand(command: &'static str) -> Self {
        Self::MissingOperand {
            command,
            what: "file operand",
        }
    }
}

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("invalid lesson definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {step}: invalid pattern: {source}")]
    InvalidPattern {
        step: usize,
        #[source]
        source: regex::Error,
    },
    #[error("lesson '{0}' has no steps")]
    EmptyLesson(String),
    #[error("lesson '{0}' not found")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("home directory must be an absolute path: {0}")]
    InvalidHome(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot directory does not exist: {0}")]
    MissingDirectory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_message() {
        let err = ShellError::Operand {
            command: "cat",
            operand: "a.txt".to_string(),
            source: FsError::NotFound("/home/user/a.txt".to_string()),
        };
        assert_eq!(err.to_string(), "cat: a.txt: No such file or directory");
    }

    #[test]
    fn test_rm_and_mkdir_messages() {
        let rm = ShellError::CannotRemove {
            operand: "docs".to_string(),
            source: FsError::IsDirectory("/docs".to_string()),
        };
        assert_eq!(rm.to_string(), "rm: cannot remove 'docs': Is a directory");

        let mkdir = ShellError::CannotCreateDirectory {
            operand: "docs".to_string(),
            source: FsError::AlreadyExists("/docs".to_string()),
        };
        assert_eq!(
            mkdir.to_string(),
            "mkdir: cannot create directory 'docs': File exists"
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            ShellError::missing_file_operand("cat").to_string(),
            "cat: missing file operand"
        );
        assert_eq!(
            ShellError::missing_operand("rm").to_string(),
            "rm: missing operand"
        );
    }

    #[test]
    fn test_fs_error_path() {
        assert_eq!(FsError::NotDirectory("/a/b".to_string()).path(), "/a/b");
    }
}
