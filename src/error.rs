use thiserror::Error;

/// Unified error type for SCM version resolution
#[derive(Error, Debug)]
pub enum ScmError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Malformed describe output: {0}")]
    Descriptor(String),

    #[error("Command `{command}` failed with status {status}: {stderr}")]
    Command {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in autobuild-scm
pub type Result<T> = std::result::Result<T, ScmError>;

impl ScmError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ScmError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ScmError::Version(msg.into())
    }

    /// Create a descriptor error with context
    pub fn descriptor(msg: impl Into<String>) -> Self {
        ScmError::Descriptor(msg.into())
    }
}
