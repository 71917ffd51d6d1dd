use crate::error::{Result, ScmError};
use crate::git::ScmBackend;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock backend returning canned output without touching git
///
/// Unset describe/revision/branch responses fail like a non-zero git exit.
#[derive(Debug)]
pub struct MockBackend {
    available: bool,
    describe: Option<String>,
    revision: Option<String>,
    remote_url: Option<String>,
    branch: Option<String>,
    queries: AtomicUsize,
}

impl MockBackend {
    /// Create an available backend with no canned responses
    pub fn new() -> Self {
        MockBackend {
            available: true,
            describe: None,
            revision: None,
            remote_url: None,
            branch: None,
            queries: AtomicUsize::new(0),
        }
    }

    /// Backend whose tool is not installed
    pub fn unavailable() -> Self {
        MockBackend {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_describe(mut self, describe: impl Into<String>) -> Self {
        self.describe = Some(describe.into());
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Number of queries issued so far (availability checks excluded)
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn answer(&self, command: &str, canned: &Option<String>) -> Result<String> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        canned.clone().ok_or_else(|| ScmError::Command {
            command: command.to_string(),
            status: 128,
            stderr: format!("fatal: no canned output for {}", command),
        })
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScmBackend for MockBackend {
    fn is_available(&self) -> bool {
        self.available
    }

    fn describe(&self, _root: &Path) -> Result<String> {
        self.answer("git describe", &self.describe)
    }

    fn revision(&self, _root: &Path) -> Result<String> {
        self.answer("git rev-parse HEAD", &self.revision)
    }

    fn remote_url(&self, _root: &Path, _remote: &str) -> Result<Option<String>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.remote_url.clone())
    }

    fn branch(&self, _root: &Path) -> Result<String> {
        self.answer("git rev-parse --abbrev-ref HEAD", &self.branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_canned_describe() {
        let mock = MockBackend::new().with_describe("v1.0.0-0-gabc1234");
        assert_eq!(mock.describe(Path::new(".")).unwrap(), "v1.0.0-0-gabc1234");
        assert_eq!(mock.query_count(), 1);
    }

    #[test]
    fn test_mock_missing_response_fails() {
        let mock = MockBackend::new();
        let err = mock.branch(Path::new(".")).unwrap_err();
        assert!(matches!(err, ScmError::Command { status: 128, .. }));
    }

    #[test]
    fn test_mock_remote_absent() {
        let mock = MockBackend::new();
        assert_eq!(mock.remote_url(Path::new("."), "origin").unwrap(), None);
    }

    #[test]
    fn test_mock_unavailable() {
        assert!(!MockBackend::unavailable().is_available());
        assert!(MockBackend::default().is_available());
    }
}
