use crate::error::Result;
use crate::git::{ScmBackend, DESCRIBE_MATCH, DIRTY_MARK};
use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Repository};
use std::path::Path;

/// Queries git in-process through libgit2
///
/// The repository is opened per query; nothing is held between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Libgit2Backend;

impl Libgit2Backend {
    pub fn new() -> Self {
        Libgit2Backend
    }

    fn open(root: &Path) -> Result<Repository> {
        tracing::debug!("opening repository at {}", root.display());
        Ok(Repository::open(root)?)
    }
}

impl ScmBackend for Libgit2Backend {
    /// libgit2 is linked in, so it is always usable
    fn is_available(&self) -> bool {
        true
    }

    fn describe(&self, root: &Path) -> Result<String> {
        let repo = Self::open(root)?;

        let mut options = DescribeOptions::new();
        options.describe_tags().pattern(DESCRIBE_MATCH);
        let description = repo.describe(&options)?;

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true).dirty_suffix(DIRTY_MARK);

        Ok(description.format(Some(&format))?)
    }

    fn revision(&self, root: &Path) -> Result<String> {
        let repo = Self::open(root)?;
        let commit = repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn remote_url(&self, root: &Path, remote: &str) -> Result<Option<String>> {
        let repo = Self::open(root)?;

        let url = match repo.find_remote(remote) {
            Ok(found) => found.url().map(|url| url.to_string()),
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!("no url for remote '{}': {}", remote, e);
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(url)
    }

    fn branch(&self, root: &Path) -> Result<String> {
        let repo = Self::open(root)?;

        if repo.head_detached()? {
            return Ok("HEAD".to_string());
        }

        let head = repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScmError;

    #[test]
    fn test_always_available() {
        assert!(Libgit2Backend::new().is_available());
    }

    #[test]
    fn test_open_non_repository_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Libgit2Backend::new().describe(dir.path()).unwrap_err();
        assert!(matches!(err, ScmError::Git(_)));
    }
}
