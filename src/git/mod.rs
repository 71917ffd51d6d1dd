//! Git query abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of git
//! queries version resolution needs, so the parsing and formatting logic can
//! be exercised with canned output instead of real processes.
//!
//! # Overview
//!
//! The primary abstraction is the [ScmBackend] trait. The concrete
//! implementations include:
//!
//! - [command::GitCommand]: Spawns the `git` executable
//! - [repository::Libgit2Backend]: Reads the repository in-process with the `git2` crate
//! - [mock::MockBackend]: Canned responses for testing
//!
//! # Usage
//!
//! ```rust
//! # use autobuild_scm::git::ScmBackend;
//! # use std::path::Path;
//! # fn example<B: ScmBackend>(backend: &B) -> Result<(), Box<dyn std::error::Error>> {
//! if backend.is_available() {
//!     let describe = backend.describe(Path::new("."))?;
//!     println!("{}", describe);
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommand;
pub use mock::MockBackend;
pub use repository::Libgit2Backend;

use crate::config::Backend;
use crate::error::Result;
use std::path::Path;

/// Tag pattern passed to describe: only tags containing a digit are considered
pub const DESCRIBE_MATCH: &str = "*[0-9]*";

/// Suffix describe appends when the working tree has uncommitted changes
pub const DIRTY_MARK: &str = "-dirty";

/// Read-only git queries used by version resolution
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`. Implementations hold no
/// repository state between calls; every query names the root it runs in.
///
/// ## Error Handling
///
/// Methods return [crate::error::Result<T>]. A query that ran but failed
/// (non-zero exit, libgit2 error) is an error carrying the tool's diagnostic;
/// only [ScmBackend::remote_url] treats a missing remote as absence.
pub trait ScmBackend: Send + Sync {
    /// Whether the underlying tool can be used at all on this host
    ///
    /// Checked once when a client is built; an unavailable tool makes every
    /// query report "no value".
    fn is_available(&self) -> bool;

    /// Describe HEAD relative to the nearest matching tag
    ///
    /// Equivalent to `git describe --dirty --tags --long --match "*[0-9]*"`.
    ///
    /// # Arguments
    /// * `root` - Repository root directory
    ///
    /// # Returns
    /// * `Ok(String)` - Descriptor line, e.g. `v1.2.3-4-gabc1234-dirty`
    /// * `Err` - If no matching tag exists or the query fails
    fn describe(&self, root: &Path) -> Result<String>;

    /// Full commit id of HEAD (`git rev-parse HEAD`)
    fn revision(&self, root: &Path) -> Result<String>;

    /// Fetch URL of a remote (`git remote get-url <remote>`)
    ///
    /// # Returns
    /// * `Ok(Some(url))` - Remote exists and has a URL
    /// * `Ok(None)` - No such remote
    /// * `Err` - If the query itself fails
    fn remote_url(&self, root: &Path, remote: &str) -> Result<Option<String>>;

    /// Current branch name, or `HEAD` when detached (`git rev-parse --abbrev-ref HEAD`)
    fn branch(&self, root: &Path) -> Result<String>;
}

impl<B: ScmBackend + ?Sized> ScmBackend for Box<B> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn describe(&self, root: &Path) -> Result<String> {
        (**self).describe(root)
    }

    fn revision(&self, root: &Path) -> Result<String> {
        (**self).revision(root)
    }

    fn remote_url(&self, root: &Path, remote: &str) -> Result<Option<String>> {
        (**self).remote_url(root, remote)
    }

    fn branch(&self, root: &Path) -> Result<String> {
        (**self).branch(root)
    }
}

/// Builds the backend selected in configuration
pub fn backend_for(kind: Backend) -> Box<dyn ScmBackend> {
    match kind {
        Backend::Command => Box::new(GitCommand::new()),
        Backend::Libgit2 => Box::new(Libgit2Backend::new()),
    }
}
