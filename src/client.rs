//! Version resolution facade
//!
//! If a package declares no version, one is derived from git metadata:
//!
//! - clean with no distance: `{tag}`
//! - clean with distance:    `{next}-dev{distance}.g{commit}`
//! - dirty:                  `{next}-dev{distance}.g{commit}.d{YYYYMMDD}`
//!
//! `{next}` is the tag's semantic version with a patch bump (1.0.0 -> 1.0.1).
//! This tracks the setuptools_scm "distance since tag" scheme but produces
//! Semantic Versioning rather than PEP 440.

use crate::config::ScmConfig;
use crate::domain::{format_version, VersionDescriptor};
use crate::error::Result;
use crate::git::{backend_for, ScmBackend};
use crate::locator::find_repo_root;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Resolves versions and repository facts for one starting path
///
/// Root discovery and the tool availability check happen once, at
/// construction. A client without a root (or without a usable tool) answers
/// every query with `None` and never invokes git.
#[derive(Debug)]
pub struct ScmClient<B: ScmBackend = Box<dyn ScmBackend>> {
    backend: B,
    root: Option<PathBuf>,
    remote: String,
}

impl<B: ScmBackend> ScmClient<B> {
    /// Check the backend and locate the repository root above `path`
    pub fn new(path: impl AsRef<Path>, config: &ScmConfig, backend: B) -> Self {
        let path = path.as_ref();

        let root = if backend.is_available() {
            let root = find_repo_root(path, &config.search_options());
            if root.is_none() {
                tracing::info!("no git root found above {}", path.display());
            }
            root
        } else {
            tracing::warn!("git command not available, skipping git version detection");
            None
        };

        ScmClient {
            backend,
            root,
            remote: config.remote.clone(),
        }
    }

    /// Repository root, if one was found
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Parsed describe output for HEAD
    ///
    /// # Returns
    /// * `Ok(None)` - No repository root
    /// * `Ok(Some(_))` - Parsed descriptor
    /// * `Err` - Describe failed or its output is malformed
    pub fn descriptor(&self) -> Result<Option<VersionDescriptor>> {
        let Some(root) = self.root() else {
            tracing::debug!("no git root found, returning null version");
            return Ok(None);
        };

        let describe = self.backend.describe(root)?;
        VersionDescriptor::parse(&describe).map(Some)
    }

    /// Version string for the working tree, dated with today's local date
    pub fn version(&self) -> Result<Option<String>> {
        self.version_on(Local::now().date_naive())
    }

    /// Version string for the working tree, dirty builds stamped with `today`
    pub fn version_on(&self, today: NaiveDate) -> Result<Option<String>> {
        let version = self
            .descriptor()?
            .map(|descriptor| format_version(&descriptor, today))
            .transpose()?;

        if let Some(version) = &version {
            tracing::debug!("resolved scm version {}", version);
        }
        Ok(version)
    }

    /// Full commit id of HEAD
    pub fn revision(&self) -> Result<Option<String>> {
        match self.root() {
            Some(root) => self.backend.revision(root).map(Some),
            None => Ok(None),
        }
    }

    /// URL of the configured remote (`origin` by default)
    pub fn url(&self) -> Result<Option<String>> {
        match self.root() {
            Some(root) => self.backend.remote_url(root, &self.remote),
            None => Ok(None),
        }
    }

    /// Current branch name, `HEAD` when detached
    pub fn branch(&self) -> Result<Option<String>> {
        match self.root() {
            Some(root) => self.backend.branch(root).map(Some),
            None => Ok(None),
        }
    }
}

impl ScmClient {
    /// Client using the backend named in `config`
    pub fn from_config(path: impl AsRef<Path>, config: &ScmConfig) -> Self {
        ScmClient::new(path, config, backend_for(config.backend))
    }
}

/// Resolve the SCM version for `path`, or `None` when resolution is disabled,
/// git is unavailable, or no repository exists.
pub fn get_version(path: impl AsRef<Path>, config: &ScmConfig) -> Result<Option<String>> {
    if !config.enabled {
        tracing::debug!("scm version resolution disabled");
        return Ok(None);
    }

    ScmClient::from_config(path, config).version()
}
