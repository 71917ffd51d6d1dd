use crate::error::{Result, ScmError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Leading `v`, one to three numeric components, optional `-label` pre-release.
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-(.+))?$").expect("valid version regex")
    })
}

/// Semantic version parsed from a tag (`major.minor.patch[-prerelease]`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
}

impl SemanticVersion {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Attach a pre-release label
    pub fn with_prerelease(mut self, label: impl Into<String>) -> Self {
        self.prerelease = Some(label.into());
        self
    }

    /// Parse a version from tag text (e.g., "v1.2.3-rc1" -> 1.2.3-rc1).
    ///
    /// Minor and patch default to 0 when omitted, so "v1" and "v1.0" are
    /// accepted as 1.0.0. The pre-release label must be a valid semver
    /// pre-release identifier list.
    ///
    /// # Returns
    /// * `Some(SemanticVersion)` - Successfully parsed version
    /// * `None` - If the text is not a semantic version
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = version_pattern().captures(tag)?;

        let component = |idx: usize| -> Option<u64> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse::<u64>().ok(),
                None => Some(0),
            }
        };

        let major = component(1)?;
        let minor = component(2)?;
        let patch = component(3)?;

        let prerelease = match caps.get(4) {
            Some(label) => {
                semver::Prerelease::new(label.as_str()).ok()?;
                Some(label.as_str().to_string())
            }
            None => None,
        };

        Some(SemanticVersion {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    /// The version a development build of this tag leads up to.
    ///
    /// A release bumps patch by one. A pre-release already precedes its
    /// release, so only the label is dropped (2.0.0-alpha1 -> 2.0.0).
    ///
    /// # Returns
    /// * `Err(ScmError::Version)` - If the patch component cannot be incremented
    pub fn next(&self) -> Result<Self> {
        let patch = if self.prerelease.is_some() {
            self.patch
        } else {
            self.patch.checked_add(1).ok_or_else(|| {
                ScmError::version(format!("cannot bump patch of {}: out of range", self))
            })?
        };

        Ok(SemanticVersion {
            major: self.major,
            minor: self.minor,
            patch,
            prerelease: None,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = ScmError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
            .ok_or_else(|| ScmError::version(format!("'{}' is not a semantic version", s)))
    }
}

/// Version carried by the nearest tag
///
/// Tags that are not semantic versions are kept as raw text and never bumped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagVersion {
    Semantic(SemanticVersion),
    Raw(String),
}

impl TagVersion {
    /// Interpret a tag name, keeping the text (minus leading `v`) when it does not parse
    pub fn from_tag(tag: &str) -> Self {
        match SemanticVersion::parse(tag) {
            Some(version) => TagVersion::Semantic(version),
            None => TagVersion::Raw(tag.trim_start_matches('v').to_string()),
        }
    }

    /// Next version for development builds; raw tags come back unchanged
    pub fn next(&self) -> Result<TagVersion> {
        match self {
            TagVersion::Semantic(version) => version.next().map(TagVersion::Semantic),
            TagVersion::Raw(raw) => Ok(TagVersion::Raw(raw.clone())),
        }
    }

    pub fn as_semantic(&self) -> Option<&SemanticVersion> {
        match self {
            TagVersion::Semantic(version) => Some(version),
            TagVersion::Raw(_) => None,
        }
    }
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagVersion::Semantic(version) => version.fmt(f),
            TagVersion::Raw(raw) => f.write_str(raw),
        }
    }
}
