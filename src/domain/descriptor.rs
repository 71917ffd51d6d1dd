use crate::domain::version::TagVersion;
use crate::error::{Result, ScmError};

const DIRTY_SUFFIX: &str = "-dirty";
const COMMIT_PREFIX: char = 'g';

/// Structured form of `git describe --long --dirty` output
///
/// Produced fresh for every query, e.g. `v1.2.3-rc1-5-gabc123-dirty` becomes
/// tag `1.2.3-rc1`, distance 5, commit `abc123`, dirty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
    /// Working tree has uncommitted changes
    pub dirty: bool,
    /// Commits since the matched tag
    pub distance: u64,
    /// Abbreviated commit id, without the `g` prefix
    pub commit: String,
    /// Version carried by the matched tag
    pub tag_version: TagVersion,
}

impl VersionDescriptor {
    /// Parse a describe line of the form `<tag>-<distance>-g<commit>[-dirty]`.
    ///
    /// The tag may itself contain hyphens, so the line is split from the
    /// right: distance and commit are always the last two components.
    ///
    /// # Returns
    /// * `Ok(VersionDescriptor)` - Parsed descriptor
    /// * `Err(ScmError::Descriptor)` - Wrong number of components, non-numeric
    ///   distance, or a commit without the `g` prefix
    pub fn parse(describe: &str) -> Result<Self> {
        tracing::debug!("parsing git describe {}", describe);

        let line = describe.trim();
        let (line, dirty) = match line.strip_suffix(DIRTY_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (line, false),
        };

        let mut parts = line.rsplitn(3, '-');
        let (raw_commit, raw_distance, raw_tag) = match (parts.next(), parts.next(), parts.next())
        {
            (Some(commit), Some(distance), Some(tag)) => (commit, distance, tag),
            _ => {
                return Err(ScmError::descriptor(format!(
                    "'{}' - expected <tag>-<distance>-g<commit>",
                    describe.trim()
                )))
            }
        };

        if raw_tag.is_empty() {
            return Err(ScmError::descriptor(format!(
                "'{}' - missing tag",
                describe.trim()
            )));
        }

        // u64::from_str accepts a leading '+'
        let distance = Some(raw_distance)
            .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|d| d.parse::<u64>().ok())
            .ok_or_else(|| {
                ScmError::descriptor(format!(
                    "'{}' - distance '{}' is not a number",
                    describe.trim(),
                    raw_distance
                ))
            })?;

        let commit = raw_commit
            .strip_prefix(COMMIT_PREFIX)
            .filter(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_hexdigit()))
            .ok_or_else(|| {
                ScmError::descriptor(format!(
                    "'{}' - commit '{}' is not of the form g<hex>",
                    describe.trim(),
                    raw_commit
                ))
            })?;

        Ok(VersionDescriptor {
            dirty,
            distance,
            commit: commit.to_string(),
            tag_version: TagVersion::from_tag(raw_tag),
        })
    }

    /// Clean checkout sitting exactly on the tag
    pub fn is_exact(&self) -> bool {
        !self.dirty && self.distance == 0
    }
}
