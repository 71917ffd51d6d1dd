use crate::domain::descriptor::VersionDescriptor;
use crate::error::Result;
use chrono::NaiveDate;

/// Date stamp appended to dirty builds (`.dYYYYMMDD`)
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Formats the final version string for a descriptor.
///
/// - dirty:                  `{next}-dev{distance}.g{commit}.d{YYYYMMDD}`
/// - clean with distance:    `{next}-dev{distance}.g{commit}`
/// - clean with no distance: `{tag}`
///
/// `{next}` is the tag's patch bump, or the raw tag text when the tag is not
/// a semantic version.
///
/// # Arguments
/// * `descriptor` - Parsed describe output
/// * `today` - Date stamped onto dirty builds
///
/// # Returns
/// * `Err(ScmError::Version)` - If the tag's patch cannot be bumped
pub fn format_version(descriptor: &VersionDescriptor, today: NaiveDate) -> Result<String> {
    if descriptor.is_exact() {
        return Ok(descriptor.tag_version.to_string());
    }

    let next = descriptor.tag_version.next()?;
    let dev = format!("{}-dev{}.g{}", next, descriptor.distance, descriptor.commit);

    if descriptor.dirty {
        Ok(format!("{}.d{}", dev, today.format(DATE_FORMAT)))
    } else {
        Ok(dev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::{SemanticVersion, TagVersion};
    use crate::error::ScmError;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn descriptor(tag: &str, distance: u64, dirty: bool) -> VersionDescriptor {
        VersionDescriptor {
            dirty,
            distance,
            commit: "abc123".to_string(),
            tag_version: TagVersion::from_tag(tag),
        }
    }

    #[test]
    fn test_clean_no_distance_is_tag() {
        assert_eq!(format_version(&descriptor("1.2.3", 0, false), date()).unwrap(), "1.2.3");
        assert_eq!(format_version(&descriptor("v1.0.0", 0, false), date()).unwrap(), "1.0.0");
    }

    #[test]
    fn test_clean_no_distance_keeps_prerelease() {
        assert_eq!(
            format_version(&descriptor("v2.0.0-alpha1", 0, false), date()).unwrap(),
            "2.0.0-alpha1"
        );
    }

    #[test]
    fn test_clean_with_distance() {
        assert_eq!(
            format_version(&descriptor("1.2.3", 5, false), date()).unwrap(),
            "1.2.4-dev5.gabc123"
        );
    }

    #[test]
    fn test_dirty_with_distance() {
        assert_eq!(
            format_version(&descriptor("1.2.3", 5, true), date()).unwrap(),
            "1.2.4-dev5.gabc123.d20250101"
        );
    }

    #[test]
    fn test_dirty_without_distance_still_bumps() {
        assert_eq!(
            format_version(&descriptor("1.0.0", 0, true), date()).unwrap(),
            "1.0.1-dev0.gabc123.d20250101"
        );
    }

    #[test]
    fn test_prerelease_with_distance() {
        assert_eq!(
            format_version(&descriptor("v2.0.0-alpha1", 1, false), date()).unwrap(),
            "2.0.0-dev1.gabc123"
        );
    }

    #[test]
    fn test_major_only_tag_with_distance() {
        assert_eq!(
            format_version(&descriptor("v1", 1, false), date()).unwrap(),
            "1.0.1-dev1.gabc123"
        );
    }

    #[test]
    fn test_raw_tag_is_never_bumped() {
        assert_eq!(
            format_version(&descriptor("release-foo", 0, false), date()).unwrap(),
            "release-foo"
        );
        assert_eq!(
            format_version(&descriptor("release-foo", 3, false), date()).unwrap(),
            "release-foo-dev3.gabc123"
        );
        assert_eq!(
            format_version(&descriptor("release-foo", 3, true), date()).unwrap(),
            "release-foo-dev3.gabc123.d20250101"
        );
    }

    #[test]
    fn test_date_is_zero_padded() {
        let d = descriptor("0.1.0", 2, true);
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_version(&d, today).unwrap(), "0.1.1-dev2.gabc123.d20240309");
    }

    #[test]
    fn test_unbumpable_patch_is_error() {
        let d = VersionDescriptor::parse("1.2.18446744073709551615-3-gabc123").unwrap();
        let err = format_version(&d, date()).unwrap_err();
        assert!(matches!(err, ScmError::Version(_)));

        // exact tag needs no bump
        let d = VersionDescriptor::parse("1.2.18446744073709551615-0-gabc123").unwrap();
        assert_eq!(format_version(&d, date()).unwrap(), "1.2.18446744073709551615");
    }

    #[test]
    fn test_four_component_tag_is_not_bumped() {
        let d = VersionDescriptor::parse("1.2.3.4-3-gabc123").unwrap();
        assert_eq!(format_version(&d, date()).unwrap(), "1.2.3.4-dev3.gabc123");
    }

    #[test]
    fn test_semantic_tag_fields_survive() {
        let d = VersionDescriptor {
            dirty: false,
            distance: 7,
            commit: "0a1b2c3".to_string(),
            tag_version: TagVersion::Semantic(SemanticVersion::new(0, 9, 9)),
        };
        assert_eq!(format_version(&d, date()).unwrap(), "0.9.10-dev7.g0a1b2c3");
    }
}
