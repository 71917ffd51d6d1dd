//! Domain logic - pure version rules independent of how git is queried

pub mod descriptor;
pub mod format;
pub mod version;

pub use descriptor::VersionDescriptor;
pub use format::{format_version, DATE_FORMAT};
pub use version::{SemanticVersion, TagVersion};
