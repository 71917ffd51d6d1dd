pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod locator;
pub mod ui;

pub use client::{get_version, ScmClient};
pub use config::{load_config, Backend, ScmConfig};
pub use domain::{SemanticVersion, TagVersion, VersionDescriptor};
pub use error::{Result, ScmError};
