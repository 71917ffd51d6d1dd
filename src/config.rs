use crate::error::{Result, ScmError};
use crate::locator::{SearchOptions, MAX_SEARCH_DEPTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Disables SCM version resolution entirely when falsey
pub const ENV_SCM: &str = "AUTOBUILD_SCM";

/// Disables walking up parent directories to find the repository root when falsey
pub const ENV_SCM_SEARCH: &str = "AUTOBUILD_SCM_SEARCH";

const FALSEY: [&str; 4] = ["0", "f", "no", "false"];
const TRUTHY: [&str; 5] = ["", "1", "t", "yes", "true"];

/// Configuration for SCM version resolution.
///
/// Environment toggles are folded in explicitly through [ScmConfig::with_env]
/// so the resolver itself never reads process state.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub search_parents: bool,

    #[serde(default = "default_max_search_depth")]
    pub max_search_depth: usize,

    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_remote")]
    pub remote: String,
}

/// How git metadata is queried
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Spawn the `git` executable
    #[default]
    Command,
    /// Read the repository in-process through libgit2
    Libgit2,
}

fn default_true() -> bool {
    true
}

fn default_max_search_depth() -> usize {
    MAX_SEARCH_DEPTH
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for ScmConfig {
    fn default() -> Self {
        ScmConfig {
            enabled: true,
            search_parents: true,
            max_search_depth: MAX_SEARCH_DEPTH,
            backend: Backend::default(),
            remote: default_remote(),
        }
    }
}

impl ScmConfig {
    /// Applies `AUTOBUILD_SCM` and `AUTOBUILD_SCM_SEARCH` from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| {
            std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
        })
    }

    /// Applies toggle overrides from an arbitrary lookup (unset keys leave the value alone)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SCM) {
            self.enabled = parse_toggle(ENV_SCM, &value)?;
        }
        if let Some(value) = lookup(ENV_SCM_SEARCH) {
            self.search_parents = parse_toggle(ENV_SCM_SEARCH, &value)?;
        }
        Ok(self)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_depth: self.max_search_depth,
            search_parents: self.search_parents,
        }
    }
}

/// Interprets an on/off toggle value.
///
/// `0`, `f`, `no`, `false` mean off; `1`, `t`, `yes`, `true` and the empty
/// string mean on. Case and surrounding whitespace are ignored. Anything
/// else is rejected rather than guessed.
pub fn parse_toggle(key: &str, value: &str) -> Result<bool> {
    let normalized = value.trim().to_lowercase();

    if FALSEY.contains(&normalized.as_str()) {
        Ok(false)
    } else if TRUTHY.contains(&normalized.as_str()) {
        Ok(true)
    } else {
        Err(ScmError::config(format!(
            "{}='{}' is neither true ({}) nor false ({})",
            key,
            value,
            TRUTHY[1..].join(", "),
            FALSEY.join(", ")
        )))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autobuild-scm.toml` in current directory
/// 3. `autobuild/scm.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(ScmConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<ScmConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./autobuild-scm.toml").exists() {
        fs::read_to_string("./autobuild-scm.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("autobuild").join("scm.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(ScmConfig::default());
        }
    } else {
        return Ok(ScmConfig::default());
    };

    toml::from_str(&config_str).map_err(|e| ScmError::config(e.to_string()))
}
