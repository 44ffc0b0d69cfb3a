//! `relgraph.toml` configuration.
//!
//! Lookup order: an explicit `--config` path, then `relgraph.toml` in the
//! working directory, then `<config dir>/relgraph/config.toml`. The first
//! file found is used as a whole; a missing file means defaults. Command-line
//! flags override whatever the file says.
//!
//! ```toml
//! output = "text"
//!
//! [filter]
//! depth = 3
//! targets = ["ros_comm", "rviz"]
//! unreleased_only = true
//! derive_closure = true
//!
//! [rank]
//! ignore = ["catkin"]
//!
//! [report]
//! with_urls = true
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "relgraph.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelgraphConfig {
    /// Preferred output mode: `pretty`, `text`, or `json`.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub rank: RankConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Hop limit for the depth filter. `None` disables it.
    #[serde(default)]
    pub depth: Option<usize>,
    /// Packages of interest for the target filter. Empty disables it.
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub unreleased_only: bool,
    /// Fill absent `blocking`/`recursive_blocking` sets before filtering.
    #[serde(default)]
    pub derive_closure: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Blocker names that do not keep a package from being "next".
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub with_urls: bool,
}

impl RankConfig {
    #[must_use]
    pub fn ignore_set(&self) -> BTreeSet<String> {
        self.ignore.iter().cloned().collect()
    }
}

/// Read and parse a config file that must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`RelgraphConfig`].
pub fn load_config_file(path: &Path) -> Result<RelgraphConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<RelgraphConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Location of the per-user config file, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("relgraph/config.toml"))
}

/// Resolve the effective configuration.
///
/// # Errors
///
/// Returns an error if the explicit path is missing, or if any file that is
/// found fails to parse.
pub fn resolve_config(explicit: Option<&Path>, project_root: &Path) -> Result<RelgraphConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading explicit config");
        return load_config_file(path);
    }

    let project = project_root.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        debug!(path = %project.display(), "loading project config");
        return load_config_file(&project);
    }

    if let Some(user) = user_config_path().filter(|path| path.exists()) {
        debug!(path = %user.display(), "loading user config");
        return load_config_file(&user);
    }

    Ok(RelgraphConfig::default())
}
