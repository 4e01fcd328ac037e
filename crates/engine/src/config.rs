//! Engine configuration
//!
//! Per-deployment template search paths. Loadable from JSON so a host
//! application can ship the configuration alongside its own settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where templates are looked up and how directories are probed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Search directories, probed in declared order
    #[serde(default)]
    pub dirs: Vec<PathBuf>,

    /// Optional sub-directory name probed inside each search directory
    #[serde(default)]
    pub sub_dirname: Option<String>,

    /// Optional application-level template directory name, probed
    /// after the sub-directory
    #[serde(default)]
    pub app_dirname: Option<String>,
}

impl EngineConfig {
    /// Configuration with just a list of search directories
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            ..Self::default()
        }
    }

    /// Parse a configuration from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
