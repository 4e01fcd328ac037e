//! Template resolution
//!
//! Maps a template name to a file on disk: an existing absolute path
//! wins, otherwise each configured directory (and its sub-directory
//! variants) is probed in declared order and the first match is used.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use std::path::{Path, PathBuf};

/// Locate a template by name against the configured search paths
pub fn resolve(name: &str, config: &EngineConfig) -> EngineResult<PathBuf> {
    let direct = Path::new(name);
    if direct.is_absolute() && direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    for dir in &config.dirs {
        let mut candidates = vec![dir.join(name)];
        if let Some(sub) = &config.sub_dirname {
            candidates.push(dir.join(sub).join(name));
        }
        if let Some(app) = &config.app_dirname {
            candidates.push(dir.join(app).join(name));
        }
        for candidate in candidates {
            if candidate.is_file() {
                tracing::debug!(template = name, path = %candidate.display(), "template resolved");
                return Ok(candidate);
            }
        }
    }
    Err(EngineError::TemplateNotFound(name.to_string()))
}
