//! Loader Configuration
//!
//! On-disk settings for the startup sequence. A missing file yields the
//! defaults; a malformed file is an error.

use anyhow::{Context, Result};
use hookstrap_core::hookgen::HookGenerator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one startup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory holding the source module and its dependencies
    pub managed_dir: PathBuf,
    /// File name of the source module within `managed_dir`
    pub source_module: String,
    /// Mod drop directory (created empty if absent)
    pub mod_dir: PathBuf,
    /// Directory the derived hook module is written to
    pub output_dir: PathBuf,
    /// Extra dependency search directories, tried after `managed_dir`
    pub dependency_dirs: Vec<PathBuf>,
    /// Expose non-exported (private) methods as hook points
    pub expose_private: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            managed_dir: PathBuf::from("managed"),
            source_module: "libhost.so".to_string(),
            mod_dir: PathBuf::from("mods"),
            output_dir: PathBuf::from("."),
            dependency_dirs: Vec::new(),
            expose_private: true,
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a TOML file, or defaults if it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Full path of the source module.
    pub fn source_path(&self) -> PathBuf {
        self.managed_dir.join(&self.source_module)
    }

    /// Full path of the derived hook module.
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir
            .join(HookGenerator::output_name(&self.source_path()))
    }

    /// Dependency search directories, managed directory first.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.managed_dir.clone()];
        dirs.extend(self.dependency_dirs.iter().cloned());
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_name_derives_from_source_stem() {
        let config = LoaderConfig {
            output_dir: PathBuf::from("/opt/loader"),
            source_module: "libworld.so".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.artifact_path(),
            PathBuf::from("/opt/loader/HOOKS-libworld.json")
        );
    }

    #[test]
    fn managed_dir_searched_first() {
        let config = LoaderConfig {
            managed_dir: PathBuf::from("managed"),
            dependency_dirs: vec![PathBuf::from("extra")],
            ..Default::default()
        };
        assert_eq!(
            config.search_dirs(),
            vec![PathBuf::from("managed"), PathBuf::from("extra")]
        );
    }
}
