//! Hook Module Generator
//!
//! Assembles and writes the derived hook module: for every eligible method
//! of the source module, a paired before/after hook point an external caller
//! can attach to. Only the behavioral contract of the source is exposed;
//! program logic is never transformed.

use crate::hookgen::error::GenerationError;
use crate::hookgen::image::ModuleImage;
use crate::hookgen::resolve;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed prefix for the derived artifact's file name.
pub const HOOK_PREFIX: &str = "HOOKS-";

/// Generator version recorded in every artifact. Bumping this does not by
/// itself force regeneration; staleness is timestamp-driven.
pub const GENERATOR_VERSION: &str = "1.0";

/// A synthesized hook point pair for one method of the source module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Method name in the source module
    pub method: String,
    /// Hook point invoked before the method runs
    pub before: String,
    /// Hook point invoked after the method returns
    pub after: String,
    /// Method address within the source module
    pub address: u64,
}

/// The derived hook module as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookModule {
    /// File name of the source module this artifact was derived from
    pub source: String,
    /// Version of the generator that produced this artifact
    pub generator_version: String,
    /// One entry per eligible method, sorted by method name
    pub entries: Vec<HookEntry>,
}

/// Hook module generator.
///
/// Configured once with the dependency search directories and the visibility
/// policy, then driven per source module via [`HookGenerator::generate`].
pub struct HookGenerator {
    dependency_dirs: Vec<PathBuf>,
    expose_private: bool,
}

impl HookGenerator {
    pub fn new(dependency_dirs: Vec<PathBuf>, expose_private: bool) -> Self {
        Self {
            dependency_dirs,
            expose_private,
        }
    }

    /// Deterministic artifact file name for a source module.
    ///
    /// `libhost.so` derives `HOOKS-libhost.json`.
    pub fn output_name(source: &Path) -> String {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_string());
        format!("{HOOK_PREFIX}{stem}.json")
    }

    /// Derive the hook module for `source` and write it to `output`.
    ///
    /// # Algorithm
    /// 1. Load the source module's metadata into an in-memory image
    /// 2. Resolve its imports against the dependency search directories
    /// 3. Synthesize a before/after hook point pair per eligible method
    /// 4. Serialize the assembled module to `output`
    ///
    /// # Errors
    /// Any read, mapping, or write failure is fatal to startup and
    /// propagates; generation is never retried. The source module is never
    /// mutated and exactly one output file is written.
    pub fn generate(&self, source: &Path, output: &Path) -> Result<(), GenerationError> {
        log::info!("[HookGen] Deriving hook module from {}", source.display());

        let image = ModuleImage::read(source, self.expose_private)?;
        let dependencies = resolve::map_dependencies(&image, &self.dependency_dirs)?;
        log::debug!(
            "[HookGen] {} methods, {} dependencies mapped",
            image.methods.len(),
            dependencies.len()
        );

        let module = Self::synthesize(&image, self.expose_private);

        let json = serde_json::to_string_pretty(&module)?;
        fs::write(output, json).map_err(|e| GenerationError::io(output, e))?;

        log::info!(
            "[HookGen] Done: {} hook pairs -> {}",
            module.entries.len(),
            output.display()
        );
        Ok(())
    }

    /// Synthesize hook point pairs from a module image.
    ///
    /// Pure over the image; entry order follows the image's name-sorted
    /// method list, so regeneration from an unchanged source is
    /// byte-identical.
    pub fn synthesize(image: &ModuleImage, expose_private: bool) -> HookModule {
        let entries = image
            .eligible_methods(expose_private)
            .map(|method| HookEntry {
                method: method.name.clone(),
                before: format!("before_{}", method.name),
                after: format!("after_{}", method.name),
                address: method.address,
            })
            .collect();

        HookModule {
            source: image
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            generator_version: GENERATOR_VERSION.to_string(),
            entries,
        }
    }
}
