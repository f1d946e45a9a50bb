//! Startup Orchestration
//!
//! The single sequential startup pass, run once from the host application's
//! startup callback: derive the hook module if stale, suppress the host's
//! native mod loading, then discover and start mods. No operation suspends
//! or yields; all I/O is synchronous by design.
//!
//! Errors surfacing here are the fatal family: generation, bootstrap, and
//! directory-level scan failures abort startup. Per-file and per-mod
//! failures are contained further down and never reach this level.

use crate::config::LoaderConfig;
use crate::mods::bootstrap::bootstrap;
use crate::mods::error::BootstrapError;
use crate::mods::intercept::Interceptor;
use crate::mods::lifecycle::LifecycleRunner;
use crate::mods::scanner::ModScanner;
use crate::mods::ModRegistry;
use hookstrap_core::hookgen::{cache, Freshness, GenerationError, HookGenerator};
use std::path::PathBuf;
use thiserror::Error;

/// Fatal startup failure. The process cannot safely continue past any of
/// these; they propagate upward and terminate startup.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("hook module generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("interception bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("could not create mod directory {path}: {source}")]
    ModDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mod directory scan failed: {0:#}")]
    Scan(anyhow::Error),
}

/// The loader's startup sequence.
///
/// Owns the scanner (and through it every loaded mod library) for the
/// remainder of the process, so the instances in the registry stay valid.
pub struct Startup {
    config: LoaderConfig,
    scanner: ModScanner,
}

impl Startup {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            scanner: ModScanner::new(),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Run the full startup sequence and hand the populated registry to the
    /// caller. The host holds the registry explicitly; nothing here is a
    /// process global.
    pub fn run(&mut self, interceptor: &mut dyn Interceptor) -> Result<ModRegistry, StartupError> {
        self.generate_hooks()?;
        let mut registry = bootstrap(interceptor)?;
        self.load_mods(&mut registry)?;
        Ok(registry)
    }

    /// Derive the hook module, unless the existing artifact is fresh.
    ///
    /// Returns the artifact path in either case.
    pub fn generate_hooks(&self) -> Result<PathBuf, StartupError> {
        let source = self.config.source_path();
        let artifact = self.config.artifact_path();

        if cache::check(&source, &artifact)? == Freshness::Fresh {
            return Ok(artifact);
        }

        let generator = HookGenerator::new(self.config.search_dirs(), self.config.expose_private);
        generator.generate(&source, &artifact)?;
        Ok(artifact)
    }

    /// Discover and start mods, populating `registry`.
    ///
    /// A missing mod directory is created empty and discovery is skipped
    /// for this run; the registry stays initialized-but-empty.
    pub fn load_mods(&mut self, registry: &mut ModRegistry) -> Result<(), StartupError> {
        let mod_dir = self.config.mod_dir.clone();

        if !mod_dir.exists() {
            std::fs::create_dir_all(&mod_dir).map_err(|source| StartupError::ModDir {
                path: mod_dir.clone(),
                source,
            })?;
            log::info!(
                "Created empty mod directory {}, skipping discovery this run",
                mod_dir.display()
            );
            return Ok(());
        }

        let candidates = self.scanner.scan(&mod_dir).map_err(StartupError::Scan)?;
        log::info!("Discovered {} candidate mod type(s)", candidates.len());

        LifecycleRunner::run(registry, candidates);
        Ok(())
    }
}
