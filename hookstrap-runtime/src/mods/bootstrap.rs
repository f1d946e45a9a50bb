//! Interception Bootstrap
//!
//! Takes over mod loading from the host application's built-in mechanism.
//! The host's native "load all mods" entry point is patched to a permanent
//! no-op before any mod runs, so the host calling it independently cannot
//! double-load; then the single process-wide registry is created.
//!
//! Installed exactly once per process from the host's startup callback;
//! re-invocation is not supported.

use crate::mods::error::BootstrapError;
use crate::mods::intercept::{Interceptor, PatchOutcome};
use crate::mods::ModRegistry;

/// Stable key of the host's native "load all mods" entry point.
pub const NATIVE_LOADER_KEY: &str = "ModManager::load_all_mods";

/// Suppress the host's native mod loading and create the shared registry.
///
/// # Errors
/// Patch installation failure is fatal: with the native loader active, mods
/// would load twice. The error propagates and is never retried.
pub fn bootstrap(interceptor: &mut dyn Interceptor) -> Result<ModRegistry, BootstrapError> {
    interceptor.patch(NATIVE_LOADER_KEY, Box::new(|| PatchOutcome::Suppress))?;
    log::info!("Native mod loading suppressed, registry created");
    Ok(ModRegistry::new())
}
