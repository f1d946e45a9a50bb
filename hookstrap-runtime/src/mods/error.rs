//! Mod Pipeline Error Types
//!
//! Two families: fatal bootstrap errors that abort startup, and per-unit
//! errors that are logged at the smallest containing loop and never
//! propagated.

use thiserror::Error;

/// Failure to install a call redirection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The key already has a replacement installed.
    #[error("function {key} is already patched")]
    AlreadyPatched { key: String },
}

/// Fatal failure during the interception bootstrap. Without the native
/// loader suppressed, mods would double-load; startup cannot continue.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("failed to suppress native mod loading: {0}")]
    PatchInstall(#[from] PatchError),
}

/// A single mod's failure during construction or lifecycle.
///
/// Always caught at the per-unit boundary, logged with the unit's type or
/// identity and the underlying detail, and never surfaced to a caller.
#[derive(Error, Debug)]
pub enum UnitError {
    #[error("could not instantiate mod of type {type_name}: {detail}")]
    Instantiation { type_name: String, detail: String },

    #[error("mod of type {type_name} failed during init: {source:#}")]
    Init {
        type_name: String,
        source: anyhow::Error,
    },

    #[error("could not load mod {identity}: {source:#}")]
    Load {
        identity: String,
        source: anyhow::Error,
    },

    #[error("could not enable mod {identity}: {source:#}")]
    Enable {
        identity: String,
        source: anyhow::Error,
    },
}
