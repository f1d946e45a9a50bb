//! Interception Layer
//!
//! A minimal call-redirection primitive: patch a function, identified by a
//! stable process-wide key, so that a replacement runs instead. The
//! [`Interceptor`] trait is the surface the bootstrap depends on;
//! [`CallRouter`] is the in-process implementation the host wires into its
//! dispatch path.

use crate::mods::error::PatchError;
use std::collections::HashMap;

/// What the host should do after running a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Run the original function as usual.
    RunOriginal,
    /// The original function must not run (it reports "did not run").
    Suppress,
}

/// A replacement installed for a patched function.
pub type ReplacementFn = Box<dyn Fn() -> PatchOutcome + Send>;

/// Call-redirection primitive.
pub trait Interceptor {
    /// Install `replacement` for the function identified by `key`.
    ///
    /// A key can be patched at most once; repatching is an error.
    fn patch(&mut self, key: &str, replacement: ReplacementFn) -> Result<(), PatchError>;
}

/// Keyed call router.
///
/// The host calls [`CallRouter::dispatch`] before invoking any patchable
/// function; an installed replacement decides whether the original runs.
#[derive(Default)]
pub struct CallRouter {
    patches: HashMap<String, ReplacementFn>,
}

impl CallRouter {
    pub fn new() -> Self {
        Self {
            patches: HashMap::new(),
        }
    }

    /// Run the replacement for `key`, if any.
    pub fn dispatch(&self, key: &str) -> PatchOutcome {
        match self.patches.get(key) {
            Some(replacement) => replacement(),
            None => PatchOutcome::RunOriginal,
        }
    }

    pub fn is_patched(&self, key: &str) -> bool {
        self.patches.contains_key(key)
    }
}

impl Interceptor for CallRouter {
    fn patch(&mut self, key: &str, replacement: ReplacementFn) -> Result<(), PatchError> {
        if self.patches.contains_key(key) {
            return Err(PatchError::AlreadyPatched {
                key: key.to_string(),
            });
        }
        log::debug!("Installing patch for {key}");
        self.patches.insert(key.to_string(), replacement);
        Ok(())
    }
}
