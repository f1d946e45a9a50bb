//! Mod System Infrastructure
//!
//! This module provides the extension contract and the shared registry for
//! the hookstrap loader, along with the scanner, interception bootstrap, and
//! lifecycle runner that populate it.
//!
//! # Mod Structure
//!
//! A mod is a dynamic library (`.so`, `.dylib`, or `.dll`) that exports a
//! single well-known symbol, `hookstrap_manifest`, describing the concrete
//! mod types the library contains:
//!
//! ```rust,no_run
//! use hookstrap_runtime::mods::api::*;
//!
//! #[no_mangle]
//! pub extern "C" fn hookstrap_manifest() -> ModManifest {
//!     ModManifest {
//!         abi_revision: ABI_REVISION,
//!         entries: vec![ManifestEntry {
//!             name: "MyMod".to_string(),
//!             base: CONTRACT_ID.to_string(),
//!             kind: TypeKind::Concrete,
//!             ctor: Some(my_mod_ctor),
//!         }],
//!     }
//! }
//!
//! unsafe extern "C" fn my_mod_ctor() -> *mut dyn Mod {
//!     Box::into_raw(Box::new(MyMod::default()))
//! }
//! # #[derive(Default)] struct MyMod { identity: String }
//! # impl Mod for MyMod {
//! #     fn identity(&self) -> &str { &self.identity }
//! #     fn set_identity(&mut self, identity: String) { self.identity = identity; }
//! #     fn priority(&self) -> i32 { 0 }
//! #     fn init(&mut self) -> anyhow::Result<()> { Ok(()) }
//! #     fn on_load(&mut self) -> anyhow::Result<()> { Ok(()) }
//! #     fn on_enable(&mut self) -> anyhow::Result<()> { Ok(()) }
//! # }
//! ```
//!
//! Each entry declares its **immediate** base identity and whether the type
//! is concrete; only concrete direct implementations of the contract are
//! instantiated. The manifest must be built against the same toolchain as
//! the loader (manifests cross the library boundary as plain Rust values).
//!
//! # Lifecycle
//!
//! Discovered mods move through `Constructed -> Initialized -> Registered ->
//! Loaded -> Enabled`, or `Failed` at whichever transition went wrong. One
//! broken mod never prevents the others from loading.

pub mod api;
pub mod bootstrap;
pub mod error;
pub mod intercept;
pub mod lifecycle;
pub mod scanner;

use std::path::{Path, PathBuf};

/// Identity value meaning "the mod never set one". Units left with this
/// sentinel after `init` are assigned their type name instead.
pub const UNSET_IDENTITY: &str = "NULL";

/// Stable identity of the extension contract. Manifest entries qualify only
/// when their declared immediate base equals this value.
pub const CONTRACT_ID: &str = "hookstrap.mod/1";

/// Manifest ABI revision the loader understands.
pub const ABI_REVISION: u32 = 1;

/// Well-known symbol every mod library must export.
pub const MANIFEST_SYMBOL: &[u8] = b"hookstrap_manifest";

/// Function signature for mod construction.
pub type ModCtorFn = unsafe extern "C" fn() -> *mut dyn Mod;

/// Function signature for manifest retrieval.
pub type ManifestFn = unsafe extern "C" fn() -> ModManifest;

/// The extension contract.
///
/// The loader calls exactly these members, in order: `init`, then (after
/// registration and priority sorting) `on_load` and `on_enable`. Identity
/// and priority are read between `init` and registration.
pub trait Mod: Send {
    /// Unique identity string. [`UNSET_IDENTITY`] means "not set yet".
    fn identity(&self) -> &str;

    /// Overwrite the identity (used for the type-name fallback).
    fn set_identity(&mut self, identity: String);

    /// Load priority; lower loads first, ties keep discovery order.
    fn priority(&self) -> i32;

    /// First lifecycle callback, invoked right after construction.
    fn init(&mut self) -> anyhow::Result<()>;

    /// Second lifecycle callback, invoked in priority order.
    fn on_load(&mut self) -> anyhow::Result<()>;

    /// Third lifecycle callback, invoked immediately after `on_load`.
    fn on_enable(&mut self) -> anyhow::Result<()>;
}

/// Kind tag for a manifest entry.
///
/// The contract's own base type is marked [`TypeKind::Base`] and excluded
/// from instantiation by this tag, resolved by identity rather than by
/// name-string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Instantiable mod type
    Concrete,
    /// Abstract or interface-like type; never instantiated
    Abstract,
    /// The contract base type itself; never instantiated
    Base,
}

/// One type declared by a mod library's manifest.
#[derive(Debug)]
pub struct ManifestEntry {
    /// Simple type name
    pub name: String,
    /// Identity of the type's immediate base
    pub base: String,
    /// Kind tag
    pub kind: TypeKind,
    /// Constructor; required for concrete entries
    pub ctor: Option<ModCtorFn>,
}

/// Manifest returned by a mod library's `hookstrap_manifest` export.
#[derive(Debug)]
pub struct ModManifest {
    pub abi_revision: u32,
    pub entries: Vec<ManifestEntry>,
}

/// A candidate mod type discovered during the directory scan.
///
/// Transient: produced by the scanner, consumed by the lifecycle runner.
#[derive(Debug, Clone)]
pub struct CandidateType {
    /// Library the type was found in
    pub binary: PathBuf,
    /// Simple type name
    pub name: String,
    /// Kind tag from the manifest
    pub kind: TypeKind,
    /// Constructor
    pub ctor: ModCtorFn,
}

/// Lifecycle transition a registered unit can fail at. Construction and
/// init failures drop the candidate before a unit exists, so they have no
/// stage here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Load,
    Enable,
}

/// State of a mod unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModState {
    Constructed,
    Initialized,
    Registered,
    Loaded,
    Enabled,
    Failed(LifecycleStage),
}

/// An instantiated mod owned by the registry.
pub struct ModUnit {
    type_name: String,
    binary: PathBuf,
    /// Current lifecycle state
    pub state: ModState,
    instance: Box<dyn Mod>,
}

impl ModUnit {
    pub fn new(type_name: String, binary: PathBuf, instance: Box<dyn Mod>) -> Self {
        Self {
            type_name,
            binary,
            state: ModState::Constructed,
            instance,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn identity(&self) -> &str {
        self.instance.identity()
    }

    pub fn priority(&self) -> i32 {
        self.instance.priority()
    }

    pub(crate) fn instance_mut(&mut self) -> &mut dyn Mod {
        self.instance.as_mut()
    }
}

/// Process-wide registry of mod units.
///
/// Created once by the interception bootstrap and mutated only by the
/// lifecycle runner during the single sequential startup pass; the host
/// reads it afterward. Insertion order is discovery order, not priority
/// order.
#[derive(Default)]
pub struct ModRegistry {
    units: Vec<ModUnit>,
}

impl ModRegistry {
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    pub fn push(&mut self, unit: ModUnit) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ModUnit> {
        self.units.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ModUnit> {
        self.units.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModUnit> {
        self.units.iter()
    }

    /// Indices of all units, stably sorted by ascending priority.
    ///
    /// Equal priorities keep their relative discovery order.
    pub fn sorted_by_priority(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.units.len()).collect();
        indices.sort_by_key(|&i| self.units[i].priority());
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyMod {
        identity: String,
        priority: i32,
    }

    impl Mod for DummyMod {
        fn identity(&self) -> &str {
            &self.identity
        }
        fn set_identity(&mut self, identity: String) {
            self.identity = identity;
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        fn init(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
        fn on_load(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
        fn on_enable(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn unit(identity: &str, priority: i32) -> ModUnit {
        ModUnit::new(
            identity.to_string(),
            PathBuf::from("test.so"),
            Box::new(DummyMod {
                identity: identity.to_string(),
                priority,
            }),
        )
    }

    #[test]
    fn priority_sort_is_stable() {
        let mut registry = ModRegistry::new();
        registry.push(unit("a", 5));
        registry.push(unit("b", 1));
        registry.push(unit("c", 1));
        registry.push(unit("d", 3));

        let order: Vec<&str> = registry
            .sorted_by_priority()
            .into_iter()
            .map(|i| registry.get(i).unwrap().identity())
            .collect();
        assert_eq!(order, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn unit_exposes_type_name_and_binary() {
        let unit = unit("alpha", 0);
        assert_eq!(unit.type_name(), "alpha");
        assert_eq!(unit.binary(), Path::new("test.so"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut registry = ModRegistry::new();
        registry.push(unit("late", 9));
        registry.push(unit("early", 0));

        let identities: Vec<&str> = registry.iter().map(|u| u.identity()).collect();
        assert_eq!(identities, vec!["late", "early"]);
    }
}
