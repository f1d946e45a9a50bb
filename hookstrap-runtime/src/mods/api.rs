//! Public Mod API
//!
//! Re-exports everything a mod library needs: implement [`Mod`], export a
//! `hookstrap_manifest` function built from these types, compile as a
//! `cdylib`, and drop the library into the mod directory. See the parent
//! module documentation for a complete example.

pub use crate::mods::{
    ManifestEntry, Mod, ModCtorFn, ModManifest, TypeKind, ABI_REVISION, CONTRACT_ID,
    MANIFEST_SYMBOL, UNSET_IDENTITY,
};
