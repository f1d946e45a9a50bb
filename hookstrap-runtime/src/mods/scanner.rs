//! Mod Library Scanner
//!
//! Enumerates dynamic libraries in a directory and collects the candidate
//! mod types they declare. The scan is finite, eager, and one-shot;
//! re-invocation rescans from disk.
//!
//! # Per-file policy
//!
//! Each library is attempted independently and one bad file never aborts
//! the pass:
//! - a file that is not a loadable library, or that does not export the
//!   manifest symbol, is silently skipped (a foreign binary, not an error);
//! - a file whose manifest fails validation logs an error naming the file
//!   and a debug-level detail report, and that file's types are skipped.
//!
//! The scanner only produces descriptors; it never instantiates.

use crate::mods::{
    CandidateType, ManifestEntry, ManifestFn, ModManifest, TypeKind, ABI_REVISION, CONTRACT_ID,
    MANIFEST_SYMBOL,
};
use anyhow::{Context, Result};
use libloading::{Library, Symbol};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Scanner for mod libraries in a drop directory.
///
/// Loaded libraries are kept alive here for the remainder of the process;
/// dropping the scanner would invalidate every constructor the candidates
/// carry.
#[derive(Default)]
pub struct ModScanner {
    libraries: Vec<Library>,
}

impl ModScanner {
    pub fn new() -> Self {
        Self {
            libraries: Vec::new(),
        }
    }

    /// Scan `directory` for candidate mod types.
    ///
    /// Files are visited in sorted name order so discovery order (and with
    /// it priority tie-breaking) is deterministic across runs.
    ///
    /// # Errors
    /// Only the directory listing itself can fail; all per-file problems
    /// are contained and logged.
    pub fn scan(&mut self, directory: &Path) -> Result<Vec<CandidateType>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(directory)
            .with_context(|| format!("failed to read mod directory {}", directory.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| Self::is_mod_file(path))
            .collect();
        paths.sort();

        let mut candidates = Vec::new();
        for path in paths {
            // Not a loadable library: a foreign binary, skip silently.
            let library = match unsafe { Library::new(&path) } {
                Ok(library) => library,
                Err(_) => continue,
            };

            let manifest = {
                let manifest_fn: Symbol<ManifestFn> = match unsafe { library.get(MANIFEST_SYMBOL) }
                {
                    Ok(symbol) => symbol,
                    // Loadable but not a mod library.
                    Err(_) => continue,
                };
                unsafe { manifest_fn() }
            };

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match Self::validate(manifest, &path) {
                Ok(mut entries) => {
                    log::debug!("Found {} candidate type(s) in {}", entries.len(), file_name);
                    candidates.append(&mut entries);
                    self.libraries.push(library);
                }
                Err(report) => {
                    log::error!("Could not load \"{file_name}\" as a mod library!");
                    log::debug!("{report}");
                }
            }
        }

        Ok(candidates)
    }

    /// Whether a manifest entry qualifies for instantiation: a concrete type
    /// whose declared immediate base is the extension contract. Abstract
    /// types and the contract base itself are excluded by their kind tag.
    pub fn eligible(entry: &ManifestEntry) -> bool {
        entry.kind == TypeKind::Concrete && entry.base == CONTRACT_ID
    }

    fn is_mod_file(path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                matches!(ext.as_str(), "so" | "dylib" | "dll")
            }
            None => false,
        }
    }

    /// Validate a manifest and extract the eligible candidates.
    ///
    /// Any problem invalidates the whole file; the `Err` carries a per-entry
    /// detail report for the debug log.
    fn validate(manifest: ModManifest, path: &Path) -> std::result::Result<Vec<CandidateType>, String> {
        if manifest.abi_revision != ABI_REVISION {
            return Err(format!(
                "unsupported manifest ABI revision {} (loader expects {})",
                manifest.abi_revision, ABI_REVISION
            ));
        }

        let mut problems = Vec::new();
        let mut candidates = Vec::new();

        for entry in manifest.entries {
            if !Self::eligible(&entry) {
                continue;
            }
            if entry.name.is_empty() {
                problems.push("concrete entry with an empty type name".to_string());
                continue;
            }
            match entry.ctor {
                Some(ctor) => candidates.push(CandidateType {
                    binary: path.to_path_buf(),
                    name: entry.name,
                    kind: entry.kind,
                    ctor,
                }),
                None => problems.push(format!(
                    "concrete entry {} declares no constructor",
                    entry.name
                )),
            }
        }

        if problems.is_empty() {
            Ok(candidates)
        } else {
            let mut report = String::new();
            for problem in &problems {
                let _ = writeln!(report, "{problem}");
            }
            Err(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mods::{Mod, ModCtorFn};

    struct NoopMod {
        identity: String,
    }

    impl Mod for NoopMod {
        fn identity(&self) -> &str {
            &self.identity
        }
        fn set_identity(&mut self, identity: String) {
            self.identity = identity;
        }
        fn priority(&self) -> i32 {
            0
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

    unsafe extern "C" fn noop_ctor() -> *mut dyn Mod {
        Box::into_raw(Box::new(NoopMod {
            identity: "noop".to_string(),
        }))
    }

    fn entry(name: &str, base: &str, kind: TypeKind, ctor: Option<ModCtorFn>) -> ManifestEntry {
        ManifestEntry {
            name: name.to_string(),
            base: base.to_string(),
            kind,
            ctor,
        }
    }

    #[test]
    fn abi_revision_mismatch_rejects_the_whole_file() {
        let manifest = ModManifest {
            abi_revision: ABI_REVISION + 1,
            entries: vec![entry("Good", CONTRACT_ID, TypeKind::Concrete, Some(noop_ctor))],
        };

        let report = ModScanner::validate(manifest, Path::new("mods/future.so")).unwrap_err();
        assert!(report.contains("ABI revision"));
    }

    #[test]
    fn ctorless_concrete_entry_invalidates_the_file() {
        let manifest = ModManifest {
            abi_revision: ABI_REVISION,
            entries: vec![
                entry("Good", CONTRACT_ID, TypeKind::Concrete, Some(noop_ctor)),
                entry("Broken", CONTRACT_ID, TypeKind::Concrete, None),
            ],
        };

        // The valid sibling entry does not survive; the whole file is out.
        let report = ModScanner::validate(manifest, Path::new("mods/broken.so")).unwrap_err();
        assert!(report.contains("Broken"));
        assert!(report.contains("no constructor"));
    }

    #[test]
    fn empty_type_name_invalidates_the_file() {
        let manifest = ModManifest {
            abi_revision: ABI_REVISION,
            entries: vec![entry("", CONTRACT_ID, TypeKind::Concrete, Some(noop_ctor))],
        };

        let report = ModScanner::validate(manifest, Path::new("mods/anon.so")).unwrap_err();
        assert!(report.contains("empty type name"));
    }

    #[test]
    fn valid_manifest_yields_only_eligible_candidates() {
        let manifest = ModManifest {
            abi_revision: ABI_REVISION,
            entries: vec![
                entry("Good", CONTRACT_ID, TypeKind::Concrete, Some(noop_ctor)),
                entry("Helper", "example.other/1", TypeKind::Concrete, Some(noop_ctor)),
                entry("AbstractBase", CONTRACT_ID, TypeKind::Abstract, None),
                entry("ContractRoot", CONTRACT_ID, TypeKind::Base, None),
            ],
        };

        let candidates = ModScanner::validate(manifest, Path::new("mods/good.so")).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Good");
        assert_eq!(candidates[0].binary, Path::new("mods/good.so"));
    }
}
