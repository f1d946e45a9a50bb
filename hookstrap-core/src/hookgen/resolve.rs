//! Dependency Mapping
//!
//! Resolves a source module's imported library names against the configured
//! dependency search directories. Every import must resolve; a missing
//! dependency is fatal to generation, since hook points synthesized against
//! an incomplete reference set would be unusable.

use crate::hookgen::error::GenerationError;
use crate::hookgen::image::ModuleImage;
use std::path::PathBuf;

/// A resolved import: the library name and the file that satisfies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub name: String,
    pub path: PathBuf,
}

/// Map every imported library of `image` to a file in `search_dirs`.
///
/// Directories are searched in order; the first match wins. The import name
/// is matched against the file name exactly (import names are full sonames,
/// e.g. `libhost.so.1`).
///
/// # Errors
/// `GenerationError::DependencyUnresolved` naming the library and the
/// searched directories if any import has no match.
pub fn map_dependencies(
    image: &ModuleImage,
    search_dirs: &[PathBuf],
) -> Result<Vec<ResolvedDependency>, GenerationError> {
    let mut resolved = Vec::with_capacity(image.imports.len());

    for import in &image.imports {
        let hit = search_dirs
            .iter()
            .map(|dir| dir.join(import))
            .find(|candidate| candidate.is_file());

        match hit {
            Some(path) => {
                log::debug!("Resolved dependency {} -> {}", import, path.display());
                resolved.push(ResolvedDependency {
                    name: import.clone(),
                    path,
                });
            }
            None => {
                return Err(GenerationError::DependencyUnresolved {
                    name: import.clone(),
                    searched: search_dirs.to_vec(),
                });
            }
        }
    }

    Ok(resolved)
}
