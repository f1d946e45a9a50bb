//! Source Module Metadata Reader
//!
//! Loads a compiled module's metadata into an in-memory image: the set of
//! function symbols the module defines and the libraries it imports. The
//! image is a plain owned value, so file data is released on every exit path.
//!
//! ELF and PE objects are supported via `goblin`. Local (private) function
//! symbols are included only when the generator is configured to expose
//! them; this replaces the original "mark everything public" metadata pass
//! with a visibility filter applied at read time.

use crate::hookgen::error::GenerationError;
use goblin::elf::sym::{STB_GLOBAL, STB_WEAK};
use goblin::Object;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A function symbol defined by the source module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSym {
    /// Symbol name as it appears in the module's symbol table
    pub name: String,
    /// Address (ELF virtual address or PE export RVA)
    pub address: u64,
    /// Whether the symbol is externally visible (global or weak binding)
    pub global: bool,
}

/// In-memory representation of a source module's metadata.
#[derive(Debug, Clone)]
pub struct ModuleImage {
    /// Path the image was read from
    pub path: PathBuf,
    /// Function symbols, sorted by name for deterministic output
    pub methods: Vec<MethodSym>,
    /// Imported library names, in link order
    pub imports: Vec<String>,
}

impl ModuleImage {
    /// Read a module's metadata from disk.
    ///
    /// # Arguments
    /// * `path` - Path to the compiled module
    /// * `expose_private` - Include local (non-exported) function symbols
    ///
    /// # Errors
    /// Returns `GenerationError` if the file cannot be read, is not a
    /// recognized object format, or its metadata is malformed.
    pub fn read(path: &Path, expose_private: bool) -> Result<Self, GenerationError> {
        let data = fs::read(path).map_err(|e| GenerationError::io(path, e))?;
        Self::parse(&data, path, expose_private)
    }

    /// Parse module metadata from raw bytes.
    pub fn parse(data: &[u8], path: &Path, expose_private: bool) -> Result<Self, GenerationError> {
        let object = Object::parse(data).map_err(|e| GenerationError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        match object {
            Object::Elf(elf) => Ok(Self::from_elf(&elf, path, expose_private)),
            Object::PE(pe) => Ok(Self::from_pe(&pe, path)),
            _ => Err(GenerationError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn from_elf(elf: &goblin::elf::Elf, path: &Path, expose_private: bool) -> Self {
        let mut methods = Vec::new();
        let mut seen = HashSet::new();

        // Defined function symbols can appear in both tables; first one wins.
        for sym in elf.syms.iter() {
            push_elf_sym(sym, &elf.strtab, expose_private, &mut seen, &mut methods);
        }
        for sym in elf.dynsyms.iter() {
            push_elf_sym(sym, &elf.dynstrtab, expose_private, &mut seen, &mut methods);
        }

        methods.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            path: path.to_path_buf(),
            methods,
            imports: elf.libraries.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn from_pe(pe: &goblin::pe::PE, path: &Path) -> Self {
        // PE images carry no local symbol information, only exports.
        let mut methods: Vec<MethodSym> = pe
            .exports
            .iter()
            .filter_map(|export| {
                export.name.map(|name| MethodSym {
                    name: name.to_string(),
                    address: export.rva as u64,
                    global: true,
                })
            })
            .collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));

        let mut seen = HashSet::new();
        let imports = pe
            .libraries
            .iter()
            .filter(|lib| seen.insert(lib.to_string()))
            .map(|lib| lib.to_string())
            .collect();

        Self {
            path: path.to_path_buf(),
            methods,
            imports,
        }
    }

    /// Methods eligible for hook synthesis under the given visibility policy.
    pub fn eligible_methods(&self, expose_private: bool) -> impl Iterator<Item = &MethodSym> {
        self.methods
            .iter()
            .filter(move |m| m.global || expose_private)
    }
}

fn push_elf_sym(
    sym: goblin::elf::Sym,
    strtab: &goblin::strtab::Strtab,
    expose_private: bool,
    seen: &mut HashSet<String>,
    methods: &mut Vec<MethodSym>,
) {
    if !sym.is_function() || sym.is_import() {
        return;
    }

    let bind = sym.st_bind();
    let global = bind == STB_GLOBAL || bind == STB_WEAK;
    if !global && !expose_private {
        return;
    }

    let Some(name) = strtab.get_at(sym.st_name) else {
        return;
    };
    if name.is_empty() || !seen.insert(name.to_string()) {
        return;
    }

    methods.push(MethodSym {
        name: name.to_string(),
        address: sym.st_value,
        global,
    });
}
