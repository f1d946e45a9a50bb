//! Hook Module Generation
//!
//! This module derives a companion "hook module" from an existing compiled
//! binary module. The derived artifact exposes, for every eligible method of
//! the source module, a paired before/after hook point that external code can
//! attach to without modifying the source module itself.
//!
//! # Pipeline Stages
//! 1. **Cache check**: Decide whether the existing artifact is still fresh
//!    relative to the source module's modification time
//! 2. **Metadata read**: Load the source module's symbol table and imported
//!    libraries into an in-memory image
//! 3. **Dependency mapping**: Resolve each imported library against the
//!    configured dependency search directories
//! 4. **Hook synthesis**: Emit a before/after hook point pair per method
//! 5. **Output**: Serialize the assembled hook module to disk
//!
//! The source module is never mutated; exactly one output file is written.

pub mod cache;
pub mod error;
pub mod generate;
pub mod image;
pub mod resolve;

pub use cache::Freshness;
pub use error::GenerationError;
pub use generate::{HookEntry, HookGenerator, HookModule, GENERATOR_VERSION, HOOK_PREFIX};
pub use image::{MethodSym, ModuleImage};
