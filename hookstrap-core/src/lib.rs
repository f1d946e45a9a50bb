//! Core library for the hookstrap bootstrap loader.
//!
//! Provides the binary-derivation half of the loader: reading a compiled
//! source module's metadata, resolving its dependencies, and emitting the
//! derived hook module that exposes callable hook points for the source's
//! methods.

pub mod hookgen;
