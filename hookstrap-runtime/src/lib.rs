//! Runtime library for the hookstrap bootstrap loader.
//!
//! Provides the plugin half of the loader: the extension contract, the
//! directory scanner, the interception bootstrap, the registry, and the
//! lifecycle runner that turns discovered candidate types into running
//! mods. The [`startup`] module ties both halves together into the single
//! sequential startup pass.

pub mod config;
pub mod mods;
pub mod startup;
