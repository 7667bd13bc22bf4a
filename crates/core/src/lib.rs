//! autopatchelf-core
//!
//! Core library for resolving the shared-library dependencies of ELF binaries
//! to Nix store paths.
//!
//! This crate defines the candidate-line model, the ELF import reader, the
//! tool capabilities (package index, interactive selector, store realiser) with
//! their process-backed implementations, and the resolver that drives them.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends.

pub mod config;
pub mod imports;
pub mod model;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
