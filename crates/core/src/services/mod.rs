//! Tool capabilities and the resolver that drives them.
//!
//! - `tools`: capability traits for the package index, the interactive
//!   selector, and the store realiser.
//! - `backends`: implementations that shell out to `nix-locate`, an `fzf`-style
//!   selector, and `nix-store`.
//! - `resolver`: per-binary orchestration and the run report.

pub mod backends;
pub mod resolver;
pub mod tools;
