//! Domain models for solution scaffolding.
//!
//! # Core Concepts
//!
//! ## Outline
//!
//! - [`OutlineLine`]: A single classified line of the outline text.
//! - [`Section`]: First-level entry, materialized as a directory named `{root}.{name}`.
//! - [`LeafItem`]: Second-level entry, materialized as a scaffolded project inside its section.
//! - [`OutlineAction`]: The ordered result of parsing an outline.
//!
//! ## Manifest
//!
//! - [`PackageSpec`]: A package reference to inject into a `.csproj` manifest.
//!
//! ## Reports
//!
//! Every run produces a report instead of aborting on the first recoverable failure:
//!
//! - [`BuildReport`]: Outcome of materializing an outline.
//! - [`PatchReport`]: Outcome of patching a manifest.

mod outline;
mod package;
mod report;

pub use outline::*;
pub use package::*;
pub use report::*;
