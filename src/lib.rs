//! Scaffold and patch multi-project .NET solutions.
//!
//! - [`outline`]: parse a two-level text outline into ordered actions.
//! - [`hierarchy`]: create section folders and scaffold leaf projects.
//! - [`scaffold`]: the external project-scaffolding seam (`dotnet new`).
//! - [`manifest`]: inject package references into a `.csproj` and copy the context template.

pub mod config;
pub mod hierarchy;
pub mod manifest;
pub mod models;
pub mod outline;
pub mod scaffold;
