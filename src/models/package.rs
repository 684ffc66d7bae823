use serde::{Deserialize, Serialize};

/// Asset list shared by the design-time EF Core packages.
pub const DESIGN_TIME_ASSETS: &str =
    "runtime; build; native; contentfiles; analyzers; buildtransitive";

/// A `<PackageReference>` to add to a manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageSpec {
    pub include: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_assets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_assets: Option<String>,
}

impl PackageSpec {
    pub fn new(include: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            version: version.into(),
            include_assets: None,
            private_assets: None,
        }
    }

    /// Mark as a design-time-only dependency.
    pub fn design_time(mut self) -> Self {
        self.include_assets = Some(DESIGN_TIME_ASSETS.to_string());
        self.private_assets = Some("all".to_string());
        self
    }

    /// The Entity Framework Core package set injected by `scaf patch`.
    pub fn ef_core_defaults() -> Vec<Self> {
        vec![
            Self::new("Microsoft.EntityFrameworkCore", "8.0.0"),
            Self::new("Microsoft.EntityFrameworkCore.Design", "8.0.0").design_time(),
            Self::new("Microsoft.EntityFrameworkCore.Relational", "8.0.0"),
            Self::new("Microsoft.EntityFrameworkCore.SqlServer", "8.0.0"),
            Self::new("Microsoft.EntityFrameworkCore.Tools", "8.0.0").design_time(),
            Self::new("Microsoft.Extensions.Configuration.Json", "8.0.0"),
        ]
    }
}
