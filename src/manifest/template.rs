//! Context template copy.
//!
//! A `XXXDbContext.cs` style template is copied next to a manifest as
//! `Data/{Name}DbContext.cs`, with the template's placeholder replaced by a name
//! fragment derived from the manifest file name.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

const TEMPLATE_SUFFIX: &str = "DbContext";
const DATA_DIR: &str = "Data";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Manifest name {0} has no second-to-last dot segment")]
    NoNameSegment(String),

    #[error("Invalid template pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read template directory: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Find the first `*DbContext.cs` file in `dir`, in name order.
pub fn find_context_template(dir: &Path) -> Result<Option<PathBuf>, TemplateError> {
    let pattern = format!(
        "{}/*{}.cs",
        glob::Pattern::escape(&dir.to_string_lossy()),
        TEMPLATE_SUFFIX
    );

    let mut found = glob::glob(&pattern)?.collect::<Result<Vec<_>, _>>()?;
    found.sort();

    if found.len() > 1 {
        tracing::warn!(
            "Multiple context templates found, using the first one: {}",
            found[0].display()
        );
    }
    Ok(found.into_iter().next())
}

/// Derive the name fragment from a manifest path.
///
/// Takes the second-to-last dot segment of the file stem and strips one trailing
/// `s`: `MyApp.Orders.Infrastructure.csproj` gives `Order`.
pub fn context_fragment(manifest: &Path) -> Result<String, TemplateError> {
    let stem = manifest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let segments: Vec<&str> = stem.split('.').collect();
    if segments.len() < 2 {
        return Err(TemplateError::NoNameSegment(stem));
    }

    let segment = segments[segments.len() - 2];
    Ok(segment.strip_suffix('s').unwrap_or(segment).to_string())
}

/// Placeholder used inside a template: its file stem minus `DbContext`.
pub fn template_placeholder(template: &Path) -> String {
    template
        .file_stem()
        .map(|s| s.to_string_lossy().replace(TEMPLATE_SUFFIX, ""))
        .unwrap_or_default()
}

/// Copy `template` into the manifest's `Data/` folder, renamed and rewritten
/// for the manifest. Returns the written path.
pub fn copy_context_template(template: &Path, manifest: &Path) -> Result<PathBuf, TemplateError> {
    let fragment = context_fragment(manifest)?;
    let placeholder = template_placeholder(template);

    let data_dir = manifest
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DATA_DIR);
    fs::create_dir_all(&data_dir).map_err(|source| TemplateError::Io {
        path: data_dir.clone(),
        source,
    })?;

    let content = fs::read_to_string(template).map_err(|source| TemplateError::Io {
        path: template.to_path_buf(),
        source,
    })?;

    let content = if placeholder.is_empty() {
        tracing::warn!(
            "Template {} has no placeholder, copying unchanged",
            template.display()
        );
        content
    } else {
        content.replace(&placeholder, &fragment)
    };

    let destination = data_dir.join(format!("{}{}.cs", fragment, TEMPLATE_SUFFIX));
    fs::write(&destination, content).map_err(|source| TemplateError::Io {
        path: destination.clone(),
        source,
    })?;

    tracing::info!(
        "Copied {} to {}, replacing '{}' with '{}'",
        template.display(),
        destination.display(),
        placeholder,
        fragment
    );
    Ok(destination)
}
