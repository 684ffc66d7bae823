//! `.csproj` manifest patching.
//!
//! The manifest is parsed into an element tree, package references are appended
//! to a fresh `<ItemGroup>`, and the tree is serialized back. Nothing outside the
//! new group is rewritten other than whitespace.

pub mod template;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::models::*;

const MANIFEST_EXTENSION: &str = "csproj";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("File must have .csproj extension: {0}")]
    InvalidExtension(PathBuf),

    #[error("File '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse XML file: {0}")]
    Parse(#[from] xmltree::ParseError),

    #[error("Failed to write XML: {0}")]
    Write(String),
}

/// Check that `path` names an existing `.csproj` file.
pub fn validate_manifest_path(path: &Path) -> Result<(), ManifestError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(MANIFEST_EXTENSION) {
        return Err(ManifestError::InvalidExtension(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Patch a manifest in place.
///
/// Copies the context template from `template_dir` first (warnings only), then
/// injects `packages`.
pub fn patch_manifest(
    path: &Path,
    template_dir: &Path,
    packages: &[PackageSpec],
) -> Result<PatchReport, ManifestError> {
    validate_manifest_path(path)?;

    match template::find_context_template(template_dir) {
        Ok(Some(source)) => {
            if let Err(e) = template::copy_context_template(&source, path) {
                tracing::warn!("Failed to copy context template: {}", e);
            }
        }
        Ok(None) => tracing::info!(
            "No *DbContext.cs template in {}, skipping",
            template_dir.display()
        ),
        Err(e) => tracing::warn!("Failed to look up context template: {}", e),
    }

    add_references_to_file(path, packages)
}

/// Add `packages` to the manifest at `path` and write it back.
pub fn add_references_to_file(
    path: &Path,
    packages: &[PackageSpec],
) -> Result<PatchReport, ManifestError> {
    let io_err = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let text = fs::read_to_string(path).map_err(io_err)?;
    let mut root = parse_manifest(&text)?;
    let report = add_package_references(&mut root, packages);
    let bytes = write_manifest(&root)?;
    fs::write(path, bytes).map_err(io_err)?;

    tracing::info!(
        "Added {} package reference(s) to {}",
        report.added.len(),
        path.display()
    );
    Ok(report)
}

pub fn parse_manifest(text: &str) -> Result<Element, ManifestError> {
    Ok(Element::parse(text.as_bytes())?)
}

/// Serialize with an XML declaration and two-space indentation.
pub fn write_manifest(root: &Element) -> Result<Vec<u8>, ManifestError> {
    let config = EmitterConfig::new()
        .perform_indent(true)
        .indent_string("  ");

    let mut out = Vec::new();
    root.write_with_config(&mut out, config)
        .map_err(|e| ManifestError::Write(e.to_string()))?;
    out.push(b'\n');
    Ok(out)
}

/// `Include` values of every `PackageReference` in the tree.
pub fn existing_packages(root: &Element) -> HashSet<String> {
    let mut names = HashSet::new();
    collect_package_names(root, &mut names);
    names
}

fn collect_package_names(element: &Element, names: &mut HashSet<String>) {
    if element.name == "PackageReference" {
        if let Some(include) = element.attributes.get("Include") {
            if !include.is_empty() {
                names.insert(include.clone());
            }
        }
    }
    for child in &element.children {
        if let XMLNode::Element(child) = child {
            collect_package_names(child, names);
        }
    }
}

/// Append every package not already referenced to a new trailing `<ItemGroup>`.
///
/// The group is only added when at least one package is new.
pub fn add_package_references(root: &mut Element, packages: &[PackageSpec]) -> PatchReport {
    let mut existing = existing_packages(root);
    let mut report = PatchReport::default();
    let mut group = Element::new("ItemGroup");

    for package in packages {
        if !existing.insert(package.include.clone()) {
            tracing::info!("Package '{}' already exists, skipping", package.include);
            report.skipped.push(package.include.clone());
            continue;
        }

        group
            .children
            .push(XMLNode::Element(package_element(package)));
        tracing::info!("Added package: {}", package.include);
        report.added.push(package.include.clone());
    }

    if !group.children.is_empty() {
        root.children.push(XMLNode::Element(group));
    }
    report
}

fn package_element(package: &PackageSpec) -> Element {
    let mut element = Element::new("PackageReference");
    element
        .attributes
        .insert("Include".to_string(), package.include.clone());
    element
        .attributes
        .insert("Version".to_string(), package.version.clone());

    if let Some(ref assets) = package.include_assets {
        element.children.push(XMLNode::Element(text_element("IncludeAssets", assets)));
    }
    if let Some(ref assets) = package.private_assets {
        element.children.push(XMLNode::Element(text_element("PrivateAssets", assets)));
    }
    element
}

fn text_element(name: &str, text: &str) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text.to_string()));
    element
}
