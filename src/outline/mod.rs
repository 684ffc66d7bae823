//! Outline parsing.
//!
//! Turns the two-level text outline into an ordered list of [`OutlineAction`]s.
//! Parsing is pure: nothing here touches the filesystem except [`read_outline`],
//! which only reads the outline file itself.

pub mod tree_render;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::*;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("Failed to read outline file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse an outline file.
pub fn read_outline(path: &Path, root: &str) -> Result<Vec<OutlineAction>, OutlineError> {
    let text = std::fs::read_to_string(path).map_err(|source| OutlineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_outline(text.lines(), root))
}

/// Parse outline lines into actions, in input order.
///
/// A colon-terminated line opens a section named `{root}.{content}`. Any other
/// non-empty line becomes a leaf of the most recently opened section. Leaves that
/// appear before the first section are dropped.
pub fn parse_outline<'a, I>(lines: I, root: &str) -> Vec<OutlineAction>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut actions = Vec::new();
    let mut current: Option<String> = None;

    for raw in lines {
        let Some(line) = OutlineLine::parse(raw) else {
            continue;
        };

        if line.is_section {
            let name = line.name().to_string();
            let folder = format!("{}.{}", root, name);
            current = Some(folder.clone());
            actions.push(OutlineAction::CreateSection(Section { name, folder }));
            continue;
        }

        if line.content.is_empty() {
            tracing::debug!("Skipping marker-only line {:?}", raw);
            continue;
        }

        match current {
            Some(ref folder) => actions.push(OutlineAction::EmitLeaf(LeafItem {
                name: qualify_leaf(folder, &line.content),
                section: folder.clone(),
            })),
            None => tracing::debug!("Dropping leaf {:?} before any section", line.content),
        }
    }

    actions
}

/// Prefix `name` with `{section_folder}.` unless it already starts with it.
pub fn qualify_leaf(section_folder: &str, name: &str) -> String {
    let prefix = format!("{}.", section_folder);
    if name.starts_with(&prefix) {
        name.to_string()
    } else {
        format!("{}{}", prefix, name)
    }
}
