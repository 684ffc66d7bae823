//! Materializes parsed outline actions on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ScaffoldConfig;
use crate::models::*;
use crate::scaffold::{ScaffoldRequest, Scaffolder};

/// Executes [`OutlineAction`]s under a base directory.
///
/// Sections become directories; leaves are handed to the [`Scaffolder`] with the
/// section directory as working directory. Failures are collected per item in the
/// returned [`BuildReport`] and never stop the run.
pub struct HierarchyBuilder<S> {
    base_dir: PathBuf,
    framework: String,
    api_suffix: String,
    placeholder_file: String,
    scaffolder: S,
}

impl<S: Scaffolder> HierarchyBuilder<S> {
    pub fn new(base_dir: impl Into<PathBuf>, scaffolder: S) -> Self {
        Self::with_config(base_dir, scaffolder, &ScaffoldConfig::default())
    }

    pub fn with_config(
        base_dir: impl Into<PathBuf>,
        scaffolder: S,
        config: &ScaffoldConfig,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            framework: config.framework.clone(),
            api_suffix: config.api_suffix.clone(),
            placeholder_file: config.placeholder_file.clone(),
            scaffolder,
        }
    }

    pub fn scaffolder(&self) -> &S {
        &self.scaffolder
    }

    pub fn run(&mut self, actions: &[OutlineAction]) -> BuildReport {
        let mut report = BuildReport::default();
        for action in actions {
            match action {
                OutlineAction::CreateSection(section) => {
                    self.create_section(section, &mut report)
                }
                OutlineAction::EmitLeaf(leaf) => self.emit_leaf(leaf, &mut report),
            }
        }
        report
    }

    fn create_section(&self, section: &Section, report: &mut BuildReport) {
        let path = self.base_dir.join(&section.folder);

        if path.exists() {
            tracing::info!("Folder {} already exists", path.display());
            report.sections_existing.push(path);
            return;
        }

        match fs::create_dir_all(&path) {
            Ok(()) => {
                tracing::info!("Created folder: {}", path.display());
                report.sections_created.push(path);
            }
            Err(e) => {
                tracing::warn!("Failed to create folder {}: {}", path.display(), e);
                report.failures.push(BuildFailure {
                    item: section.folder.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    fn emit_leaf(&mut self, leaf: &LeafItem, report: &mut BuildReport) {
        let section_dir = self.base_dir.join(&leaf.section);
        let request = ScaffoldRequest {
            project: leaf.name.clone(),
            template: ProjectTemplate::for_project(&leaf.name, &self.api_suffix),
            framework: self.framework.clone(),
            working_dir: section_dir.clone(),
        };

        if let Err(e) = self.scaffolder.scaffold(&request) {
            tracing::warn!("Failed to scaffold {}: {}", leaf.name, e);
            report.failures.push(BuildFailure {
                item: leaf.name.clone(),
                message: e.to_string(),
            });
            return;
        }

        remove_placeholder(&section_dir.join(&leaf.name), &self.placeholder_file);
        report.projects.push(leaf.name.clone());
    }
}

fn remove_placeholder(project_dir: &Path, file: &str) {
    let path = project_dir.join(file);
    if !path.exists() {
        return;
    }
    match fs::remove_file(&path) {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
    }
}
