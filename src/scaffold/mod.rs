//! External project scaffolding.
//!
//! The hierarchy builder never runs processes directly; it hands a
//! [`ScaffoldRequest`] to a [`Scaffolder`]. [`DotnetScaffolder`] is the real
//! implementation backed by `dotnet new`.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::config::ScaffoldConfig;
use crate::models::ProjectTemplate;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status} while creating {project}: {stderr}")]
    Failed {
        program: String,
        project: String,
        status: String,
        stderr: String,
    },
}

/// Everything needed to create one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project: String,
    pub template: ProjectTemplate,
    pub framework: String,
    /// Directory the project folder is created in.
    pub working_dir: PathBuf,
}

pub trait Scaffolder {
    fn scaffold(&mut self, request: &ScaffoldRequest) -> Result<(), ScaffoldError>;
}

/// Runs `dotnet new <template> -n <project> -f <framework>` in the request's working directory.
#[derive(Debug, Clone)]
pub struct DotnetScaffolder {
    program: String,
    api_template: String,
    library_template: String,
}

impl DotnetScaffolder {
    pub fn new(
        program: impl Into<String>,
        api_template: impl Into<String>,
        library_template: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            api_template: api_template.into(),
            library_template: library_template.into(),
        }
    }

    pub fn from_config(config: &ScaffoldConfig) -> Self {
        Self::new(
            config.dotnet.clone(),
            config.api_template.clone(),
            config.library_template.clone(),
        )
    }

    /// Arguments passed after the program name.
    pub fn args(&self, request: &ScaffoldRequest) -> Vec<String> {
        let template = match request.template {
            ProjectTemplate::WebApi => &self.api_template,
            ProjectTemplate::ClassLibrary => &self.library_template,
        };

        let mut args = vec![
            "new".to_string(),
            template.clone(),
            "-n".to_string(),
            request.project.clone(),
            "-f".to_string(),
            request.framework.clone(),
        ];
        if request.template == ProjectTemplate::WebApi {
            args.push("--no-restore".to_string());
        }
        args
    }
}

impl Default for DotnetScaffolder {
    fn default() -> Self {
        Self::from_config(&ScaffoldConfig::default())
    }
}

impl Scaffolder for DotnetScaffolder {
    fn scaffold(&mut self, request: &ScaffoldRequest) -> Result<(), ScaffoldError> {
        let args = self.args(request);
        tracing::info!(
            "Running {} {} in {}",
            self.program,
            args.join(" "),
            request.working_dir.display()
        );

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&request.working_dir)
            .output()
            .map_err(|source| ScaffoldError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("{}", stdout.trim());
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::Failed {
                program: self.program.clone(),
                project: request.project.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
