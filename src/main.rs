use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solution_scaffold::config::ScaffoldConfig;
use solution_scaffold::hierarchy::HierarchyBuilder;
use solution_scaffold::manifest;
use solution_scaffold::outline::{read_outline, tree_render};
use solution_scaffold::scaffold::DotnetScaffolder;

#[derive(Parser)]
#[command(name = "scaf")]
#[command(about = "Scaffold and patch multi-project .NET solutions")]
struct Cli {
    /// JSON config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create section folders and scaffold a project per leaf
    Build {
        /// Outline file
        #[arg(default_value = "list.txt")]
        list_file: PathBuf,

        /// Root name prefixed to every section folder
        #[arg(default_value = "MyApp")]
        root_name: String,

        /// Directory the section folders are created in
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,
    },
    /// Print the hierarchy an outline would produce
    Plan {
        #[arg(default_value = "list.txt")]
        list_file: PathBuf,

        #[arg(default_value = "MyApp")]
        root_name: String,
    },
    /// Add EF Core package references to a .csproj and copy the DbContext template
    Patch {
        csproj_path: PathBuf,

        /// Directory searched for a *DbContext.cs template
        #[arg(short, long, default_value = ".")]
        template_dir: PathBuf,
    },
}

/// Initialize tracing on stderr so stdout only carries command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "solution_scaffold=info,scaf=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = ScaffoldConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Build {
            list_file,
            root_name,
            base_dir,
        } => build(&config, &list_file, &root_name, &base_dir),
        Commands::Plan {
            list_file,
            root_name,
        } => {
            let actions = read_outline(&list_file, &root_name)?;
            print!("{}", tree_render::render_plan(&actions, &config.api_suffix));
            Ok(())
        }
        Commands::Patch {
            csproj_path,
            template_dir,
        } => {
            let report = manifest::patch_manifest(&csproj_path, &template_dir, &config.packages)?;
            println!(
                "Successfully added {} package reference(s) to {} ({} already present)",
                report.added.len(),
                csproj_path.display(),
                report.skipped.len()
            );
            Ok(())
        }
    }
}

fn build(
    config: &ScaffoldConfig,
    list_file: &Path,
    root_name: &str,
    base_dir: &Path,
) -> Result<()> {
    tracing::info!("Outline: {}, root: {}", list_file.display(), root_name);

    let actions = read_outline(list_file, root_name)?;
    let mut builder =
        HierarchyBuilder::with_config(base_dir, DotnetScaffolder::from_config(config), config);
    let report = builder.run(&actions);

    println!(
        "Created {} folder(s), {} already present, scaffolded {} project(s)",
        report.sections_created.len(),
        report.sections_existing.len(),
        report.projects.len()
    );

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("  {}: {}", failure.item, failure.message);
        }
        anyhow::bail!("{} item(s) failed", report.failures.len());
    }
    Ok(())
}
