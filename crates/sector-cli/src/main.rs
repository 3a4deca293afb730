//! sector-automation: rehearse the sector design-iteration flows.
//!
//! Runs a flow against an in-memory environment loaded from a JSON
//! snapshot, so names, ordering and artifacts can be checked before the
//! same steps run against the real modeling environment.
//!
//! # Commands
//!
//! - `sector-automation comparison` - import, materialize and section each design
//! - `sector-automation pictures` - capture one image per listed design
//! - `sector-automation extraction` - save, clear, reinitialize and export
//! - `sector-automation parameters` - list scalar parameters
//! - `sector-automation init-config <FILE>` - write the default settings file

use std::path::PathBuf;

use anyhow::{Context, Result};
use batch_engine::Automation;
use clap::{Parser, Subcommand};
use design_ops::format_parameter;
use run_config::ConfigMetadata;
use sector_types::{DirectoryKind, PathConfig};

/// Sector design-iteration automation
#[derive(Parser)]
#[command(name = "sector-automation")]
#[command(about = "Rehearse sector design-iteration flows", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file written by `init-config`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Environment snapshot to rehearse against (empty if omitted)
    #[arg(long, global = true)]
    world: Option<PathBuf>,

    /// Where to write the environment after the flow
    #[arg(long, global = true)]
    world_out: Option<PathBuf>,

    /// Where to write the run report
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import, materialize and section every design in the range
    Comparison,

    /// Capture one image per listed design
    Pictures,

    /// Save the simulation, reset the engine and export the sector body
    Extraction,

    /// List every scalar parameter with its value and units
    Parameters,

    /// Write the default settings to a file
    InitConfig {
        #[arg(name = "FILE")]
        path: PathBuf,

        /// Name recorded in the file metadata
        #[arg(long, default_value = "sector automation")]
        name: String,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Commands::InitConfig { path, name } = &cli.command {
        let settings = batch_engine::AutomationSettings::default();
        run_config::save_settings_file(path, &settings, &ConfigMetadata::new(name.as_str()))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote default settings");
        return Ok(());
    }

    let settings = sector_cli::load_settings(cli.config.as_deref())?;
    let mut host = sector_cli::load_host(cli.world.as_deref())?;
    let paths = PathConfig::from_env();
    for kind in DirectoryKind::ALL {
        tracing::info!(%kind, dir = %paths.get(kind), "resolved directory");
    }
    let mut automation = Automation::new(settings, paths);

    let outcome = match cli.command {
        Commands::Comparison => {
            sector_cli::register_design_files(
                &mut host,
                &automation.paths.designs,
                &automation.settings,
            )?;
            automation.run_comparison(&mut host)
        }
        Commands::Pictures => automation.run_pictures(&mut host),
        Commands::Extraction => automation.run_extraction(&mut host),
        Commands::Parameters => {
            for parameter in automation.run_parameters(&host) {
                println!("{}", format_parameter(&parameter));
            }
            Ok(())
        }
        Commands::InitConfig { .. } => Ok(()),
    };

    if let Some(path) = &cli.world_out {
        sector_cli::save_world(&host, path)?;
    }
    if let Some(path) = &cli.report {
        run_config::save_reports_file(path, &automation.reports)
            .with_context(|| format!("writing report {}", path.display()))?;
    }

    outcome.context("flow failed")
}
