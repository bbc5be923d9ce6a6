//! # rutas CLI entry point
//!
//! Parses command-line arguments, loads the catalog, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rutas_cli::audit::{run_audit, AuditArgs};
use rutas_cli::checkpoints::{run_checkpoints, CheckpointsArgs};
use rutas_cli::config::LoadedCatalog;
use rutas_cli::distance::{run_distance, DistanceArgs};
use rutas_cli::quote::{run_quote, QuoteArgs};
use rutas_cli::routes::{run_routes, RoutesArgs};

/// Rutas route-topology and shipment-progress tooling.
///
/// Inspects route catalogs, resolves branch-to-branch distances, prices
/// shipments, and previews checkpoint progress.
#[derive(Parser, Debug)]
#[command(name = "rutas", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog file (YAML or JSON).
    #[arg(long, global = true, env = "RUTAS_CATALOG", default_value = "rutas.yaml")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List routes with their linearized branch sequence.
    Routes(RoutesArgs),

    /// Report catalog irregularities (cycles, orphaned segments, revisits).
    Audit(AuditArgs),

    /// Resolve the distance between two branches.
    Distance(DistanceArgs),

    /// Price a shipment between two branches.
    Quote(QuoteArgs),

    /// Preview segment states for a shipment on a route.
    Checkpoints(CheckpointsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(catalog = %cli.catalog.display(), "rutas CLI starting");

    let loaded = match LoadedCatalog::load(&cli.catalog) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Routes(args) => run_routes(args, &loaded),
        Commands::Audit(args) => run_audit(args, &loaded),
        Commands::Distance(args) => run_distance(args, &loaded),
        Commands::Quote(args) => run_quote(args, &loaded),
        Commands::Checkpoints(args) => run_checkpoints(args, &loaded),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
