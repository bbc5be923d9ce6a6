//! # Audit Subcommand
//!
//! Prints the catalog irregularities the linearizer recovered from.
//! Exit code 2 when any are found, so CI jobs over the catalog can gate on it.

use anyhow::Result;
use clap::Args;

use rutas_topology::{audit, RouteFinding};

use crate::config::LoadedCatalog;

/// Arguments for the `rutas audit` subcommand.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Print findings as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the audit subcommand.
pub fn run_audit(args: &AuditArgs, loaded: &LoadedCatalog) -> Result<u8> {
    let findings = audit(&loaded.network);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        print!("{}", render_findings(&findings));
    }
    Ok(if findings.is_empty() { 0 } else { 2 })
}

fn render_findings(findings: &[RouteFinding]) -> String {
    if findings.is_empty() {
        return "OK: no catalog irregularities found\n".to_string();
    }
    let mut out = format!("Findings ({}):\n", findings.len());
    for f in findings {
        out.push_str(&format!("  {} {:?}: {}\n", f.route, f.name, f.issue));
    }
    out
}
