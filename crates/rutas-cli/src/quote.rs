//! # Quote Subcommand
//!
//! Prices a shipment between two branches: resolves the distance over the
//! catalog, then applies the tiered rate, the catalog's base transport cost
//! and the selected optional services.
//!
//! Omitting `--weight` prices with the unspecified-weight mode (mean of the
//! tier rates).

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;

use rutas_core::{Amount, BranchId};
use rutas_pricing::{ParcelWeight, Quote};

use crate::config::LoadedCatalog;

/// Arguments for the `rutas quote` subcommand.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Origin branch id.
    #[arg(long)]
    pub from: u64,
    /// Destination branch id.
    #[arg(long)]
    pub to: u64,
    /// Parcel weight in kilograms.
    #[arg(long)]
    pub weight: Option<Decimal>,
    /// Optional service by catalog name. Repeatable.
    #[arg(long = "service")]
    pub services: Vec<String>,
}

/// Execute the quote subcommand.
pub fn run_quote(args: &QuoteArgs, loaded: &LoadedCatalog) -> Result<u8> {
    let quote = compute_quote(args, loaded)?;
    println!("cost per km:  {}", quote.cost_per_km);
    println!("transport:    {}", quote.transport);
    println!("services:     {}", quote.services);
    println!("total:        {}", quote.total);
    Ok(0)
}

fn compute_quote(args: &QuoteArgs, loaded: &LoadedCatalog) -> Result<Quote> {
    let engine = loaded.require_engine()?;
    let services = args
        .services
        .iter()
        .map(|name| {
            loaded.services.get(name).copied().with_context(|| {
                let known: Vec<&str> = loaded.services.keys().map(String::as_str).collect();
                format!("unknown service {name:?} (known: {})", known.join(", "))
            })
        })
        .collect::<Result<Vec<Amount>>>()?;

    let resolved = loaded
        .network
        .resolve_distance(BranchId(args.from), BranchId(args.to))?;
    let weight = ParcelWeight::from(args.weight);
    tracing::info!(
        route = %resolved.route_id,
        distance = %resolved.distance,
        ?weight,
        "quoting shipment"
    );
    Ok(engine.quote(weight, loaded.base_transport_cost, &services, resolved.distance)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{write, CATALOG_YAML};
    use rust_decimal_macros::dec;

    fn args(weight: Option<Decimal>, services: &[&str]) -> QuoteArgs {
        QuoteArgs {
            from: 1,
            to: 3,
            weight,
            services: services.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn quote_follows_pricing_formula() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = LoadedCatalog::load(&write(&dir, "rutas.yaml", CATALOG_YAML)).unwrap();

        let light = compute_quote(&args(Some(dec!(8)), &["insurance"]), &loaded).unwrap();
        assert_eq!(light.total, Amount::new(dec!(14750)));

        let heavy = compute_quote(&args(Some(dec!(20)), &["insurance"]), &loaded).unwrap();
        assert_eq!(heavy.total, Amount::new(dec!(48500)));
    }

    #[test]
    fn unspecified_weight_uses_mean_rate() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = LoadedCatalog::load(&write(&dir, "rutas.yaml", CATALOG_YAML)).unwrap();
        let q = compute_quote(&args(None, &[]), &loaded).unwrap();
        assert_eq!(q.cost_per_km, Amount::new(dec!(82.5)));
        assert_eq!(q.total, Amount::new(dec!(28625)));
    }

    #[test]
    fn unknown_service_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = LoadedCatalog::load(&write(&dir, "rutas.yaml", CATALOG_YAML)).unwrap();
        let err = run_quote(&args(Some(dec!(1)), &["express"]), &loaded).unwrap_err();
        assert!(err.to_string().contains("unknown service \"express\""));
        assert!(err.to_string().contains("fragile, insurance"));
    }
}
