//! # Catalog File
//!
//! Loads the reference data the data layer would supply from a single YAML
//! or JSON file, chosen by extension:
//!
//! ```yaml
//! branches:
//!   - { id: 1, address: "Av. Pellegrini 1200", city: Rosario }
//! segments:
//!   - { seq: 1, origin: 1, destination: 2, distance: 100, duration_min: 80 }
//! routes:
//!   - { id: 1, name: Rosario - Córdoba }
//! route_segments:
//!   - { route: 1, segment: 1 }
//! rate_tiers:
//!   - { weight_ceiling: 10, cost_per_km: 15 }
//! services:
//!   insurance: 3000
//! base_transport_cost: 8000
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use rutas_core::{
    Amount, Branch, BranchRegistry, RouteCatalog, RouteHeader, RouteSegmentLink, RutasError,
    Segment,
};
use rutas_pricing::{PricingEngine, RateTable, RateTier};
use rutas_topology::RouteNetwork;

/// The catalog file as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    pub branches: Vec<Branch>,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub routes: Vec<RouteHeader>,
    #[serde(default)]
    pub route_segments: Vec<RouteSegmentLink>,
    #[serde(default)]
    pub rate_tiers: Vec<RateTier>,
    /// Optional services by name.
    #[serde(default)]
    pub services: BTreeMap<String, Amount>,
    #[serde(default)]
    pub base_transport_cost: Amount,
}

impl CatalogFile {
    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON catalog {}", path.display())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML catalog {}", path.display())),
            _ => bail!(
                "unsupported catalog format: {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        }
    }
}

/// A validated catalog with its derived route network and pricing setup.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: RouteCatalog,
    pub network: RouteNetwork,
    /// `None` when the file declares no rate tiers.
    pub engine: Option<PricingEngine>,
    pub services: BTreeMap<String, Amount>,
    pub base_transport_cost: Amount,
}

impl LoadedCatalog {
    /// Validate a parsed catalog file and linearize its routes.
    pub fn from_file(file: CatalogFile) -> Result<Self> {
        if file.base_transport_cost.is_negative() {
            return Err(RutasError::Validation(format!(
                "base_transport_cost must not be negative, got {}",
                file.base_transport_cost
            ))
            .into());
        }
        if let Some((name, cost)) = file.services.iter().find(|(_, c)| c.is_negative()) {
            return Err(RutasError::Validation(format!(
                "service {name:?} has negative cost {cost}"
            ))
            .into());
        }

        let branches = BranchRegistry::new(file.branches).map_err(RutasError::from)?;
        let catalog = RouteCatalog::assemble(branches, file.segments, file.routes, &file.route_segments)
            .map_err(RutasError::from)?;
        let engine = if file.rate_tiers.is_empty() {
            None
        } else {
            Some(PricingEngine::new(
                RateTable::new(file.rate_tiers).context("invalid rate_tiers")?,
            ))
        };
        let network = RouteNetwork::from_catalog(&catalog);
        tracing::debug!(
            branches = catalog.branches().len(),
            routes = catalog.routes().len(),
            "catalog loaded"
        );

        Ok(Self {
            catalog,
            network,
            engine,
            services: file.services,
            base_transport_cost: file.base_transport_cost,
        })
    }

    /// Load, parse and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_file(CatalogFile::load(path)?)
    }

    /// The pricing engine, or an error if the catalog has no rate tiers.
    pub fn require_engine(&self) -> Result<&PricingEngine> {
        match &self.engine {
            Some(engine) => Ok(engine),
            None => bail!("catalog declares no rate_tiers; pricing is unavailable"),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;

    /// Three branches in a line, one clean route, one cyclic route.
    pub const CATALOG_YAML: &str = r#"
branches:
  - { id: 1, address: "Av. Pellegrini 1200", city: Rosario }
  - { id: 2, address: "Bv. San Juan 45", city: Córdoba }
  - { id: 3, address: "San Martín 900", city: Mendoza }
segments:
  - { seq: 1, origin: 1, destination: 2, distance: 100, duration_min: 80 }
  - { seq: 2, origin: 2, destination: 3, distance: 150, duration_min: 120 }
  - { seq: 3, origin: 3, destination: 1, distance: 220, duration_min: 170 }
routes:
  - { id: 1, name: "Rosario - Mendoza" }
  - { id: 2, name: "circuito" }
route_segments:
  - { route: 1, segment: 2 }
  - { route: 1, segment: 1 }
  - { route: 2, segment: 1 }
  - { route: 2, segment: 2 }
  - { route: 2, segment: 3 }
rate_tiers:
  - { weight_ceiling: 10, cost_per_km: 15 }
  - { weight_ceiling: 30, cost_per_km: 150 }
services:
  insurance: 3000
  fragile: 500
base_transport_cost: 8000
"#;

    pub fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}
