//! Treatment cost estimates: a fixed per-acre base cost scaled by farm size.

use serde::Serialize;

use crate::constants::{
    COST_CURRENCY, COST_RANGE_MAX, COST_RANGE_MIN, DEFAULT_BASE_COST, EQUIPMENT_SHARE, LABOR_SHARE,
    MEDICINES_SHARE,
};
use crate::error::{Error, Result};

/// Base treatment cost per acre, in INR.
const BASE_COSTS: &[(&str, f64)] = &[
    ("Healthy", 0.0),
    ("RedRot", 2400.0),
    ("Brown Spot", 700.0),
    ("BrownRust", 800.0),
    ("Mosaic", 3000.0),
    ("Grassy shoot", 2800.0),
    ("Rust", 650.0),
    ("Yellow Leaf", 500.0),
    ("Pokkah Boeng", 900.0),
    ("Banded Chlorosis", 600.0),
    ("Sett Rot", 1200.0),
    ("Dried Leaves", 400.0),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub medicines: f64,
    pub labor: f64,
    pub equipment: f64,
}

impl CostBreakdown {
    pub fn sum(&self) -> f64 {
        self.medicines + self.labor + self.equipment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub base_cost_per_acre: f64,
    pub total: f64,
    pub breakdown: CostBreakdown,
    pub range: CostRange,
    pub currency: &'static str,
    pub farm_size_acres: f64,
}

/// Holds the per-label cost table. Stateless apart from the table.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    table: &'static [(&'static str, f64)],
    default_base: f64,
}

impl Default for CostEstimator {
    fn default() -> Self {
        CostEstimator { table: BASE_COSTS, default_base: DEFAULT_BASE_COST }
    }
}

impl CostEstimator {
    pub fn new() -> CostEstimator {
        CostEstimator::default()
    }

    pub fn base_cost(&self, label: &str) -> f64 {
        self.table
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, cost)| *cost)
            .unwrap_or(self.default_base)
    }

    /// Linear estimate for treating `farm_size` acres affected by `label`.
    ///
    /// `farm_size` must be finite and strictly positive.
    pub fn estimate(&self, label: &str, farm_size: f64) -> Result<CostEstimate> {
        validate_farm_size(farm_size)?;
        let base = self.base_cost(label);
        let total = base * farm_size;
        Ok(CostEstimate {
            base_cost_per_acre: base,
            total,
            breakdown: CostBreakdown {
                medicines: total * MEDICINES_SHARE,
                labor: total * LABOR_SHARE,
                equipment: total * EQUIPMENT_SHARE,
            },
            range: CostRange { min: total * COST_RANGE_MIN, max: total * COST_RANGE_MAX },
            currency: COST_CURRENCY,
            farm_size_acres: farm_size,
        })
    }
}

pub fn validate_farm_size(farm_size: f64) -> Result<()> {
    if farm_size.is_finite() && farm_size > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidFarmSize(farm_size))
    }
}
