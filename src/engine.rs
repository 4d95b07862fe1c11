//! Derivation Engine
//!
//! Pure functions from a [`ScenarioConfig`] and a [`ConstantsTable`] to the
//! fuel, land, emission and cost figures. The only failure is a scenario
//! naming a table entry that is missing or has no positive yield; the
//! formulas themselves cannot fail.

use serde::Serialize;

use crate::constants::{ConstantsTable, FeedstockProfile};
use crate::scenario::{ScenarioConfig, ScenarioError, Scope};

// ===================== TYPES =====================

/// Everything shown to the user for one scenario. Recomputed on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub fuel_liters: f64,
    pub land_area_hectare_years: f64,
    pub emissions_avoided_kg: f64,
    pub fossil_cost_usd: f64,
    pub saf_cost_usd: f64,
}

impl DerivedMetrics {
    /// Extra spend of SAF over fossil jet fuel.
    pub fn saf_premium_usd(&self) -> f64 {
        self.saf_cost_usd - self.fossil_cost_usd
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Costs {
    pub fossil_usd: f64,
    pub saf_usd: f64,
}

// ===================== FORMULAS =====================

/// Liters of jet fuel the scenario burns.
///
/// The global-fleet scope is a separate branch: it returns the yearly fleet
/// total and ignores distance, trip type and seats.
pub fn compute_fuel_liters(
    config: &ScenarioConfig,
    table: &ConstantsTable,
) -> Result<f64, ScenarioError> {
    if let Scope::GlobalFleet = config.scope {
        return Ok(table.global_aviation_fuel_l_per_year);
    }
    let pax = f64::from(config.passengers());
    let class_multiplier = config.space_multiplier(table)?;
    let trip_multiplier = if config.round_trip { 2.0 } else { 1.0 };

    Ok(table.fuel_consumption_l_per_100km_pax
        * config.distance_km
        * pax
        * class_multiplier
        * trip_multiplier
        / 100.0)
}

/// Hectares occupied for one year to grow/produce `fuel_liters` of SAF.
pub fn compute_land_area_hectare_years(fuel_liters: f64, feedstock: &FeedstockProfile) -> f64 {
    fuel_liters / feedstock.yield_l_per_ha_year
}

/// Lifecycle CO2e avoided by replacing `fuel_liters` of fossil fuel with SAF.
/// The reduction factor is one global figure, not per feedstock.
pub fn compute_emissions_avoided_kg(fuel_liters: f64, table: &ConstantsTable) -> f64 {
    fuel_liters * table.jet_fuel_co2e_per_l * table.saf_emission_reduction
}

/// SAF cost is defined relative to the fossil-equivalent cost.
pub fn compute_costs(
    fuel_liters: f64,
    feedstock: &FeedstockProfile,
    table: &ConstantsTable,
) -> Costs {
    let fossil_usd = fuel_liters * table.jet_fuel_price_per_l;
    Costs { fossil_usd, saf_usd: fossil_usd * feedstock.price_multiplier }
}

/// People the same land could feed for a year if it grew food instead.
pub fn compute_people_fed(land_area_hectare_years: f64, table: &ConstantsTable) -> f64 {
    land_area_hectare_years * table.people_fed_per_hectare
}

/// All five metrics for one scenario snapshot.
pub fn derive(
    config: &ScenarioConfig,
    table: &ConstantsTable,
) -> Result<DerivedMetrics, ScenarioError> {
    let feedstock = config.feedstock(table)?;
    let fuel_liters = compute_fuel_liters(config, table)?;
    let costs = compute_costs(fuel_liters, feedstock, table);

    Ok(DerivedMetrics {
        fuel_liters,
        land_area_hectare_years: compute_land_area_hectare_years(fuel_liters, feedstock),
        emissions_avoided_kg: compute_emissions_avoided_kg(fuel_liters, table),
        fossil_cost_usd: costs.fossil_usd,
        saf_cost_usd: costs.saf_usd,
    })
}

// ===================== TESTS =====================
