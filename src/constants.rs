//! Reference Constants Module
//!
//! Feedstock yields, price multipliers, cabin-class multipliers and the scalar
//! assumptions (fuel burn, emission factors, prices, global totals) that the
//! derivation engine reads. Values are domain assumptions: a different vintage
//! can be loaded from JSON, but it is validated before use.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ===================== BUILT-IN ASSUMPTIONS =====================

/// Average fuel burn per passenger (L per 100 km)
pub const FUEL_CONSUMPTION_L_PER_100KM_PAX: f64 = 3.5;

/// kg CO2e released per liter of fossil jet fuel burnt
pub const JET_FUEL_CO2E_PER_L: f64 = 2.5;

/// Lifecycle emission reduction of SAF vs fossil jet fuel
pub const SAF_EMISSION_REDUCTION: f64 = 0.8;

/// Fossil jet fuel price (USD per liter)
pub const JET_FUEL_PRICE_PER_L: f64 = 0.85;

/// Yearly fuel burn of the global commercial fleet (liters)
pub const GLOBAL_AVIATION_FUEL_L_PER_YEAR: f64 = 375_000_000_000.0;

/// People one hectare of cropland feeds for a year
pub const PEOPLE_FED_PER_HECTARE: f64 = 6.0;

/// Typical widebody seat count
pub const DEFAULT_PASSENGERS: u32 = 250;

/// One-way distance used at startup (km)
pub const DEFAULT_DISTANCE_KM: f64 = 6000.0;

// ===================== TYPES =====================

/// A SAF production pathway and its land/price characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedstockProfile {
    pub id: String,
    pub name: String,
    /// Liters of jet fuel per hectare per year
    pub yield_l_per_ha_year: f64,
    /// SAF price relative to fossil jet fuel
    pub price_multiplier: f64,
    /// Map circle colour (hex)
    pub color: String,
    pub harvest_frequency: String,
    pub description: String,
}

/// Seat class and how much more aircraft space/weight it claims vs economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinClass {
    pub id: String,
    pub name: String,
    pub space_multiplier: f64,
}

/// The complete set of assumptions used for a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantsTable {
    pub feedstocks: Vec<FeedstockProfile>,
    pub cabin_classes: Vec<CabinClass>,
    pub fuel_consumption_l_per_100km_pax: f64,
    pub jet_fuel_co2e_per_l: f64,
    pub saf_emission_reduction: f64,
    pub jet_fuel_price_per_l: f64,
    pub global_aviation_fuel_l_per_year: f64,
    pub people_fed_per_hectare: f64,
    #[serde(default = "default_passengers")]
    pub default_passengers: u32,
    #[serde(default = "default_distance_km")]
    pub default_distance_km: f64,
}

fn default_passengers() -> u32 {
    DEFAULT_PASSENGERS
}

fn default_distance_km() -> f64 {
    DEFAULT_DISTANCE_KM
}

#[derive(Debug, Error)]
pub enum ConstantsError {
    #[error("cannot read constants file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed constants document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("constants table lists no feedstocks")]
    NoFeedstocks,
    #[error("constants table lists no cabin classes")]
    NoCabinClasses,
    #[error("duplicate identifier '{0}'")]
    DuplicateId(String),
    #[error("feedstock '{id}': {reason}")]
    InvalidFeedstock { id: String, reason: &'static str },
    #[error("cabin class '{id}': {reason}")]
    InvalidCabinClass { id: String, reason: &'static str },
    #[error("{name} must be positive and finite, got {value}")]
    InvalidScalar { name: &'static str, value: f64 },
    #[error("emission reduction must be in (0, 1], got {0}")]
    InvalidReduction(f64),
}

// ===================== BUILT-IN TABLE =====================

fn feedstock(
    id: &str,
    name: &str,
    yield_l_per_ha_year: f64,
    price_multiplier: f64,
    color: &str,
    harvest_frequency: &str,
    description: &str,
) -> FeedstockProfile {
    FeedstockProfile {
        id: id.to_string(),
        name: name.to_string(),
        yield_l_per_ha_year,
        price_multiplier,
        color: color.to_string(),
        harvest_frequency: harvest_frequency.to_string(),
        description: description.to_string(),
    }
}

impl ConstantsTable {
    /// The compiled-in assumption set.
    pub fn builtin() -> Self {
        let feedstocks = vec![
            feedstock(
                "corn",
                "Corn (Ethanol)",
                2700.0,
                2.75,
                "#FACC15",
                "Annual harvest",
                "Starch-based ethanol converted to jet fuel. Requires significant arable land.",
            ),
            feedstock(
                "soybean",
                "Soybean (HEFA)",
                630.0,
                1.75,
                "#4ADE80",
                "Annual harvest",
                "Oilseed crop. Lower yield per hectare compared to palm or algae.",
            ),
            feedstock(
                "rapeseed",
                "Rapeseed (HEFA)",
                1700.0,
                1.75,
                "#F59E0B",
                "Annual harvest",
                "Common oilseed in Europe and North America. Moderate yield.",
            ),
            feedstock(
                "palm",
                "Palm Oil (HEFA)",
                4250.0,
                1.75,
                "#EA580C",
                "Continuous harvest (year-round)",
                "High yield oil crop with deforestation and biodiversity concerns.",
            ),
            feedstock(
                "sugarcane",
                "Sugarcane (MO-HEFA)",
                2450.0,
                1.85,
                "#EC4899",
                "Annual harvest",
                "High yield crop, converted via microbial oil or ethanol-to-jet.",
            ),
            feedstock(
                "jatropha",
                "Jatropha",
                550.0,
                3.0,
                "#84CC16",
                "Annual/bi-annual",
                "Hardy plant for marginal soils; toxic seeds that are hard to harvest.",
            ),
            feedstock(
                "algae",
                "Algae",
                25000.0,
                8.0,
                "#065F46",
                "Continuous harvest (daily/weekly)",
                "Pond-grown microalgae. Very high theoretical yield, technically challenging.",
            ),
            feedstock(
                "efuel",
                "E-Fuel (Solar)",
                52000.0,
                5.0,
                "#06B6D4",
                "Requires 1 year of solar output",
                "Synthetic kerosene from renewable electricity and captured CO2.",
            ),
        ];

        let cabin_classes = vec![
            CabinClass { id: "economy".into(), name: "Economy".into(), space_multiplier: 1.0 },
            CabinClass { id: "business".into(), name: "Business".into(), space_multiplier: 2.9 },
        ];

        Self {
            feedstocks,
            cabin_classes,
            fuel_consumption_l_per_100km_pax: FUEL_CONSUMPTION_L_PER_100KM_PAX,
            jet_fuel_co2e_per_l: JET_FUEL_CO2E_PER_L,
            saf_emission_reduction: SAF_EMISSION_REDUCTION,
            jet_fuel_price_per_l: JET_FUEL_PRICE_PER_L,
            global_aviation_fuel_l_per_year: GLOBAL_AVIATION_FUEL_L_PER_YEAR,
            people_fed_per_hectare: PEOPLE_FED_PER_HECTARE,
            default_passengers: DEFAULT_PASSENGERS,
            default_distance_km: DEFAULT_DISTANCE_KM,
        }
    }

    // ===================== LOADING =====================

    /// Parse and validate a table from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConstantsError> {
        let table: Self = serde_json::from_str(s)?;
        table.validate()?;
        Ok(table)
    }

    /// Read, parse and validate a table from a JSON file.
    pub fn from_json_path(path: &Path) -> Result<Self, ConstantsError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConstantsError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }

    /// Check every invariant the engine relies on (non-empty lists,
    /// positive divisors, reduction factor in (0, 1]).
    pub fn validate(&self) -> Result<(), ConstantsError> {
        if self.feedstocks.is_empty() {
            return Err(ConstantsError::NoFeedstocks);
        }
        if self.cabin_classes.is_empty() {
            return Err(ConstantsError::NoCabinClasses);
        }

        let mut seen = HashSet::new();
        for f in &self.feedstocks {
            if !seen.insert(f.id.as_str()) {
                return Err(ConstantsError::DuplicateId(f.id.clone()));
            }
            if !(f.yield_l_per_ha_year.is_finite() && f.yield_l_per_ha_year > 0.0) {
                return Err(ConstantsError::InvalidFeedstock {
                    id: f.id.clone(),
                    reason: "yield must be positive",
                });
            }
            if !(f.price_multiplier.is_finite() && f.price_multiplier > 0.0) {
                return Err(ConstantsError::InvalidFeedstock {
                    id: f.id.clone(),
                    reason: "price multiplier must be positive",
                });
            }
        }

        seen.clear();
        for c in &self.cabin_classes {
            if !seen.insert(c.id.as_str()) {
                return Err(ConstantsError::DuplicateId(c.id.clone()));
            }
            if !(c.space_multiplier.is_finite() && c.space_multiplier >= 1.0) {
                return Err(ConstantsError::InvalidCabinClass {
                    id: c.id.clone(),
                    reason: "space multiplier must be at least 1.0",
                });
            }
        }

        let scalars = [
            ("fuel_consumption_l_per_100km_pax", self.fuel_consumption_l_per_100km_pax),
            ("jet_fuel_co2e_per_l", self.jet_fuel_co2e_per_l),
            ("jet_fuel_price_per_l", self.jet_fuel_price_per_l),
            ("global_aviation_fuel_l_per_year", self.global_aviation_fuel_l_per_year),
            ("people_fed_per_hectare", self.people_fed_per_hectare),
            ("default_distance_km", self.default_distance_km),
        ];
        for (name, value) in scalars {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConstantsError::InvalidScalar { name, value });
            }
        }
        if self.default_passengers == 0 {
            return Err(ConstantsError::InvalidScalar { name: "default_passengers", value: 0.0 });
        }

        let r = self.saf_emission_reduction;
        if !(r.is_finite() && r > 0.0 && r <= 1.0) {
            return Err(ConstantsError::InvalidReduction(r));
        }

        Ok(())
    }

    // ===================== LOOKUP =====================

    pub fn feedstock(&self, id: &str) -> Option<&FeedstockProfile> {
        self.feedstocks.iter().find(|f| f.id.eq_ignore_ascii_case(id))
    }

    pub fn cabin_class(&self, id: &str) -> Option<&CabinClass> {
        self.cabin_classes.iter().find(|c| c.id.eq_ignore_ascii_case(id))
    }

    /// First feedstock in display order (selected at startup).
    pub fn default_feedstock(&self) -> Option<&FeedstockProfile> {
        self.feedstocks.first()
    }

    /// First cabin class in display order (economy in the built-in table).
    pub fn default_cabin_class(&self) -> Option<&CabinClass> {
        self.cabin_classes.first()
    }
}

impl Default for ConstantsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ===================== TESTS =====================
