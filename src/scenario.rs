//! Scenario Configuration Module
//!
//! The live set of user-chosen inputs. Scope-specific inputs live inside the
//! [`Scope`] variant, so a whole-plane scenario cannot carry a stale cabin
//! class and a single-passenger one cannot carry a passenger count.

use serde::Serialize;
use thiserror::Error;

use crate::constants::{ConstantsError, ConstantsTable, FeedstockProfile};
use crate::geo::{Coordinate, CoordinateError};
use crate::locations::{self, NamedLocation};

// ===================== TYPES =====================

/// Calculation mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// One seat, scaled by the space its cabin class occupies
    SinglePassenger { cabin_class_id: String },
    /// Every seat of one aircraft (economy-equivalent)
    WholePlane { passengers: u32 },
    /// One year of the entire commercial fleet
    GlobalFleet,
}

/// Where the committed map center came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum LocationSource {
    Named(String),
    Geolocated,
    /// Placed by dragging the marker
    Custom,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("distance must be a positive number of kilometers, got {0}")]
    Distance(f64),
    #[error("passenger count must be at least 1")]
    Passengers,
    #[error("unknown feedstock '{0}'")]
    UnknownFeedstock(String),
    #[error("unknown cabin class '{0}'")]
    UnknownCabinClass(String),
    #[error("feedstock '{0}' has no positive yield")]
    UnusableFeedstock(String),
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

/// The current scenario. One instance lives for the whole session.
///
/// Feedstock and cabin class are held by identifier and resolved against the
/// constants table on every use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioConfig {
    pub scope: Scope,
    /// One-way distance in km
    pub distance_km: f64,
    pub round_trip: bool,
    pub feedstock_id: String,
    pub center: Coordinate,
    pub location_source: LocationSource,
}

// ===================== CONSTRUCTION =====================

impl ScenarioConfig {
    /// Startup defaults: one passenger in the first cabin class, first
    /// feedstock, one-way, centered on the default location. The table is
    /// validated first.
    pub fn new(table: &ConstantsTable) -> Result<Self, ConstantsError> {
        table.validate()?;
        let feedstock = table.default_feedstock().ok_or(ConstantsError::NoFeedstocks)?;
        let cabin_class = table.default_cabin_class().ok_or(ConstantsError::NoCabinClasses)?;
        let home: &NamedLocation = locations::default_location();
        Ok(Self {
            scope: Scope::SinglePassenger { cabin_class_id: cabin_class.id.clone() },
            distance_km: table.default_distance_km,
            round_trip: false,
            feedstock_id: feedstock.id.clone(),
            center: home.coordinate(),
            location_source: LocationSource::Named(home.name.to_string()),
        })
    }

    pub fn with_scope(
        mut self,
        scope: Scope,
        table: &ConstantsTable,
    ) -> Result<Self, ScenarioError> {
        self.set_scope(scope, table)?;
        Ok(self)
    }

    pub fn with_distance_km(mut self, distance_km: f64) -> Result<Self, ScenarioError> {
        self.set_distance_km(distance_km)?;
        Ok(self)
    }

    pub fn with_round_trip(mut self, round_trip: bool) -> Self {
        self.round_trip = round_trip;
        self
    }

    pub fn with_feedstock(
        mut self,
        id: &str,
        table: &ConstantsTable,
    ) -> Result<Self, ScenarioError> {
        self.set_feedstock(id, table)?;
        Ok(self)
    }

    // ===================== VALIDATED SETTERS =====================

    pub fn set_distance_km(&mut self, distance_km: f64) -> Result<(), ScenarioError> {
        if !(distance_km.is_finite() && distance_km > 0.0) {
            return Err(ScenarioError::Distance(distance_km));
        }
        self.distance_km = distance_km;
        Ok(())
    }

    /// Switch scope. Cabin-class ids are checked against `table` and stored
    /// in their canonical spelling.
    pub fn set_scope(
        &mut self,
        scope: Scope,
        table: &ConstantsTable,
    ) -> Result<(), ScenarioError> {
        let scope = match scope {
            Scope::WholePlane { passengers: 0 } => return Err(ScenarioError::Passengers),
            Scope::SinglePassenger { cabin_class_id } => {
                let class = table
                    .cabin_class(&cabin_class_id)
                    .ok_or(ScenarioError::UnknownCabinClass(cabin_class_id))?;
                Scope::SinglePassenger { cabin_class_id: class.id.clone() }
            }
            other => other,
        };
        self.scope = scope;
        Ok(())
    }

    pub fn set_feedstock(
        &mut self,
        id: &str,
        table: &ConstantsTable,
    ) -> Result<(), ScenarioError> {
        let feedstock =
            table.feedstock(id).ok_or_else(|| ScenarioError::UnknownFeedstock(id.to_string()))?;
        self.feedstock_id = feedstock.id.clone();
        Ok(())
    }

    /// Replace the committed center. Called on settle events only.
    pub fn set_center(
        &mut self,
        center: Coordinate,
        source: LocationSource,
    ) -> Result<(), ScenarioError> {
        let center = Coordinate::new(center.lat, center.lon)?;
        self.center = center;
        self.location_source = source;
        Ok(())
    }

    /// Passengers the fuel is counted for (1 outside whole-plane scope).
    pub fn passengers(&self) -> u32 {
        match self.scope {
            Scope::WholePlane { passengers } => passengers,
            _ => 1,
        }
    }

    // ===================== RESOLUTION =====================

    /// The selected feedstock, looked up in `table`. A profile without a
    /// positive finite yield is refused so land area stays finite.
    pub fn feedstock<'t>(
        &self,
        table: &'t ConstantsTable,
    ) -> Result<&'t FeedstockProfile, ScenarioError> {
        let feedstock = table
            .feedstock(&self.feedstock_id)
            .ok_or_else(|| ScenarioError::UnknownFeedstock(self.feedstock_id.clone()))?;
        let y = feedstock.yield_l_per_ha_year;
        if !(y.is_finite() && y > 0.0) {
            return Err(ScenarioError::UnusableFeedstock(feedstock.id.clone()));
        }
        Ok(feedstock)
    }

    /// Space multiplier of the selected cabin class (1.0 outside
    /// single-passenger scope).
    pub fn space_multiplier(&self, table: &ConstantsTable) -> Result<f64, ScenarioError> {
        match &self.scope {
            Scope::SinglePassenger { cabin_class_id } => table
                .cabin_class(cabin_class_id)
                .map(|c| c.space_multiplier)
                .ok_or_else(|| ScenarioError::UnknownCabinClass(cabin_class_id.clone())),
            _ => Ok(1.0),
        }
    }
}

// ===================== TESTS =====================
