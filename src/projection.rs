//! Geo-Projection Module
//!
//! Turns an abstract land area into something a map can draw: a flat circle
//! of equal area around a center point. Earth curvature is ignored; for the
//! global-fleet scope the circle is illustrative only.

use std::f64::consts::PI;

use serde::Serialize;

use crate::constants::FeedstockProfile;
use crate::geo::{Bounds, Coordinate};

/// Square meters per hectare
pub const SQ_METERS_PER_HECTARE: f64 = 10_000.0;

/// Fill opacity of the footprint circle
pub const CIRCLE_FILL_OPACITY: f64 = 0.4;

/// Stroke width of the footprint circle (px)
pub const CIRCLE_WEIGHT: u32 = 2;

// ===================== PROJECTION =====================

/// Radius (m) of a circle covering `area_hectares`.
///
/// Zero, negative and non-finite areas all give a radius of exactly 0.
pub fn radius_meters(area_hectares: f64) -> f64 {
    if !(area_hectares.is_finite() && area_hectares > 0.0) {
        return 0.0;
    }
    (area_hectares * SQ_METERS_PER_HECTARE / PI).sqrt()
}

/// Side (m) of a square covering `area_hectares`.
pub fn square_side_meters(area_hectares: f64) -> f64 {
    if !(area_hectares.is_finite() && area_hectares > 0.0) {
        return 0.0;
    }
    (area_hectares * SQ_METERS_PER_HECTARE).sqrt()
}

// ===================== MAP CIRCLE =====================

/// What the map rendering surface draws for the land footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapCircle {
    pub center: Coordinate,
    pub radius_m: f64,
    pub color: String,
    pub fill_opacity: f64,
    pub weight: u32,
}

impl MapCircle {
    pub fn new(center: Coordinate, area_hectares: f64, feedstock: &FeedstockProfile) -> Self {
        Self {
            center,
            radius_m: radius_meters(area_hectares),
            color: feedstock.color.clone(),
            fill_opacity: CIRCLE_FILL_OPACITY,
            weight: CIRCLE_WEIGHT,
        }
    }

    /// Nothing worth drawing beyond a marker.
    pub fn is_degenerate(&self) -> bool {
        self.radius_m < 1e-6
    }

    /// View the map re-fits to after a settle event.
    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.center, self.radius_m)
    }

    /// Wider view for the "zoom to area" action.
    pub fn zoom_to_fit_bounds(&self) -> Bounds {
        self.bounds().pad(0.5)
    }
}

// ===================== TESTS =====================
