//! Geographic and Geometry Module
//!
//! Coordinates, WGS84 Earth radius, and the bounding box a map view is
//! re-fitted to around a footprint circle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ===================== CONSTANTS =====================

/// WGS84 semi-major axis (equatorial radius) in meters
pub const A_EQUATOR: f64 = 6_378_137.0;

/// WGS84 semi-minor axis (polar radius) in meters
pub const B_POLAR: f64 = 6_356_752.314245;

// ===================== COORDINATES =====================

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude must be between -90 and 90, got {0}")]
    Latitude(f64),
    #[error("longitude must be between -180 and 180, got {0}")]
    Longitude(f64),
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range (or NaN) values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Clamp latitude and wrap longitude into [-180, 180]. Map surfaces
    /// report longitudes past the antimeridian when the world repeats.
    /// In-range values come back bit-for-bit unchanged.
    pub fn normalized(self) -> Self {
        let lon = if (-180.0..=180.0).contains(&self.lon) {
            self.lon
        } else {
            let wrapped = (self.lon + 180.0).rem_euclid(360.0) - 180.0;
            if wrapped == -180.0 && self.lon > 0.0 { 180.0 } else { wrapped }
        };
        Self { lat: self.lat.clamp(-90.0, 90.0), lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lat={:.4}, lon={:.4}", self.lat, self.lon)
    }
}

// ===================== GEOMETRY FUNCTIONS =====================

/// Calculate Earth radius at a given latitude using WGS84 ellipsoid model.
///
/// # Arguments
/// * `lat_deg` - Latitude in degrees (-90 to 90)
///
/// # Returns
/// Earth radius in meters at the specified latitude
pub fn earth_radius_wgs84(lat_deg: f64) -> f64 {
    let phi = lat_deg.to_radians();
    let (sin, cos) = phi.sin_cos();
    let a2 = A_EQUATOR * A_EQUATOR;
    let b2 = B_POLAR * B_POLAR;
    let numerator = a2 * a2 * cos * cos + b2 * b2 * sin * sin;
    let denominator = (A_EQUATOR * cos).powi(2) + (B_POLAR * sin).powi(2);
    (numerator / denominator).sqrt()
}

// ===================== BOUNDS =====================

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Box enclosing a circle of `radius_m` meters around `center`.
    ///
    /// Longitude span widens with 1/cos(lat) and is capped at the full
    /// globe near the poles.
    pub fn around(center: Coordinate, radius_m: f64) -> Self {
        let r = earth_radius_wgs84(center.lat);
        let dlat = (radius_m.max(0.0) / r).to_degrees();
        let cos_lat = center.lat.to_radians().cos();
        let dlon = if cos_lat > 1e-9 { (dlat / cos_lat).min(180.0) } else { 180.0 };

        Self {
            south: (center.lat - dlat).max(-90.0),
            west: center.lon - dlon,
            north: (center.lat + dlat).min(90.0),
            east: center.lon + dlon,
        }
    }

    /// Grow the box by `ratio` of its size on every side.
    pub fn pad(&self, ratio: f64) -> Self {
        let h = (self.north - self.south).abs() * ratio;
        let w = (self.east - self.west).abs() * ratio;
        Self {
            south: (self.south - h).max(-90.0),
            west: self.west - w,
            north: (self.north + h).min(90.0),
            east: self.east + w,
        }
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        (self.south..=self.north).contains(&c.lat) && (self.west..=self.east).contains(&c.lon)
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_radius_wgs84_reasonable() {
        let r_equator = earth_radius_wgs84(0.0);
        let r_pole = earth_radius_wgs84(90.0);

        assert!(r_equator > 6_370_000.0 && r_equator < 6_380_000.0);
        assert!(r_pole > 6_350_000.0 && r_pole < 6_360_000.0);
        assert!(r_equator > r_pole);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(48.8566, 2.3522).is_ok());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
        assert_eq!(Coordinate::new(91.0, 0.0), Err(CoordinateError::Latitude(91.0)));
        assert_eq!(Coordinate::new(0.0, -181.0), Err(CoordinateError::Longitude(-181.0)));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_normalized() {
        let c = Coordinate { lat: 10.0, lon: 190.0 }.normalized();
        assert!((c.lon + 170.0).abs() < 1e-9);
        let c = Coordinate { lat: -95.0, lon: -200.0 }.normalized();
        assert_eq!(c.lat, -90.0);
        assert!((c.lon - 160.0).abs() < 1e-9);
        assert_eq!(Coordinate { lat: 0.0, lon: 180.0 }.normalized().lon, 180.0);
        assert_eq!(Coordinate { lat: 0.0, lon: -180.0 }.normalized().lon, -180.0);
        assert_eq!(Coordinate { lat: 0.0, lon: 540.0 }.normalized().lon, 180.0);
    }

    #[test]
    fn test_normalized_keeps_in_range_values_exact() {
        for c in [
            Coordinate { lat: 48.8566, lon: 2.3522 },
            Coordinate { lat: 48.95, lon: 2.55 },
            Coordinate { lat: 60.17, lon: 24.94 },
            Coordinate { lat: -33.8688, lon: 151.2093 },
            Coordinate { lat: 19.4326, lon: -99.1332 },
        ] {
            assert_eq!(c.normalized(), c);
        }
    }

    #[test]
    fn test_bounds_around_equator() {
        let c = Coordinate { lat: 0.0, lon: 10.0 };
        // ~1 degree of latitude at the equator
        let b = Bounds::around(c, 111_320.0);
        assert!((b.north - 1.0).abs() < 0.01);
        assert!((b.south + 1.0).abs() < 0.01);
        // At the equator lon span equals lat span
        assert!(((b.east - b.west) - (b.north - b.south)).abs() < 1e-9);
        assert!(b.contains(c));
    }

    #[test]
    fn test_bounds_widen_with_latitude() {
        let equator = Bounds::around(Coordinate { lat: 0.0, lon: 0.0 }, 5000.0);
        let oslo = Bounds::around(Coordinate { lat: 60.0, lon: 0.0 }, 5000.0);
        let w_eq = equator.east - equator.west;
        let w_60 = oslo.east - oslo.west;
        // cos(60°) = 0.5 → roughly twice as wide
        assert!(w_60 > 1.9 * w_eq && w_60 < 2.1 * w_eq);
    }

    #[test]
    fn test_bounds_zero_radius_and_pole() {
        let c = Coordinate { lat: 48.8566, lon: 2.3522 };
        let b = Bounds::around(c, 0.0);
        assert_eq!(b.north, c.lat);
        assert_eq!(b.west, c.lon);

        let pole = Bounds::around(Coordinate { lat: 90.0, lon: 0.0 }, 1000.0);
        assert_eq!(pole.north, 90.0);
        assert_eq!(pole.east - pole.west, 360.0);
    }

    #[test]
    fn test_bounds_pad() {
        let b = Bounds { south: 0.0, west: 0.0, north: 2.0, east: 4.0 };
        let p = b.pad(0.5);
        assert_eq!(p, Bounds { south: -1.0, west: -2.0, north: 3.0, east: 6.0 });
    }
}
