//! Geolocation Module
//!
//! Device-location collaborator. The terminal host has no GPS, so
//! [`TimezoneLocator`] derives a coarse position from the system time zone.

use std::sync::OnceLock;

use iana_time_zone::get_timezone;
use thiserror::Error;
use tzf_rs::DefaultFinder;

use crate::geo::Coordinate;
use crate::locations::{self, LOCATIONS, NamedLocation};

// tzf-rs DefaultFinder is pre-compiled and very fast
static TZF_FINDER: OnceLock<DefaultFinder> = OnceLock::new();

// ===================== PROVIDER =====================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("location access denied")]
    Denied,
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// One-shot position request.
pub trait GeolocationProvider {
    fn locate(&self) -> Result<Coordinate, GeolocationError>;
}

// ===================== TIME ZONE LOCATOR =====================

/// Resolves the directory entry that shares the system's IANA time zone.
#[derive(Debug, Clone)]
pub struct TimezoneLocator {
    zone: Option<String>,
}

impl TimezoneLocator {
    /// Use the time zone the operating system is configured with.
    pub fn from_system() -> Self {
        Self { zone: get_timezone().ok() }
    }

    pub fn with_zone(zone: impl Into<String>) -> Self {
        Self { zone: Some(zone.into()) }
    }
}

impl GeolocationProvider for TimezoneLocator {
    fn locate(&self) -> Result<Coordinate, GeolocationError> {
        let zone = self
            .zone
            .as_deref()
            .ok_or_else(|| GeolocationError::Unavailable("system time zone unknown".into()))?;

        match location_for_zone(zone) {
            Some(loc) => {
                log::debug!("Time zone {} resolved to {}", zone, loc.name);
                Ok(loc.coordinate())
            }
            None => Err(GeolocationError::Unavailable(format!(
                "no known location in time zone {}",
                zone
            ))),
        }
    }
}

/// Directory entry for an IANA zone name.
///
/// The zone's city component ("America/New_York" → "New York") is tried
/// first, ignoring accents, then the first entry whose coordinates fall
/// inside the zone.
pub fn location_for_zone(zone: &str) -> Option<&'static NamedLocation> {
    let city = zone.rsplit('/').next()?.replace('_', " ");
    if let Some(loc) = locations::lookup(&city) {
        return Some(loc);
    }

    let finder = TZF_FINDER.get_or_init(DefaultFinder::new);
    LOCATIONS.iter().find(|l| finder.get_tz_name(l.lon, l.lat) == zone)
}

// ===================== TESTS =====================
