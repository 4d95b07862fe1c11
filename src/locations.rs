//! Named-Location Directory
//!
//! Preset map centers offered to the user. Lookups that miss fall back to
//! [`DEFAULT_LOCATION`].

use serde::Serialize;

use crate::geo::Coordinate;

/// Name of the fallback location
pub const DEFAULT_LOCATION: &str = "Paris";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedLocation {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<&'static str>,
}

impl NamedLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate { lat: self.lat, lon: self.lon }
    }
}

const fn city(name: &'static str, lat: f64, lon: f64, country: &'static str) -> NamedLocation {
    NamedLocation { name, lat, lon, country: Some(country) }
}

/// Sorted by name.
pub static LOCATIONS: [NamedLocation; 42] = [
    city("Amsterdam", 52.3676, 4.9041, "Netherlands"),
    city("Atlanta", 33.7490, -84.3880, "USA"),
    city("Auckland", -36.8485, 174.7633, "New Zealand"),
    city("Bangkok", 13.7563, 100.5018, "Thailand"),
    city("Beijing", 39.9042, 116.4074, "China"),
    city("Berlin", 52.5200, 13.4050, "Germany"),
    city("Bogotá", 4.7110, -74.0721, "Colombia"),
    city("Buenos Aires", -34.6037, -58.3816, "Argentina"),
    city("Cairo", 30.0444, 31.2357, "Egypt"),
    city("Cape Town", -33.9249, 18.4241, "South Africa"),
    city("Chicago", 41.8781, -87.6298, "USA"),
    city("Delhi", 28.6139, 77.2090, "India"),
    city("Dubai", 25.2048, 55.2708, "UAE"),
    city("Frankfurt", 50.1109, 8.6821, "Germany"),
    city("Hong Kong", 22.3193, 114.1694, "China"),
    city("Istanbul", 41.0082, 28.9784, "Turkey"),
    city("Johannesburg", -26.2041, 28.0473, "South Africa"),
    city("Lagos", 6.5244, 3.3792, "Nigeria"),
    city("London", 51.5074, -0.1278, "United Kingdom"),
    city("Los Angeles", 34.0522, -118.2437, "USA"),
    city("Madrid", 40.4168, -3.7038, "Spain"),
    city("Melbourne", -37.8136, 144.9631, "Australia"),
    city("Mexico City", 19.4326, -99.1332, "Mexico"),
    city("Miami", 25.7617, -80.1918, "USA"),
    city("Moscow", 55.7558, 37.6173, "Russia"),
    city("Mumbai", 19.0760, 72.8777, "India"),
    city("Nairobi", -1.2921, 36.8219, "Kenya"),
    city("New York", 40.7128, -74.0060, "USA"),
    city("Paris", 48.8566, 2.3522, "France"),
    city("Rio de Janeiro", -22.9068, -43.1729, "Brazil"),
    city("Rome", 41.9028, 12.4964, "Italy"),
    city("San Francisco", 37.7749, -122.4194, "USA"),
    city("Santiago", -33.4489, -70.6693, "Chile"),
    city("São Paulo", -23.5505, -46.6333, "Brazil"),
    city("Seoul", 37.5665, 126.9780, "South Korea"),
    city("Shanghai", 31.2304, 121.4737, "China"),
    city("Singapore", 1.3521, 103.8198, "Singapore"),
    city("Sydney", -33.8688, 151.2093, "Australia"),
    city("Tokyo", 35.6762, 139.6503, "Japan"),
    city("Toronto", 43.6532, -79.3832, "Canada"),
    city("Vancouver", 49.2827, -123.1207, "Canada"),
    city("Zürich", 47.3769, 8.5417, "Switzerland"),
];

/// Lowercase and strip the Latin diacritics used in the directory, so that
/// "Sao Paulo" and "zurich" (as spelled in IANA zone names) still match.
fn fold(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Case- and accent-insensitive lookup.
pub fn lookup(name: &str) -> Option<&'static NamedLocation> {
    let wanted = fold(name);
    LOCATIONS.iter().find(|l| fold(l.name) == wanted)
}

pub fn default_location() -> &'static NamedLocation {
    // The default is part of the static table
    LOCATIONS.iter().find(|l| l.name == DEFAULT_LOCATION).unwrap_or(&LOCATIONS[0])
}

/// Lookup with fallback to the default location.
pub fn resolve_or_default(name: &str) -> &'static NamedLocation {
    lookup(name).unwrap_or_else(|| {
        log::warn!("Unknown location '{}', falling back to {}", name, DEFAULT_LOCATION);
        default_location()
    })
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_case_insensitive() {
        let tokyo = lookup("tokyo").unwrap();
        assert_eq!(tokyo.name, "Tokyo");
        assert_eq!(tokyo.country, Some("Japan"));
        assert_eq!(lookup("  ZÜRICH ").unwrap().name, "Zürich");
    }

    #[test]
    fn test_lookup_ignores_accents() {
        assert_eq!(lookup("Sao Paulo").unwrap().name, "São Paulo");
        assert_eq!(lookup("zurich").unwrap().name, "Zürich");
        assert_eq!(lookup("Bogota").unwrap().name, "Bogotá");
        assert_eq!(fold("São Paulo"), "sao paulo");
    }

    #[test]
    fn test_unknown_falls_back_to_paris() {
        assert!(lookup("Atlantis").is_none());
        let loc = resolve_or_default("Atlantis");
        assert_eq!(loc.name, "Paris");
        assert_eq!(loc.coordinate(), Coordinate { lat: 48.8566, lon: 2.3522 });
    }

    #[test]
    fn test_all_coordinates_valid_and_names_unique() {
        for (i, l) in LOCATIONS.iter().enumerate() {
            assert!(Coordinate::new(l.lat, l.lon).is_ok(), "{} out of range", l.name);
            assert!(
                LOCATIONS[i + 1..].iter().all(|o| o.name != l.name),
                "{} listed twice",
                l.name
            );
        }
    }
}
