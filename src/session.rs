//! Estimator Session
//!
//! Owns the constants, the live scenario and the marker placement, and routes
//! user/system events to them one at a time. Metrics and the map circle are
//! derived on demand and never cached.

use crate::constants::{ConstantsError, ConstantsTable, FeedstockProfile};
use crate::engine::{self, DerivedMetrics};
use crate::geo::Coordinate;
use crate::geolocate::{GeolocationError, GeolocationProvider};
use crate::locations::{self, NamedLocation};
use crate::placement::{DragEvent, Placement};
use crate::projection::MapCircle;
use crate::scenario::{LocationSource, ScenarioConfig, ScenarioError, Scope};

pub struct Session {
    table: ConstantsTable,
    config: ScenarioConfig,
    placement: Placement,
}

impl Session {
    /// Start a session on `table`, which is validated first and never
    /// changes afterwards.
    pub fn new(table: ConstantsTable) -> Result<Self, ConstantsError> {
        let config = ScenarioConfig::new(&table)?;
        let placement = Placement::new(config.center);
        Ok(Self { table, config, placement })
    }

    pub fn table(&self) -> &ConstantsTable {
        &self.table
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    // ===================== INPUTS =====================

    pub fn set_distance_km(&mut self, distance_km: f64) -> Result<(), ScenarioError> {
        self.config.set_distance_km(distance_km)
    }

    pub fn set_round_trip(&mut self, round_trip: bool) {
        self.config.round_trip = round_trip;
    }

    pub fn set_feedstock(&mut self, id: &str) -> Result<(), ScenarioError> {
        self.config.set_feedstock(id, &self.table)
    }

    pub fn set_single_passenger(&mut self, cabin_class_id: &str) -> Result<(), ScenarioError> {
        let scope = Scope::SinglePassenger { cabin_class_id: cabin_class_id.to_string() };
        self.config.set_scope(scope, &self.table)
    }

    pub fn set_whole_plane(&mut self, passengers: u32) -> Result<(), ScenarioError> {
        self.config.set_scope(Scope::WholePlane { passengers }, &self.table)
    }

    pub fn set_global_fleet(&mut self) {
        self.config.scope = Scope::GlobalFleet;
    }

    // ===================== LOCATION =====================

    /// Feed a marker drag event. Returns the newly committed center on drag
    /// end; the map view must re-fit only then.
    pub fn handle(&mut self, event: DragEvent) -> Result<Option<Coordinate>, ScenarioError> {
        let event = match event {
            DragEvent::End(c) => DragEvent::End(c.normalized()),
            other => other,
        };
        let Some(committed) = self.placement.handle(event) else {
            return Ok(None);
        };

        if let Err(e) = self.config.set_center(committed, LocationSource::Custom) {
            // Keep marker and scenario in agreement
            self.placement.reset_to(self.config.center);
            return Err(e);
        }
        log::info!("Marker placed at {}", committed);
        Ok(Some(committed))
    }

    /// Jump to a preset location (default location if the name is unknown).
    pub fn select_location(&mut self, name: &str) -> &'static NamedLocation {
        let loc = locations::resolve_or_default(name);
        self.config.center = loc.coordinate();
        self.config.location_source = LocationSource::Named(loc.name.to_string());
        self.placement.reset_to(self.config.center);
        loc
    }

    /// Apply the outcome of a geolocation request atomically. On failure
    /// nothing changes and the error is handed back for the caller to show.
    pub fn apply_geolocation(
        &mut self,
        result: Result<Coordinate, GeolocationError>,
    ) -> Result<Coordinate, GeolocationError> {
        match result {
            Ok(c) => {
                let c = c.normalized();
                if self.config.set_center(c, LocationSource::Geolocated).is_err() {
                    return Err(GeolocationError::Unavailable(format!("invalid position {}", c)));
                }
                self.placement.reset_to(c);
                log::info!("Geolocated at {}", c);
                Ok(c)
            }
            Err(e) => {
                log::warn!("Geolocation failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn request_geolocation(
        &mut self,
        provider: &dyn GeolocationProvider,
    ) -> Result<Coordinate, GeolocationError> {
        let result = provider.locate();
        self.apply_geolocation(result)
    }

    // ===================== OUTPUTS =====================

    pub fn feedstock(&self) -> Result<&FeedstockProfile, ScenarioError> {
        self.config.feedstock(&self.table)
    }

    pub fn metrics(&self) -> Result<DerivedMetrics, ScenarioError> {
        engine::derive(&self.config, &self.table)
    }

    pub fn people_fed(&self) -> Result<f64, ScenarioError> {
        let area = self.metrics()?.land_area_hectare_years;
        Ok(engine::compute_people_fed(area, &self.table))
    }

    /// Circle at the marker's current (possibly uncommitted) position.
    pub fn map_circle(&self) -> Result<MapCircle, ScenarioError> {
        let area = self.metrics()?.land_area_hectare_years;
        Ok(MapCircle::new(self.placement.position(), area, self.feedstock()?))
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::PlacementState;

    struct Denied;

    impl GeolocationProvider for Denied {
        fn locate(&self) -> Result<Coordinate, GeolocationError> {
            Err(GeolocationError::Denied)
        }
    }

    struct Fixed(Coordinate);

    impl GeolocationProvider for Fixed {
        fn locate(&self) -> Result<Coordinate, GeolocationError> {
            Ok(self.0)
        }
    }

    fn session() -> Session {
        Session::new(ConstantsTable::builtin()).unwrap()
    }

    #[test]
    fn test_new_validates_table() {
        let mut empty = ConstantsTable::builtin();
        empty.feedstocks.clear();
        assert!(matches!(Session::new(empty), Err(ConstantsError::NoFeedstocks)));

        let mut barren = ConstantsTable::builtin();
        barren.feedstocks[7].yield_l_per_ha_year = 0.0;
        assert!(matches!(Session::new(barren), Err(ConstantsError::InvalidFeedstock { .. })));
    }

    #[test]
    fn test_drag_commits_center_only() {
        let mut s = session();
        s.set_distance_km(9000.0).unwrap();
        s.set_round_trip(true);
        s.set_feedstock("efuel").unwrap();
        let before = s.config().clone();
        let metrics_before = s.metrics().unwrap();

        let p = Coordinate { lat: 48.95, lon: 2.55 };
        assert_eq!(s.handle(DragEvent::Start).unwrap(), None);
        assert_eq!(s.handle(DragEvent::Move(Coordinate { lat: 48.9, lon: 2.5 })).unwrap(), None);
        // Mid-drag the scenario still holds the old center
        assert_eq!(s.config().center, before.center);
        assert_eq!(s.map_circle().unwrap().center, Coordinate { lat: 48.9, lon: 2.5 });

        assert_eq!(s.handle(DragEvent::End(p)).unwrap(), Some(p));
        assert_eq!(s.config().center, p);
        assert_eq!(s.placement().committed(), p);
        assert_eq!(s.config().location_source, LocationSource::Custom);
        assert_eq!(s.config().distance_km, before.distance_km);
        assert_eq!(s.config().round_trip, before.round_trip);
        assert_eq!(s.config().feedstock_id, before.feedstock_id);
        assert_eq!(s.config().scope, before.scope);
        assert_eq!(s.metrics().unwrap(), metrics_before);
    }

    #[test]
    fn test_drag_end_commits_exact_coordinate() {
        let mut s = session();
        for p in [
            Coordinate { lat: -33.8688, lon: 151.2093 },
            Coordinate { lat: 40.7128, lon: -74.006 },
            Coordinate { lat: 0.1, lon: 0.2 },
        ] {
            s.handle(DragEvent::Start).unwrap();
            assert_eq!(s.handle(DragEvent::End(p)).unwrap(), Some(p));
            assert_eq!(s.config().center, p);
        }
    }

    #[test]
    fn test_drag_end_across_antimeridian_is_wrapped() {
        let mut s = session();
        let committed = s.handle(DragEvent::End(Coordinate { lat: -17.0, lon: 185.0 })).unwrap();
        let c = committed.unwrap();
        assert_eq!(c, Coordinate { lat: -17.0, lon: -175.0 });
        assert_eq!(s.config().center, c);
    }

    #[test]
    fn test_select_location_resets_drag() {
        let mut s = session();
        s.handle(DragEvent::Start).unwrap();
        s.handle(DragEvent::Move(Coordinate { lat: 10.0, lon: 10.0 })).unwrap();

        let loc = s.select_location("Dubai");
        assert_eq!(loc.name, "Dubai");
        assert_eq!(s.placement().state(), PlacementState::Settled);
        assert_eq!(s.map_circle().unwrap().center, loc.coordinate());
        assert_eq!(s.config().location_source, LocationSource::Named("Dubai".into()));
    }

    #[test]
    fn test_unknown_location_falls_back() {
        let mut s = session();
        s.select_location("Tokyo");
        let loc = s.select_location("Gotham");
        assert_eq!(loc.name, "Paris");
        assert_eq!(s.config().center, Coordinate { lat: 48.8566, lon: 2.3522 });
    }

    #[test]
    fn test_geolocation_failure_leaves_state_untouched() {
        let mut s = session();
        s.handle(DragEvent::End(Coordinate { lat: 45.0, lon: 5.0 })).unwrap();
        let before = s.config().clone();
        let placement_before = *s.placement();

        assert_eq!(s.request_geolocation(&Denied), Err(GeolocationError::Denied));
        assert_eq!(s.config(), &before);
        assert_eq!(s.placement(), &placement_before);
    }

    #[test]
    fn test_geolocation_success() {
        let mut s = session();
        let here = Coordinate { lat: 60.17, lon: 24.94 };
        assert_eq!(s.request_geolocation(&Fixed(here)), Ok(here));
        assert_eq!(s.config().center, here);
        assert_eq!(s.config().location_source, LocationSource::Geolocated);
        assert_eq!(s.placement().committed(), here);
    }

    #[test]
    fn test_scope_switching() {
        let mut s = session();
        let single = s.metrics().unwrap().fuel_liters;
        s.set_whole_plane(250).unwrap();
        assert!((s.metrics().unwrap().fuel_liters - 250.0 * single).abs() < 1e-6);
        assert_eq!(s.set_whole_plane(0), Err(ScenarioError::Passengers));
        s.set_single_passenger("business").unwrap();
        assert!((s.metrics().unwrap().fuel_liters - 2.9 * single).abs() < 1e-6);
        assert!(matches!(
            s.set_single_passenger("first"),
            Err(ScenarioError::UnknownCabinClass(_))
        ));
        s.set_global_fleet();
        assert_eq!(s.metrics().unwrap().fuel_liters, 375_000_000_000.0);
        assert!(matches!(s.set_feedstock("coal"), Err(ScenarioError::UnknownFeedstock(_))));
    }

    #[test]
    fn test_map_circle_follows_feedstock() {
        let mut s = session();
        let corn = s.map_circle().unwrap();
        s.set_feedstock("efuel").unwrap();
        let efuel = s.map_circle().unwrap();
        assert!(efuel.radius_m < corn.radius_m);
        assert_eq!(efuel.color, "#06B6D4");
        assert_eq!(s.feedstock().unwrap().name, "E-Fuel (Solar)");
        assert!(s.people_fed().unwrap() > 0.0);
    }
}
