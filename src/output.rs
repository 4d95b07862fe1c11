//! Output Formatting Module
//!
//! Terminal and JSON rendering of a session's scenario, metrics and map
//! footprint.

use serde::Serialize;

use saf_footprint::constants::{CabinClass, ConstantsTable, FeedstockProfile};
use saf_footprint::engine::DerivedMetrics;
use saf_footprint::format::{
    format_area, format_kg_co2e, format_liters, format_meters, format_popup_label, format_usd,
    group_thousands,
};
use saf_footprint::geo::Bounds;
use saf_footprint::locations::LOCATIONS;
use saf_footprint::projection::{MapCircle, square_side_meters};
use saf_footprint::scenario::{LocationSource, ScenarioConfig, ScenarioError, Scope};
use saf_footprint::session::Session;

// ===================== REPORT =====================

/// Everything the host shows for one scenario.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub scenario: &'a ScenarioConfig,
    pub feedstock: &'a FeedstockProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<&'a CabinClass>,
    pub metrics: DerivedMetrics,
    pub saf_premium_usd: f64,
    pub people_fed: f64,
    pub square_side_m: f64,
    pub area_label: String,
    pub circle: MapCircle,
    pub view: Bounds,
}

impl<'a> Report<'a> {
    pub fn new(session: &'a Session) -> Result<Self, ScenarioError> {
        let scenario = session.config();
        let cabin_class = match &scenario.scope {
            Scope::SinglePassenger { cabin_class_id } => {
                session.table().cabin_class(cabin_class_id)
            }
            _ => None,
        };
        let metrics = session.metrics()?;
        let circle = session.map_circle()?;
        Ok(Self {
            scenario,
            feedstock: session.feedstock()?,
            cabin_class,
            metrics,
            saf_premium_usd: metrics.saf_premium_usd(),
            people_fed: session.people_fed()?,
            square_side_m: square_side_meters(metrics.land_area_hectare_years),
            area_label: format_popup_label(metrics.land_area_hectare_years),
            view: circle.bounds(),
            circle,
        })
    }
}

// ===================== JSON OUTPUT =====================

pub fn print_json(report: &Report) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

// ===================== TERMINAL OUTPUT =====================

fn describe_scope(config: &ScenarioConfig, cabin_class: Option<&CabinClass>) -> String {
    let trip = if config.round_trip { "round trip" } else { "one way" };
    match (&config.scope, cabin_class) {
        (Scope::SinglePassenger { .. }, Some(class)) => format!(
            "1 passenger, {} ({:.1}x space), {} km {}",
            class.name, class.space_multiplier, config.distance_km, trip
        ),
        (Scope::SinglePassenger { cabin_class_id }, None) => {
            format!("1 passenger, {}, {} km {}", cabin_class_id, config.distance_km, trip)
        }
        (Scope::WholePlane { passengers }, _) => {
            format!("Whole plane, {} seats, {} km {}", passengers, config.distance_km, trip)
        }
        (Scope::GlobalFleet, _) => "Global commercial fleet, one year".to_string(),
    }
}

fn describe_location(config: &ScenarioConfig) -> String {
    match &config.location_source {
        LocationSource::Named(name) => format!("{} ({})", name, config.center),
        LocationSource::Geolocated => format!("My location ({})", config.center),
        LocationSource::Custom => format!("Custom placement ({})", config.center),
    }
}

/// Print the full terminal report.
pub fn print_report(report: &Report) {
    let cfg = report.scenario;
    let feedstock = report.feedstock;
    let m = &report.metrics;

    println!("Scenario  : {}", describe_scope(cfg, report.cabin_class));
    println!("Feedstock : {}", feedstock.name);
    println!("Location  : {}", describe_location(cfg));
    println!();

    println!("=== Results ===");
    println!("Fuel required      : {}", format_liters(m.fuel_liters));
    println!("Land area needed   : {}", format_area(m.land_area_hectare_years));
    println!("  Harvest          : {}", feedstock.harvest_frequency);
    let side = format_meters(report.square_side_m);
    println!("  Equivalent square: {} x {}", side, side);
    println!("  Could feed       : {} people for a year", group_thousands(report.people_fed));
    println!("Emissions avoided  : {}", format_kg_co2e(m.emissions_avoided_kg));
    println!("SAF cost           : {}", format_usd(m.saf_cost_usd));
    println!(
        "  vs fossil        : {} ({}x premium, +{})",
        format_usd(m.fossil_cost_usd),
        feedstock.price_multiplier,
        format_usd(report.saf_premium_usd)
    );
    println!();

    println!("=== Map Footprint ===");
    if report.circle.is_degenerate() {
        println!("Area too small to draw; marker only at {}", report.circle.center);
    } else {
        println!(
            "Circle    : radius {} at {} ({}, opacity {:.1})",
            format_meters(report.circle.radius_m),
            report.circle.center,
            report.circle.color,
            report.circle.fill_opacity
        );
    }
    println!("Label     : {}", report.area_label);
    println!(
        "View      : S {:.4} W {:.4} N {:.4} E {:.4}",
        report.view.south, report.view.west, report.view.north, report.view.east
    );
    if matches!(cfg.scope, Scope::GlobalFleet) {
        println!("Note      : global-fleet circle is illustrative only (flat-map approximation)");
    }
}

/// Print the feedstock table.
pub fn print_feedstocks(table: &ConstantsTable) {
    println!("{:<10} {:<22} {:>12} {:>8}", "ID", "Name", "Yield (L/ha)", "Price");
    println!("{:-<55}", "");
    for f in &table.feedstocks {
        println!(
            "{:<10} {:<22} {:>12} {:>7.2}x",
            f.id,
            f.name,
            group_thousands(f.yield_l_per_ha_year),
            f.price_multiplier
        );
    }
    println!();
    println!("Cabin classes:");
    for c in &table.cabin_classes {
        println!("  {:<10} {} ({:.1}x)", c.id, c.name, c.space_multiplier);
    }
}

/// Print the named-location directory.
pub fn print_locations() {
    for l in LOCATIONS.iter() {
        println!(
            "{:<16} {:>9.4} {:>10.4}  {}",
            l.name,
            l.lat,
            l.lon,
            l.country.unwrap_or("")
        );
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(ConstantsTable::builtin()).unwrap()
    }

    #[test]
    fn test_report_fields_agree() {
        let mut session = session();
        session.set_feedstock("efuel").unwrap();
        let report = Report::new(&session).unwrap();
        assert_eq!(report.feedstock.id, "efuel");
        assert_eq!(report.circle.color, "#06B6D4");
        assert!(report.view.contains(report.circle.center));
        assert!((report.saf_premium_usd - 4.0 * report.metrics.fossil_cost_usd).abs() < 1e-6);
        assert!(report.square_side_m > report.circle.radius_m);
    }

    #[test]
    fn test_report_serializes() {
        let mut session = session();
        session.set_whole_plane(250).unwrap();
        let report = Report::new(&session).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scenario"]["scope"]["kind"], "whole_plane");
        assert_eq!(json["scenario"]["scope"]["passengers"], 250);
        assert_eq!(json["scenario"]["feedstock_id"], "corn");
        assert_eq!(json["feedstock"]["name"], "Corn (Ethanol)");
        assert!(json.get("cabin_class").is_none());
        assert_eq!(json["scenario"]["location_source"]["kind"], "named");
        assert_eq!(json["scenario"]["location_source"]["name"], "Paris");
        assert!(json["metrics"]["fuel_liters"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_describe_scope() {
        let table = ConstantsTable::builtin();
        let economy = table.cabin_class("economy");
        let cfg = ScenarioConfig::new(&table).unwrap().with_round_trip(true);
        assert_eq!(
            describe_scope(&cfg, economy),
            "1 passenger, Economy (1.0x space), 6000 km round trip"
        );
        let global = cfg.with_scope(Scope::GlobalFleet, &table).unwrap();
        assert_eq!(describe_scope(&global, None), "Global commercial fleet, one year");
    }
}
