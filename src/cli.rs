//! Command-Line Interface Module
//!
//! Argument parsing and range validation for the saf-footprint host. Every
//! scenario option can also be set through an `SAF_FOOTPRINT_*` variable.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

// ===================== CLI =====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// One seat in the chosen cabin class
    Passenger,
    /// Every seat on the aircraft
    Plane,
    /// One year of the global commercial fleet
    Global,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// What the fuel is counted for
    #[arg(long, value_enum, default_value = "passenger", env = "SAF_FOOTPRINT_SCOPE")]
    pub scope: ScopeArg,

    /// One-way flight distance in km
    #[arg(long, value_parser = parse_distance, env = "SAF_FOOTPRINT_DISTANCE")]
    pub distance: Option<f64>,

    /// Count the return leg as well
    #[arg(long, env = "SAF_FOOTPRINT_ROUND_TRIP")]
    pub round_trip: bool,

    /// Seats on the aircraft (plane scope only)
    #[arg(long, value_parser = parse_passengers, env = "SAF_FOOTPRINT_PASSENGERS")]
    pub passengers: Option<u32>,

    /// Cabin class identifier (passenger scope only)
    #[arg(long, default_value = "economy", env = "SAF_FOOTPRINT_CABIN")]
    pub cabin: String,

    /// Feedstock identifier (see --list-feedstocks)
    #[arg(long, env = "SAF_FOOTPRINT_FEEDSTOCK")]
    pub feedstock: Option<String>,

    /// Center the map on a named location (see --list-locations)
    #[arg(long, env = "SAF_FOOTPRINT_LOCATION")]
    pub location: Option<String>,

    /// Place the footprint at a custom latitude (requires --longitude)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude, requires = "longitude")]
    pub latitude: Option<f64>,
    /// Place the footprint at a custom longitude (requires --latitude)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude, requires = "latitude")]
    pub longitude: Option<f64>,

    /// Center on the device location, derived from the system time zone
    #[arg(long, conflicts_with_all = ["latitude", "longitude"], env = "SAF_FOOTPRINT_LOCATE")]
    pub locate: bool,

    /// Load reference constants from a JSON file instead of the built-in set
    #[arg(long, env = "SAF_FOOTPRINT_CONSTANTS")]
    pub constants: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// List the available feedstocks and exit
    #[arg(long)]
    pub list_feedstocks: bool,

    /// List the named locations and exit
    #[arg(long)]
    pub list_locations: bool,

    /// Show build info from Cargo.lock at time of building
    #[arg(long)]
    pub show_build_info: bool,
}

// Define the structure to match what we serialized in build.rs
#[derive(Debug, Deserialize)]
pub struct DepInfo {
    pub name: String,
    pub version: String,
    pub checksum: Option<String>,
    pub source: Option<String>,
}

// ===================== CLI VALUE PARSERS =====================

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_distance(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    // Longest great-circle route is half the equator
    if !(v > 0.0 && v <= 20_038.0) {
        return Err(format!("Distance must be between 0 and 20038 km, got {}", v));
    }
    Ok(v)
}

fn parse_passengers(s: &str) -> Result<u32, String> {
    let v: u32 = s.parse().map_err(|_| format!("Invalid integer: {}", s))?;
    if !(1..=1000).contains(&v) {
        return Err(format!("Passengers must be between 1 and 1000, got {}", v));
    }
    Ok(v)
}

// ===================== TESTS =====================
