use clap::Parser;

mod cli;
mod output;

use cli::{Args, DepInfo, ScopeArg};
use output::Report;
use saf_footprint::constants::ConstantsTable;
use saf_footprint::geo::Coordinate;
use saf_footprint::geolocate::TimezoneLocator;
use saf_footprint::placement::DragEvent;
use saf_footprint::session::Session;

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.show_build_info {
        println!("Built from Git commit: {}\n", env!("APP_GIT_HASH"));
        const DEP_INFO_RAW: &str = include_str!(env!("DEPS_INFO_PATH"));
        let deps: Vec<DepInfo> = serde_json::from_str(DEP_INFO_RAW)?;

        println!("Found {} dependencies.", deps.len());
        for dep in deps {
            println!("- {} v{}", dep.name, dep.version);
            if let Some(sum) = dep.checksum {
                println!("    Checksum: {}", sum);
            }
            if let Some(src) = dep.source {
                println!("    Source:   {}", src);
            }
        }
        return Ok(());
    }

    let table = match &args.constants {
        Some(path) => {
            let table = ConstantsTable::from_json_path(path)?;
            log::info!("Loaded reference constants from {}", path.display());
            table
        }
        None => ConstantsTable::builtin(),
    };

    if args.list_feedstocks {
        output::print_feedstocks(&table);
        return Ok(());
    }
    if args.list_locations {
        output::print_locations();
        return Ok(());
    }

    let default_passengers = table.default_passengers;
    let mut session = Session::new(table)?;

    match args.scope {
        ScopeArg::Passenger => {
            if args.passengers.is_some() {
                log::warn!("--passengers only applies to --scope plane; ignoring it");
            }
            session.set_single_passenger(&args.cabin)?;
        }
        ScopeArg::Plane => {
            session.set_whole_plane(args.passengers.unwrap_or(default_passengers))?;
        }
        ScopeArg::Global => session.set_global_fleet(),
    }

    if let Some(distance) = args.distance {
        session.set_distance_km(distance)?;
    }
    session.set_round_trip(args.round_trip);
    if let Some(id) = args.feedstock.as_deref() {
        session.set_feedstock(id)?;
    }

    if let Some(name) = args.location.as_deref() {
        session.select_location(name);
    }

    if args.locate
        && let Err(e) = session.request_geolocation(&TimezoneLocator::from_system())
    {
        eprintln!(
            "Note: could not determine your location ({}). Keeping {}.",
            e,
            session.config().center
        );
    }

    // A custom coordinate is a marker dropped by the user
    if let (Some(lat), Some(lon)) = (args.latitude, args.longitude) {
        session.handle(DragEvent::Start)?;
        session.handle(DragEvent::End(Coordinate { lat, lon }))?;
    }

    let report = Report::new(&session)?;
    if args.json {
        output::print_json(&report)?;
    } else {
        output::print_report(&report);
    }

    Ok(())
}
