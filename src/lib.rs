//! Sustainable aviation fuel footprint estimator.
//!
//! Converts a flight scenario into fuel volume, the land needed to grow that
//! fuel from a chosen feedstock, avoided emissions and the cost premium, and
//! projects the land area onto a map as an equal-area circle.

pub mod constants;
pub mod engine;
pub mod format;
pub mod geo;
pub mod geolocate;
pub mod locations;
pub mod placement;
pub mod projection;
pub mod scenario;
pub mod session;
