//! Mystery Country Engine
//!
//! Core logic for a single-player geography guessing game. The player types
//! a country name in Spanish or English; the engine resolves it against a
//! bilingual dictionary (accent and case insensitive), measures the
//! great-circle distance from the guessed country's centroid to a secretly
//! chosen target, classifies that distance into a color tier, and keeps the
//! session state the renderer needs: attempt history, a deduplicated
//! closest-miss list, and a reveal toggle.
//!
//! # Feedback ladder
//!
//! Distances are scaled against [`MAX_DISTANCE_KM`] and bucketed by ratio:
//!
//! | Ratio        | Tier      | Color             |
//! |--------------|-----------|-------------------|
//! | exact match  | Exact     | intense green     |
//! | > 0.8        | Freezing  | near white        |
//! | > 0.6        | Cold      | light orange      |
//! | > 0.4        | Cool      | mid orange        |
//! | > 0.2        | Warm      | dark orange       |
//! | > 0.05       | Hot       | brown             |
//! | otherwise    | Scorching | red               |
//!
//! Shared reference data ([`NameResolver`], [`GeoIndex`]) is immutable after
//! load and safe to share; a [`GameSession`] belongs to exactly one player.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

pub mod feedback;
pub mod geo;
pub mod loader;
pub mod names;
pub mod session;

pub use feedback::{classify, Rgba, Tier};
pub use geo::GeoIndex;
pub use names::{normalize, Language, NameResolver};
pub use session::{GameSession, Guess, GuessReport, IncorrectEntry, ViewModel};

/// Canonical country key. The English display name doubles as the id: it is
/// the key shared by the name table and the geometry source.
pub type CountryId = String;

/// Distance at which feedback bottoms out; roughly the far side of the world.
pub const MAX_DISTANCE_KM: f64 = 11_000.0;

/// Selection weight for the curated priority countries (default weight is 1).
pub const PRIORITY_WEIGHT: f64 = 40.0;

/// Well-known countries favored when picking a new target. Every country in
/// the index stays reachable; these are just heavily over-weighted.
pub const PRIORITY_COUNTRIES: &[&str] = &[
    // Hispanic America
    "Argentina",
    "Bolivia",
    "Chile",
    "Colombia",
    "Costa Rica",
    "Cuba",
    "Ecuador",
    "El Salvador",
    "Guatemala",
    "Honduras",
    "Mexico",
    "Nicaragua",
    "Panama",
    "Paraguay",
    "Peru",
    "Dominican Republic",
    "Uruguay",
    "Venezuela",
    "Puerto Rico",
    "Equatorial Guinea",
    // Europe
    "Spain",
    "France",
    "Germany",
    "Italy",
    "Portugal",
    "Netherlands",
    "Belgium",
    "Poland",
    "Sweden",
    "Norway",
    "Finland",
    "United Kingdom",
    "Switzerland",
    "Austria",
    "Denmark",
    "Ireland",
    "Czech Republic",
    "Hungary",
    "Greece",
    "Turkey",
    "Ukraine",
    "Romania",
    "Bulgaria",
    "Croatia",
    "Serbia",
    // Elsewhere
    "Japan",
    "China",
    "Australia",
    "South Africa",
    "Morocco",
    "Algeria",
    "Tunisia",
    "Egypt",
    "Libya",
];

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("geometry source contains no usable country features")]
    NoCountries,
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Recoverable guess rejections. These are informational, surfaced to the
/// player as-is; no session state is mutated when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("that country is not in the map or the dictionary")]
    UnknownCountry,
    #[error("no geometry available for {0}")]
    NoGeometry(CountryId),
    #[error("pick a mystery country first")]
    NoActiveTarget,
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another point in km.
    pub fn distance_km(&self, other: &LatLon) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine distance between two points in km.
///
/// Spherical approximation (R = 6371 km); deterministic and symmetric.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const R: f64 = 6371.0;

    let lat1_rad = lat1 * PI / 180.0;
    let lat2_rad = lat2 * PI / 180.0;
    let dlat = (lat2 - lat1) * PI / 180.0;
    let dlon = (lon2 - lon1) * PI / 180.0;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    R * c
}
