//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the nautical-config.toml
//! file. It names the reference station, the range threshold and watch area used for
//! station filtering, and the units results are reported in.

use crate::area;
use crate::error::Result as CalcResult;
use crate::location::GeoPoint;
use crate::units::{DistanceUnit, PressureUnit, SpeedUnit, TemperatureUnit};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "nautical-config.toml";

/// Application configuration loaded from nautical-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Reference station configuration
    pub station: StationConfig,
    /// Watch area for containment checks
    pub area: AreaConfig,
    /// Units used when reporting results
    pub units: UnitsConfig,
}

/// Reference station configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct StationConfig {
    /// NOAA station ID (e.g., "44013" for Boston buoy)
    pub id: String,
    /// Human-readable station name for reference
    pub name: String,
    /// Station location as `lon, lat[, alt]`, the order station pages use
    pub location: String,
    /// Observations farther than this from the station are out of range
    pub range_meters: f64,
}

/// Watch area configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct AreaConfig {
    /// Boundary ring as `lon, lat` strings. Two entries describe a rectangle.
    pub boundary: Vec<String>,
}

/// Reporting units
#[derive(Debug, Deserialize, Serialize)]
pub struct UnitsConfig {
    pub distance: DistanceUnit,
    pub speed: SpeedUnit,
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            station: StationConfig {
                id: "44013".to_string(),
                name: "Boston, MA".to_string(),
                location: "-70.651, 42.346".to_string(),
                range_meters: 50_000.0,
            },
            area: AreaConfig {
                // Gulf of Maine
                boundary: vec!["-71.0, 41.0".to_string(), "-66.0, 45.0".to_string()],
            },
            units: UnitsConfig {
                distance: DistanceUnit::NauticalMiles,
                speed: SpeedUnit::Knots,
                temperature: TemperatureUnit::DegF,
                pressure: PressureUnit::Pa,
            },
        }
    }
}

impl Config {
    /// Load configuration from nautical-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => {
                info!(station = %config.station.name, "loaded configuration");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from specified path, reporting why it failed
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&contents)?)
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    /// Parsed station location
    pub fn home_point(&self) -> CalcResult<GeoPoint> {
        GeoPoint::parse(&self.station.location)
    }

    /// Parsed watch area boundary
    pub fn boundary_points(&self) -> CalcResult<Vec<GeoPoint>> {
        self.area
            .boundary
            .iter()
            .map(|text| GeoPoint::parse(text))
            .collect()
    }

    /// Whether `point` lies in the configured watch area
    pub fn in_watch_area(&self, point: &GeoPoint) -> CalcResult<bool> {
        area::contains(&self.boundary_points()?, point)
    }
}
