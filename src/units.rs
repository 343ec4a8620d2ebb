//! # Unit Registry
//!
//! Conversion tables for the unit kinds reported by marine observation stations.
//! Each multiplicative kind has a base unit and a fixed factor per member unit;
//! temperature is affine and handled separately.
//!
//! ## Tables
//!
//! | Kind        | Base unit | Factor meaning            |
//! |-------------|-----------|---------------------------|
//! | Time        | seconds   | base units per unit       |
//! | Distance    | cm        | base units per unit       |
//! | Speed       | m/s       | units per base unit       |
//! | Pressure    | Pa        | units per base unit       |
//! | Salinity    | PSU       | identity                  |
//! | Temperature | (affine)  | °F ↔ °C formula           |
//!
//! Tags are the small integers the station data and cache files carry
//! (e.g. `DistanceUnit::Meters == 4`). The raw-tag entry point [`convert`] rejects
//! any tag that is not registered for the kind; the typed helpers
//! ([`convert_distance`] and friends) cannot fail.
//!
//! The tables are `static` and never mutated, so every function here is safe
//! to call from any number of threads.

use crate::error::{NauticalError, Result, UnitSide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The physical quantity a unit tag belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Time,
    Temperature,
    Speed,
    Distance,
    Pressure,
    Salinity,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Time => "Time",
            UnitKind::Temperature => "Temperature",
            UnitKind::Speed => "Speed",
            UnitKind::Distance => "Distance",
            UnitKind::Pressure => "Pressure",
            UnitKind::Salinity => "Salinity",
        };
        f.write_str(name)
    }
}

/// How a kind's factors relate a unit to the base unit.
#[derive(Clone, Copy, Debug)]
enum Scale {
    /// `factor` base units make one unit: `v * f[from] / f[to]`
    BasePerUnit,
    /// one base unit is `factor` units: `v / f[from] * f[to]`
    UnitsPerBase,
    /// Fahrenheit/Celsius formula, factors unused
    Affine,
}

#[derive(Debug)]
struct UnitEntry {
    tag: u8,
    name: &'static str,
    factor: f64,
}

/// One kind's table. Entries are ordered by tag, starting at 1.
struct Registry {
    scale: Scale,
    entries: &'static [UnitEntry],
}

impl Registry {
    fn lookup(&self, tag: u8) -> Option<&UnitEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    fn entry(&self, tag: u8) -> &UnitEntry {
        // Typed units map 1:1 onto entry positions.
        &self.entries[usize::from(tag) - 1]
    }

    fn apply(&self, value: f64, from: &UnitEntry, to: &UnitEntry) -> f64 {
        match self.scale {
            Scale::BasePerUnit => value * from.factor / to.factor,
            Scale::UnitsPerBase => value / from.factor * to.factor,
            Scale::Affine => convert_affine(value, from.tag, to.tag),
        }
    }
}

static TIME: Registry = Registry {
    scale: Scale::BasePerUnit,
    entries: &[
        UnitEntry { tag: 1, name: "SECONDS", factor: 1.0 },
        UnitEntry { tag: 2, name: "MINUTES", factor: 60.0 },
        UnitEntry { tag: 3, name: "HOURS", factor: 3600.0 },
        UnitEntry { tag: 4, name: "DAYS", factor: 86400.0 },
    ],
};

static TEMPERATURE: Registry = Registry {
    scale: Scale::Affine,
    entries: &[
        UnitEntry { tag: 1, name: "DEG_F", factor: 1.0 },
        UnitEntry { tag: 2, name: "DEG_C", factor: 1.0 },
    ],
};

static SPEED: Registry = Registry {
    scale: Scale::UnitsPerBase,
    entries: &[
        UnitEntry { tag: 1, name: "KNOTS", factor: 1.94384 },
        UnitEntry { tag: 2, name: "MPS", factor: 1.0 },
        UnitEntry { tag: 3, name: "MPH", factor: 2.23694 },
        UnitEntry { tag: 4, name: "KPH", factor: 3.6 },
        UnitEntry { tag: 5, name: "FPS", factor: 3.28084 },
    ],
};

static DISTANCE: Registry = Registry {
    scale: Scale::BasePerUnit,
    entries: &[
        UnitEntry { tag: 1, name: "CENTIMETERS", factor: 1.0 },
        UnitEntry { tag: 2, name: "FEET", factor: 30.48 },
        UnitEntry { tag: 3, name: "YARDS", factor: 91.44 },
        UnitEntry { tag: 4, name: "METERS", factor: 100.0 },
        UnitEntry { tag: 5, name: "KILOMETERS", factor: 100000.0 },
        UnitEntry { tag: 6, name: "MILES", factor: 160934.708789 },
        UnitEntry { tag: 7, name: "NAUTICAL_MILES", factor: 185198.903622 },
    ],
};

static PRESSURE: Registry = Registry {
    scale: Scale::UnitsPerBase,
    entries: &[
        UnitEntry { tag: 1, name: "PA", factor: 1.0 },
        UnitEntry { tag: 2, name: "TORR", factor: 0.0075 },
        UnitEntry { tag: 3, name: "BARR", factor: 0.00010 },
        UnitEntry { tag: 4, name: "ATM", factor: 0.00009869 },
        UnitEntry { tag: 5, name: "AT", factor: 0.0000102 },
        UnitEntry { tag: 6, name: "BA", factor: 10.0 },
        UnitEntry { tag: 7, name: "PSI", factor: 0.000145 },
        UnitEntry { tag: 8, name: "HG", factor: 0.0075 },
    ],
};

static SALINITY: Registry = Registry {
    scale: Scale::BasePerUnit,
    entries: &[UnitEntry { tag: 1, name: "PSU", factor: 1.0 }],
};

fn registry(kind: UnitKind) -> &'static Registry {
    match kind {
        UnitKind::Time => &TIME,
        UnitKind::Temperature => &TEMPERATURE,
        UnitKind::Speed => &SPEED,
        UnitKind::Distance => &DISTANCE,
        UnitKind::Pressure => &PRESSURE,
        UnitKind::Salinity => &SALINITY,
    }
}

const DEG_F: u8 = 1;

fn convert_affine(value: f64, from: u8, to: u8) -> f64 {
    if from == to {
        value
    } else if from == DEG_F {
        (value - 32.0) * 5.0 / 9.0
    } else {
        (9.0 / 5.0 * value) + 32.0
    }
}

/// Convert `value` between two raw unit tags of the same kind.
///
/// The `from` tag is checked before the `to` tag, so when both are unknown the
/// error names the `from` side.
///
/// # Example
/// ```
/// use nautical_lib::units::{convert, UnitKind};
///
/// // 100 seconds in minutes
/// let minutes = convert(UnitKind::Time, 100.0, 1, 2).unwrap();
/// assert!((minutes - 1.6666666666666667).abs() < 1e-12);
///
/// assert!(convert(UnitKind::Time, 100.0, 100, 2).is_err());
/// ```
pub fn convert(kind: UnitKind, value: f64, from: u8, to: u8) -> Result<f64> {
    let registry = registry(kind);
    let from_entry = registry.lookup(from).ok_or(NauticalError::UnknownUnit {
        kind,
        side: UnitSide::From,
        tag: from,
    })?;
    let to_entry = registry.lookup(to).ok_or(NauticalError::UnknownUnit {
        kind,
        side: UnitSide::To,
        tag: to,
    })?;
    Ok(registry.apply(value, from_entry, to_entry))
}

/// Registered name of a raw unit tag, e.g. `"NAUTICAL_MILES"`.
pub fn unit_name(kind: UnitKind, tag: u8) -> Result<&'static str> {
    registry(kind)
        .lookup(tag)
        .map(|entry| entry.name)
        .ok_or(NauticalError::UnknownUnit {
            kind,
            side: UnitSide::From,
            tag,
        })
}

/// A typed member of one unit kind.
pub trait Unit: Copy {
    const KIND: UnitKind;

    /// Registry tag of this unit.
    fn tag(self) -> u8;

    /// Typed unit for a registry tag, if the tag is registered.
    fn from_tag(tag: u8) -> Option<Self>;

    fn name(self) -> &'static str {
        registry(Self::KIND).entry(self.tag()).name
    }
}

/// Convert between two typed units of the same kind.
pub fn convert_unit<U: Unit>(value: f64, from: U, to: U) -> f64 {
    let registry = registry(U::KIND);
    registry.apply(value, registry.entry(from.tag()), registry.entry(to.tag()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    Seconds = 1,
    Minutes = 2,
    Hours = 3,
    Days = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemperatureUnit {
    DegF = 1,
    DegC = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeedUnit {
    /// Nautical miles per hour
    Knots = 1,
    Mps = 2,
    Mph = 3,
    Kph = 4,
    Fps = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistanceUnit {
    Centimeters = 1,
    Feet = 2,
    Yards = 3,
    Meters = 4,
    Kilometers = 5,
    Miles = 6,
    NauticalMiles = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PressureUnit {
    Pa = 1,
    Torr = 2,
    Barr = 3,
    Atm = 4,
    At = 5,
    /// Barye
    Ba = 6,
    Psi = 7,
    /// Millimeters of mercury
    Hg = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalinityUnit {
    /// Practical salinity units
    Psu = 1,
}

impl Unit for TimeUnit {
    const KIND: UnitKind = UnitKind::Time;

    fn tag(self) -> u8 {
        self as u8
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(TimeUnit::Seconds),
            2 => Some(TimeUnit::Minutes),
            3 => Some(TimeUnit::Hours),
            4 => Some(TimeUnit::Days),
            _ => None,
        }
    }
}

impl Unit for TemperatureUnit {
    const KIND: UnitKind = UnitKind::Temperature;

    fn tag(self) -> u8 {
        self as u8
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(TemperatureUnit::DegF),
            2 => Some(TemperatureUnit::DegC),
            _ => None,
        }
    }
}

impl Unit for SpeedUnit {
    const KIND: UnitKind = UnitKind::Speed;

    fn tag(self) -> u8 {
        self as u8
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(SpeedUnit::Knots),
            2 => Some(SpeedUnit::Mps),
            3 => Some(SpeedUnit::Mph),
            4 => Some(SpeedUnit::Kph),
            5 => Some(SpeedUnit::Fps),
            _ => None,
        }
    }
}

impl Unit for DistanceUnit {
    const KIND: UnitKind = UnitKind::Distance;

    fn tag(self) -> u8 {
        self as u8
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(DistanceUnit::Centimeters),
            2 => Some(DistanceUnit::Feet),
            3 => Some(DistanceUnit::Yards),
            4 => Some(DistanceUnit::Meters),
            5 => Some(DistanceUnit::Kilometers),
            6 => Some(DistanceUnit::Miles),
            7 => Some(DistanceUnit::NauticalMiles),
            _ => None,
        }
    }
}

impl Unit for PressureUnit {
    const KIND: UnitKind = UnitKind::Pressure;

    fn tag(self) -> u8 {
        self as u8
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PressureUnit::Pa),
            2 => Some(PressureUnit::Torr),
            3 => Some(PressureUnit::Barr),
            4 => Some(PressureUnit::Atm),
            5 => Some(PressureUnit::At),
            6 => Some(PressureUnit::Ba),
            7 => Some(PressureUnit::Psi),
            8 => Some(PressureUnit::Hg),
            _ => None,
        }
    }
}

impl Unit for SalinityUnit {
    const KIND: UnitKind = UnitKind::Salinity;

    fn tag(self) -> u8 {
        self as u8
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(SalinityUnit::Psu),
            _ => None,
        }
    }
}

pub fn convert_time(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    convert_unit(value, from, to)
}

pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    convert_unit(value, from, to)
}

pub fn convert_speed(value: f64, from: SpeedUnit, to: SpeedUnit) -> f64 {
    convert_unit(value, from, to)
}

/// Distance conversion. Geodesic distances are turned into meters through
/// this table as well.
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    convert_unit(value, from, to)
}

pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    convert_unit(value, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [UnitKind; 6] = [
        UnitKind::Time,
        UnitKind::Temperature,
        UnitKind::Speed,
        UnitKind::Distance,
        UnitKind::Pressure,
        UnitKind::Salinity,
    ];

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn entries_are_ordered_by_tag() {
        for kind in KINDS {
            for (index, entry) in registry(kind).entries.iter().enumerate() {
                assert_eq!(usize::from(entry.tag), index + 1, "{kind} table out of order");
            }
        }
    }

    #[test]
    fn time_conversions() {
        assert_close(convert(UnitKind::Time, 100.0, 1, 2).unwrap(), 1.6666666666666667, 1e-12);
        assert_close(convert(UnitKind::Time, 100.0, 1, 4).unwrap(), 0.0011574074074074073, 1e-15);
        assert_close(convert_time(100.0, TimeUnit::Hours, TimeUnit::Days), 4.166666666666667, 1e-12);
    }

    #[test]
    fn speed_conversions() {
        assert_close(convert_speed(11.2, SpeedUnit::Mps, SpeedUnit::Knots), 21.771008, 1e-9);
        assert_close(convert_speed(11.2, SpeedUnit::Mps, SpeedUnit::Kph), 40.32, 1e-9);
        assert_close(convert_speed(17.4, SpeedUnit::Knots, SpeedUnit::Mph), 20.023641863527864, 1e-9);
        assert_close(convert_speed(3.5, SpeedUnit::Kph, SpeedUnit::Fps), 3.1897055555555553, 1e-9);
    }

    #[test]
    fn distance_conversions() {
        assert_close(
            convert_distance(11.2, DistanceUnit::Centimeters, DistanceUnit::Feet),
            0.3674540682414698,
            1e-12,
        );
        assert_close(convert_distance(11.2, DistanceUnit::Feet, DistanceUnit::Meters), 3.41376, 1e-12);
        assert_close(
            convert_distance(17.4, DistanceUnit::Kilometers, DistanceUnit::Miles),
            10.811837999976111,
            1e-9,
        );
        assert_eq!(convert_distance(1.5, DistanceUnit::Kilometers, DistanceUnit::Meters), 1500.0);
    }

    #[test]
    fn pressure_conversions() {
        assert_close(convert_pressure(11.2, PressureUnit::Pa, PressureUnit::Torr), 0.084, 1e-12);
        assert_close(convert_pressure(11.2, PressureUnit::Pa, PressureUnit::Ba), 112.0, 1e-9);
        assert_close(convert_pressure(11.2, PressureUnit::Torr, PressureUnit::Hg), 11.2, 1e-9);
        assert_close(convert_pressure(11.2, PressureUnit::Barr, PressureUnit::Psi), 16.24, 1e-9);
    }

    #[test]
    fn temperature_conversions() {
        assert_close(convert(UnitKind::Temperature, 89.34, 1, 2).unwrap(), 31.8556, 1e-4);
        assert_close(convert(UnitKind::Temperature, 35.23, 2, 1).unwrap(), 95.414, 1e-9);
        assert_eq!(
            convert_temperature(12.5, TemperatureUnit::DegC, TemperatureUnit::DegC),
            12.5
        );
    }

    #[test]
    fn round_trip_every_registered_pair() {
        for kind in KINDS {
            let entries = registry(kind).entries;
            for from in entries {
                for to in entries {
                    let there = convert(kind, 42.75, from.tag, to.tag).unwrap();
                    let back = convert(kind, there, to.tag, from.tag).unwrap();
                    assert_close(back, 42.75, 1e-9);
                }
            }
        }
    }

    #[test]
    fn unknown_tags_name_the_failing_side() {
        let err = convert(UnitKind::Speed, 100.0, 100, 4).unwrap_err();
        assert_eq!(
            err,
            NauticalError::UnknownUnit {
                kind: UnitKind::Speed,
                side: UnitSide::From,
                tag: 100
            }
        );

        let err = convert(UnitKind::Distance, 100.0, 7, 100).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no matching Distance units (to) for value: 100"
        );

        // Temperature only has two members
        assert!(convert(UnitKind::Temperature, 10.0, 3, 1).is_err());
    }

    #[test]
    fn from_side_wins_when_both_tags_unknown() {
        let err = convert(UnitKind::Pressure, 1.0, 0, 99).unwrap_err();
        assert!(matches!(
            err,
            NauticalError::UnknownUnit {
                side: UnitSide::From,
                tag: 0,
                ..
            }
        ));
    }

    #[test]
    fn names_and_tags_agree() {
        assert_eq!(DistanceUnit::NauticalMiles.name(), "NAUTICAL_MILES");
        assert_eq!(unit_name(UnitKind::Temperature, 2).unwrap(), "DEG_C");
        assert_eq!(SpeedUnit::from_tag(3), Some(SpeedUnit::Mph));
        assert_eq!(PressureUnit::from_tag(9), None);
        assert!(unit_name(UnitKind::Salinity, 2).is_err());
    }

    #[test]
    fn serde_uses_registry_names() {
        let json = serde_json::to_string(&DistanceUnit::NauticalMiles).unwrap();
        assert_eq!(json, "\"NAUTICAL_MILES\"");
        let unit: TemperatureUnit = serde_json::from_str("\"DEG_F\"").unwrap();
        assert_eq!(unit, TemperatureUnit::DegF);
    }
}
