//! # Geographic Points
//!
//! Validated latitude/longitude/altitude coordinates and the great-circle
//! distance and range checks used to pick stations near a location.
//!
//! Station pages list coordinates longitude first (`-110.123, 76.45`), so
//! [`GeoPoint::parse`] reads the first field as longitude.

use crate::error::{NauticalError, Result};
use crate::units::{convert_distance, DistanceUnit};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Mean Earth radius used by the Haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const LATITUDE_LIMIT: f64 = 90.0;
const LONGITUDE_LIMIT: f64 = 180.0;

/// A coordinate on the Earth's surface.
///
/// Latitude is kept in [-90, 90] and longitude in [-180, 180]; the setters
/// refuse anything else and leave the point unchanged. Altitude is meters above
/// sea level, negative for depth.
///
/// # Example
/// ```
/// use nautical_lib::location::GeoPoint;
///
/// let point = GeoPoint::parse("-110.123, 76.45, 123.67").unwrap();
/// assert_eq!(point.longitude(), -110.123);
/// assert_eq!(point.latitude(), 76.45);
/// assert_eq!(point.altitude(), 123.67);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

/// Unvalidated serde shape of a [`GeoPoint`].
#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = NauticalError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude, raw.altitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self> {
        let mut point = GeoPoint {
            altitude,
            ..GeoPoint::default()
        };
        point.set_latitude(latitude)?;
        point.set_longitude(longitude)?;
        Ok(point)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Containment treats latitude as X.
    pub(crate) fn x(&self) -> f64 {
        self.latitude
    }

    /// Containment treats longitude as Y.
    pub(crate) fn y(&self) -> f64 {
        self.longitude
    }

    pub fn set_latitude(&mut self, latitude: f64) -> Result<()> {
        self.latitude = checked_degrees("latitude", latitude, LATITUDE_LIMIT)?;
        Ok(())
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<()> {
        self.longitude = checked_degrees("longitude", longitude, LONGITUDE_LIMIT)?;
        Ok(())
    }

    pub fn set_altitude(&mut self, altitude: f64) {
        self.altitude = altitude;
    }

    /// Parse `lon,lat` or `lon,lat,alt`. Whitespace anywhere is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let fields: Vec<&str> = compact.split(',').collect();

        let (longitude, latitude, altitude) = match fields.as_slice() {
            [lon, lat] => (parse_number(lon)?, parse_number(lat)?, 0.0),
            [lon, lat, alt] => (parse_number(lon)?, parse_number(lat)?, parse_number(alt)?),
            _ => return Err(NauticalError::Arity { count: fields.len() }),
        };

        let mut point = GeoPoint {
            altitude,
            ..GeoPoint::default()
        };
        point.set_longitude(longitude)?;
        point.set_latitude(latitude)?;

        debug!(input = text, %point, "parsed point");
        Ok(point)
    }

    /// Text in the `lon, lat, alt` order read by [`GeoPoint::parse`].
    pub fn to_lon_lat_string(&self) -> String {
        format!("{}, {}, {}", self.longitude, self.latitude, self.altitude)
    }

    /// Great-circle distance in meters.
    ///
    /// Haversine over a spherical Earth gives kilometers, which are converted
    /// through the distance unit table.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let km = haversine_km(self, other);
        convert_distance(km, DistanceUnit::Kilometers, DistanceUnit::Meters)
    }

    /// True when `other` is at most `max_meters` away.
    pub fn in_range(&self, other: &GeoPoint, max_meters: f64) -> bool {
        self.distance_meters(other) <= max_meters
    }
}

/// Range test for two raw latitude/longitude pairs.
pub fn in_range_ll(lat1: f64, lon1: f64, lat2: f64, lon2: f64, max_meters: f64) -> Result<bool> {
    let a = GeoPoint::new(lat1, lon1, 0.0)?;
    let b = GeoPoint::new(lat2, lon2, 0.0)?;
    Ok(a.in_range(&b, max_meters))
}

fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

fn checked_degrees(field: &'static str, value: f64, limit: f64) -> Result<f64> {
    // NaN fails `contains` too
    if !(-limit..=limit).contains(&value) {
        return Err(NauticalError::range(field, -limit, limit, value));
    }
    Ok(value)
}

fn parse_number(field: &str) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|_| NauticalError::number_format(field))
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}, {:.2}, {:.2}",
            self.latitude, self.longitude, self.altitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude, 0.0).unwrap()
    }

    #[test]
    fn parse_two_and_three_fields() {
        let p = GeoPoint::parse("-110.123, 76.45").unwrap();
        assert_eq!(p.longitude(), -110.123);
        assert_eq!(p.latitude(), 76.45);
        assert_eq!(p.altitude(), 0.0);

        let p = GeoPoint::parse(" -110.123,\t76.45 , 123.67\n").unwrap();
        assert_eq!(p.altitude(), 123.67);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            GeoPoint::parse("-110.123, 76.45,").unwrap_err(),
            NauticalError::NumberFormat {
                text: String::new()
            }
        );
        assert_eq!(
            GeoPoint::parse("-110.123, sdffgsdfg, 123.67").unwrap_err(),
            NauticalError::NumberFormat {
                text: "sdffgsdfg".to_string()
            }
        );
        assert_eq!(
            GeoPoint::parse("sdffgsdfg, 45.123 123.67").unwrap_err(),
            NauticalError::NumberFormat {
                text: "sdffgsdfg".to_string()
            }
        );
        assert_eq!(
            GeoPoint::parse("sdffgsdfg, 45.123, 123.67, 3423, 34123")
                .unwrap_err()
                .to_string(),
            "number of fields to parse should be 2 or 3: 5"
        );
        assert_eq!(
            GeoPoint::parse("100.213").unwrap_err(),
            NauticalError::Arity { count: 1 }
        );
    }

    #[test]
    fn parse_range_errors() {
        assert_eq!(
            GeoPoint::parse("181.213, 74.123").unwrap_err().to_string(),
            "longitude not in range (-180, 180): 181.21"
        );
        assert_eq!(
            GeoPoint::parse("100.213, -100.123").unwrap_err().to_string(),
            "latitude not in range (-90, 90): -100.12"
        );
        assert!(GeoPoint::parse("NaN, 10").is_err());
    }

    #[test]
    fn rejected_latitude_leaves_point_unchanged() {
        let mut p = point(45.0, -70.0);
        for bad in [90.0001, -90.5, 400.0, f64::NAN] {
            assert!(matches!(
                p.set_latitude(bad),
                Err(NauticalError::Range { field: "latitude", .. })
            ));
            assert_eq!(p, point(45.0, -70.0));
        }
        assert!(p.set_longitude(-180.01).is_err());
        assert_eq!(p.longitude(), -70.0);
    }

    #[test]
    fn lon_lat_text_round_trips() {
        for (lat, lon) in [(0.0, 0.0), (-90.0, 180.0), (36.123456, -75.987654), (89.99, -179.5)] {
            let p = point(lat, lon);
            assert_eq!(GeoPoint::parse(&p.to_lon_lat_string()).unwrap(), p);
        }
    }

    #[test]
    fn display_uses_two_decimals() {
        let p = GeoPoint::new(36.0, -75.456, -12.0).unwrap();
        assert_eq!(p.to_string(), "36.00, -75.46, -12.00");
    }

    #[test]
    fn distance_known_pair() {
        let a = point(36.0, -75.0);
        let b = point(37.0, -76.0);
        let meters = a.distance_meters(&b);
        assert!((meters - 142665.16).abs() < 0.01, "distance was {meters}");
        assert_eq!(a.distance_meters(&b), b.distance_meters(&a));
        assert_eq!(a.distance_meters(&a), 0.0);
    }

    #[test]
    fn range_is_inclusive() {
        let a = point(36.0, -75.0);
        let b = point(37.0, -76.0);
        assert!(a.in_range(&b, 150000.0));
        assert!(!a.in_range(&b, 100.0));
        assert!(a.in_range(&b, a.distance_meters(&b)));

        assert!(in_range_ll(36.0, -75.0, 37.0, -76.0, 150000.0).unwrap());
        assert!(in_range_ll(95.0, -75.0, 37.0, -76.0, 150000.0).is_err());
    }

    #[test]
    fn serde_validates_on_read() {
        let p = GeoPoint::new(12.5, -60.25, -3.0).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"latitude":12.5,"longitude":-60.25,"altitude":-3.0}"#);
        assert_eq!(serde_json::from_str::<GeoPoint>(&json).unwrap(), p);

        let bad = r#"{"latitude":120.0,"longitude":0.0}"#;
        assert!(serde_json::from_str::<GeoPoint>(bad).is_err());
    }
}
