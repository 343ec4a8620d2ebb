//! # Nautical Calculation Library
//!
//! This library provides the calculation engine behind a marine observation data
//! client. Station pages and buoy feeds deliver raw numbers and loosely formatted
//! strings; the modules here validate them and derive the values the client reports.
//!
//! ## Design Philosophy
//!
//! ### Pure Calculations
//! - **No I/O**: Fetching, scraping and caching live outside this crate. Apart from
//!   [`config`], nothing here touches the network or the file system
//! - **Value types**: [`location::GeoPoint`] and [`clock::ClockValue`] are small `Copy`
//!   values owned by the caller
//! - **Static tables**: Unit factors and sea state bounds are read-only `static`
//!   data, so every function is safe to call from many threads at once
//!
//! ### Errors
//! Every fallible operation returns [`NauticalError`]. Nothing is swallowed or
//! replaced with a zero default; callers decide how to surface failures.
//!
//! ### Data Flow
//! 1. **Ingest**: Scraped location strings → [`location::GeoPoint::parse`], scraped
//!    times → [`clock::ClockValue::parse_loose`]
//! 2. **Filter**: Validated points → [`area::contains`] and
//!    [`location::GeoPoint::in_range`]
//! 3. **Report**: Numeric readings → [`units::convert`] and [`sea_state::classify`]
//!
//! ## Modules
//! - [`units`]: Time, temperature, speed, distance, pressure and salinity tables
//! - [`clock`]: 12/24-hour clock values and station time parsing
//! - [`location`]: Validated coordinates, Haversine distance and range tests
//! - [`area`]: Even-odd point-in-area test with the two-point rectangle shorthand
//! - [`sea_state`]: Wave height to sea state 0-9
//! - [`timestamp`]: Stored UTC stamps and their age
//! - [`config`]: Reference station, watch area and reporting units

pub mod area;
pub mod clock;
pub mod config;
pub mod error;
pub mod location;
pub mod sea_state;
pub mod timestamp;
pub mod units;

pub use clock::{ClockValue, Meridiem, TimeFormat};
pub use error::{NauticalError, Result};
pub use location::GeoPoint;
pub use units::UnitKind;
