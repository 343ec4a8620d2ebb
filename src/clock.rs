//! # Clock Model
//!
//! Time-of-day values as they appear on station observation pages. NOAA tables
//! print times like `10:30&nbsp;am`, `01:45pm` or `13:45:00`; [`ClockValue::parse_loose`]
//! reads all of these and [`ClockValue::render`] writes the canonical `HH:MM:00`.
//!
//! ## Hour storage
//! A clock keeps a single `hours` field for both display formats. In 24-hour
//! format it holds 0-23. In 12-hour format it holds the hour on the 12-hour dial
//! and the meridiem says which half of the day it is in; [`ClockValue::hours_24`]
//! adds 12 for PM. Switching formats rewrites `hours` in place:
//!
//! ```text
//! HOUR_24 --set_format(12)--> HOUR_12 (hours >= 12: hours -= 12, PM; else AM)
//! HOUR_12 --set_format(24)--> HOUR_24 (PM: hours += 12; meridiem cleared)
//! ```

use crate::error::{NauticalError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Separator between the time and the meridiem on NOAA pages.
const NBSP: char = '\u{a0}';
/// The same separator when the page text was not entity-decoded.
const NBSP_ENTITY: &str = "&nbsp;";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12")]
    Hour12,
    #[default]
    #[serde(rename = "24")]
    Hour24,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    #[default]
    None,
    Am,
    Pm,
}

impl Meridiem {
    /// Case-insensitive `am`/`pm` token.
    fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("am") {
            Some(Meridiem::Am)
        } else if token.eq_ignore_ascii_case("pm") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }
}

/// A time of day with an explicit 12/24-hour display format.
///
/// # Example
/// ```
/// use nautical_lib::clock::{ClockValue, Meridiem, TimeFormat};
///
/// let clock = ClockValue::parse_loose("01:45pm").unwrap();
/// assert_eq!(clock.hours(), 1);
/// assert_eq!(clock.format(), TimeFormat::Hour12);
/// assert_eq!(clock.meridiem(), Meridiem::Pm);
/// assert_eq!(clock.render().unwrap(), "13:45:00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClock")]
pub struct ClockValue {
    hours: u8,
    minutes: u8,
    format: TimeFormat,
    meridiem: Meridiem,
}

/// Unvalidated serde shape of a [`ClockValue`].
#[derive(Deserialize)]
struct RawClock {
    hours: u8,
    minutes: u8,
    format: TimeFormat,
    meridiem: Meridiem,
}

impl TryFrom<RawClock> for ClockValue {
    type Error = NauticalError;

    /// A stored clock must be one the setters could have produced: fields in
    /// range, and a meridiem exactly when the format is 12-hour.
    fn try_from(raw: RawClock) -> Result<Self> {
        let mut clock = ClockValue::new();
        clock.set_hours(i32::from(raw.hours))?;
        clock.set_minutes(i32::from(raw.minutes))?;

        match (raw.format, raw.meridiem) {
            (TimeFormat::Hour24, Meridiem::None) => {}
            (TimeFormat::Hour24, _) => {
                return Err(NauticalError::InvalidFormatState {
                    reason: "meridiem can only be set in 12 hour format",
                })
            }
            (TimeFormat::Hour12, Meridiem::None) => {
                return Err(NauticalError::InvalidFormatState {
                    reason: "12 hour format requires AM or PM",
                })
            }
            (TimeFormat::Hour12, meridiem) => {
                if clock.hours > 12 {
                    return Err(NauticalError::range("hours", 0.0, 12.0, f64::from(clock.hours)));
                }
                clock.format = TimeFormat::Hour12;
                clock.meridiem = meridiem;
            }
        }
        Ok(clock)
    }
}

impl ClockValue {
    /// Midnight in 24-hour format.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Set the stored hour. The bound is 0-23 in either format.
    pub fn set_hours(&mut self, hours: i32) -> Result<()> {
        self.hours = checked_field("hours", hours, 23)?;
        Ok(())
    }

    pub fn set_minutes(&mut self, minutes: i32) -> Result<()> {
        self.minutes = checked_field("minutes", minutes, 59)?;
        Ok(())
    }

    /// Switch display format, rewriting `hours` and the meridiem.
    ///
    /// Setting the current format again leaves the clock untouched, rather than
    /// re-running the conversion (which would turn 3 PM into 3 AM). On error the
    /// clock is unchanged.
    pub fn set_format(&mut self, format: TimeFormat) -> Result<()> {
        if format == self.format {
            return Ok(());
        }

        match format {
            TimeFormat::Hour12 => {
                if self.hours >= 12 {
                    self.set_hours(i32::from(self.hours) - 12)?;
                    self.meridiem = Meridiem::Pm;
                } else {
                    self.meridiem = Meridiem::Am;
                }
            }
            TimeFormat::Hour24 => {
                if self.meridiem == Meridiem::Pm {
                    self.set_hours(i32::from(self.hours) + 12)?;
                }
                self.meridiem = Meridiem::None;
            }
        }
        self.format = format;
        Ok(())
    }

    /// Set AM/PM. Only valid in 12-hour format.
    ///
    /// PM on an hour above 12 first folds the hour back onto the 12-hour dial.
    pub fn set_meridiem(&mut self, meridiem: Meridiem) -> Result<()> {
        if self.format != TimeFormat::Hour12 {
            return Err(NauticalError::InvalidFormatState {
                reason: "meridiem can only be set in 12 hour format",
            });
        }

        match meridiem {
            Meridiem::Am => {
                if self.hours > 12 {
                    return Err(NauticalError::range("hours", 0.0, 12.0, f64::from(self.hours)));
                }
                self.meridiem = Meridiem::Am;
            }
            Meridiem::Pm => {
                // TODO: decide whether an afternoon hour here should be rejected
                // like the AM branch instead of folded.
                if self.hours > 12 {
                    self.set_hours(i32::from(self.hours) - 12)?;
                }
                self.meridiem = Meridiem::Pm;
            }
            Meridiem::None => {
                return Err(NauticalError::InvalidFormatState {
                    reason: "12 hour format requires AM or PM",
                });
            }
        }
        Ok(())
    }

    /// Hour of the day on the 24-hour dial.
    pub fn hours_24(&self) -> Result<u8> {
        match (self.format, self.meridiem) {
            (TimeFormat::Hour24, _) => Ok(self.hours),
            (TimeFormat::Hour12, Meridiem::Pm) => self.hours.checked_add(12).ok_or_else(|| {
                NauticalError::range("hours", 0.0, 12.0, f64::from(self.hours))
            }),
            (TimeFormat::Hour12, Meridiem::Am) => Ok(self.hours),
            (TimeFormat::Hour12, Meridiem::None) => Err(NauticalError::InvalidFormatState {
                reason: "12 hour format requires AM or PM",
            }),
        }
    }

    /// Canonical `HH:MM:00` rendering. Seconds are always `00`.
    pub fn render(&self) -> Result<String> {
        Ok(format!("{:02}:{:02}:00", self.hours_24()?, self.minutes))
    }

    /// Parse a loosely formatted station time.
    ///
    /// Accepted shapes:
    /// - `H:MM[:SS]` followed by a non-breaking space and `am`/`pm`
    /// - `H:MM[:SS]am` with the meridiem glued to the last field
    /// - `H:MM[:SS]` without a meridiem, read as 24-hour time
    ///
    /// Only the hour and minute fields are used.
    pub fn parse_loose(text: &str) -> Result<Self> {
        let normalized = text.replace(NBSP_ENTITY, &NBSP.to_string());
        let parts: Vec<&str> = normalized.split(NBSP).collect();

        let (time_text, meridiem) = match parts.as_slice() {
            [time, token] => {
                let meridiem = Meridiem::from_token(token).ok_or_else(|| {
                    NauticalError::BadMeridiem {
                        token: token.to_string(),
                    }
                })?;
                (time.to_string(), meridiem)
            }
            [time] => strip_meridiem_suffix(time),
            _ => (normalized.clone(), Meridiem::None),
        };

        let fields: Vec<&str> = time_text.split(':').collect();
        if fields.len() < 2 {
            return Err(NauticalError::MalformedTime {
                text: text.to_string(),
            });
        }
        let hours = parse_int(fields[0])?;
        let minutes = parse_int(fields[1])?;

        let mut clock = ClockValue::new();
        clock.set_hours(hours)?;
        clock.set_minutes(minutes)?;
        if meridiem != Meridiem::None {
            if clock.hours > 12 {
                return Err(NauticalError::range("hours", 0.0, 12.0, f64::from(hours)));
            }
            clock.format = TimeFormat::Hour12;
            clock.meridiem = meridiem;
        }

        debug!(input = text, ?clock, "parsed clock value");
        Ok(clock)
    }
}

fn checked_field(field: &'static str, value: i32, max: i32) -> Result<u8> {
    if !(0..=max).contains(&value) {
        return Err(NauticalError::range(
            field,
            0.0,
            f64::from(max),
            f64::from(value),
        ));
    }
    // Bounded by `max` above.
    Ok(value as u8)
}

fn parse_int(field: &str) -> Result<i32> {
    field
        .trim()
        .parse()
        .map_err(|_| NauticalError::number_format(field))
}

/// Remove a trailing `am`/`pm` glued to the time, e.g. `01:45pm`.
///
/// Every occurrence of the token is removed, matching case-insensitively.
fn strip_meridiem_suffix(text: &str) -> (String, Meridiem) {
    let lower = text.to_ascii_lowercase();
    for token in ["pm", "am"] {
        if lower.ends_with(token) {
            let meridiem = Meridiem::from_token(token).unwrap_or_default();
            return (remove_ignore_case(text, token), meridiem);
        }
    }
    (text.to_string(), Meridiem::None)
}

fn remove_ignore_case(text: &str, token: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        if rest.len() >= token.len()
            && rest.is_char_boundary(token.len())
            && rest[..token.len()].eq_ignore_ascii_case(token)
        {
            rest = &rest[token.len()..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}
