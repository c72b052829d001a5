//! Angles in degrees/minutes/seconds and decimal degrees.
//!
//! An `Angle` is always an unsigned magnitude, the sign is carried by the hemisphere (`N/S`) or
//! direction (`E/W`) and applied when converting into decimal degrees.
//!

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::trace;

use crate::parse::parse_dms;
use crate::{Error, Result};

/// Maximum absolute latitude
pub const MAX_LATITUDE: f64 = 90.;
/// Maximum absolute longitude
pub const MAX_LONGITUDE: f64 = 180.;

/// Convert a DMS magnitude into decimal degrees.
///
/// No rounding is done, the sign has to be applied by the caller.
///
#[inline]
pub fn to_decimal(degrees: u16, minutes: u8, seconds: f64) -> f64 {
    degrees as f64 + (minutes as f64 / 60.) + (seconds / 3600.)
}

/// Unsigned DMS magnitude.
///
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Angle {
    degrees: u16,
    minutes: u8,
    seconds: f64,
}

impl Angle {
    /// Create an angle, with `minutes` in `[0,59]` and `seconds` in `[0,60)`.
    ///
    pub fn new(degrees: u16, minutes: u8, seconds: f64) -> Result<Self> {
        if minutes > 59 {
            return Err(Error::InvalidAngle(format!("{minutes} minutes")));
        }
        if !(0. ..60.).contains(&seconds) {
            return Err(Error::InvalidAngle(format!("{seconds} seconds")));
        }
        Ok(Angle {
            degrees,
            minutes,
            seconds,
        })
    }

    pub fn degrees(&self) -> u16 {
        self.degrees
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Magnitude in decimal degrees
    ///
    pub fn to_decimal(&self) -> f64 {
        to_decimal(self.degrees, self.minutes, self.seconds)
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:07.4}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Latitude flag
///
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, strum::Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Hemisphere {
    #[default]
    #[strum(serialize = "N")]
    North,
    #[strum(serialize = "S")]
    South,
}

/// Longitude flag
///
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, strum::Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[default]
    #[strum(serialize = "E")]
    East,
    #[strum(serialize = "W")]
    West,
}

/// Latitude in DMS with its hemisphere
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatitudeDms {
    pub angle: Angle,
    pub hemisphere: Hemisphere,
}

impl LatitudeDms {
    pub fn new(angle: Angle, hemisphere: Hemisphere) -> Self {
        LatitudeDms { angle, hemisphere }
    }

    /// Signed decimal latitude, negative in the Southern hemisphere.
    ///
    pub fn to_decimal(&self) -> Result<f64> {
        let value = self.angle.to_decimal();
        if value > MAX_LATITUDE {
            return Err(Error::OutOfRange {
                axis: "latitude",
                value,
                max: MAX_LATITUDE,
            });
        }
        Ok(match self.hemisphere {
            Hemisphere::North => value,
            Hemisphere::South => -value,
        })
    }
}

impl FromStr for LatitudeDms {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (d, m, sec, flag) = parse_dms(s, "NSns")?;
        let hemisphere = Hemisphere::from_str(&flag.to_string())
            .map_err(|_| Error::InvalidAngle(format!("bad hemisphere {flag}")))?;
        Ok(LatitudeDms::new(Angle::new(d, m, sec)?, hemisphere))
    }
}

impl Display for LatitudeDms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.angle, self.hemisphere)
    }
}

/// Longitude in DMS with its direction
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LongitudeDms {
    pub angle: Angle,
    pub direction: Direction,
}

impl LongitudeDms {
    pub fn new(angle: Angle, direction: Direction) -> Self {
        LongitudeDms { angle, direction }
    }

    /// Signed decimal longitude, negative West of Greenwich.
    ///
    pub fn to_decimal(&self) -> Result<f64> {
        let value = self.angle.to_decimal();
        if value > MAX_LONGITUDE {
            return Err(Error::OutOfRange {
                axis: "longitude",
                value,
                max: MAX_LONGITUDE,
            });
        }
        Ok(match self.direction {
            Direction::East => value,
            Direction::West => -value,
        })
    }
}

impl FromStr for LongitudeDms {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (d, m, sec, flag) = parse_dms(s, "EWew")?;
        let direction = Direction::from_str(&flag.to_string())
            .map_err(|_| Error::InvalidAngle(format!("bad direction {flag}")))?;
        Ok(LongitudeDms::new(Angle::new(d, m, sec)?, direction))
    }
}

impl Display for LongitudeDms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.angle, self.direction)
    }
}

/// Signed decimal coordinates
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DecimalCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl DecimalCoordinate {
    /// Check ranges
    ///
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(Error::OutOfRange {
                axis: "latitude",
                value: latitude,
                max: MAX_LATITUDE,
            });
        }
        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(Error::OutOfRange {
                axis: "longitude",
                value: longitude,
                max: MAX_LONGITUDE,
            });
        }
        Ok(DecimalCoordinate {
            latitude,
            longitude,
        })
    }

    #[tracing::instrument]
    pub fn from_dms(lat: &LatitudeDms, lon: &LongitudeDms) -> Result<Self> {
        let (latitude, longitude) = (lat.to_decimal()?, lon.to_decimal()?);
        trace!("{lat} {lon} -> {latitude}, {longitude}");
        Ok(DecimalCoordinate {
            latitude,
            longitude,
        })
    }

    /// Both values with their hemisphere letters.
    ///
    pub fn format(&self) -> (String, String) {
        format(self.latitude, self.longitude)
    }
}

impl Display for DecimalCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (lat, lon) = self.format();
        write!(f, "{lat}, {lon}")
    }
}

/// Format a latitude as `24.559818° S`, zero is `N`.
///
pub fn format_latitude(lat: f64) -> String {
    let dir = if lat >= 0. {
        Hemisphere::North
    } else {
        Hemisphere::South
    };
    format!("{:.6}° {}", lat.abs(), dir)
}

/// Format a longitude as `42.234573° W`, zero is `E`.
///
pub fn format_longitude(lon: f64) -> String {
    let dir = if lon >= 0. {
        Direction::East
    } else {
        Direction::West
    };
    format!("{:.6}° {}", lon.abs(), dir)
}

/// Format both values with their hemisphere letters.
///
pub fn format(lat: f64, lon: f64) -> (String, String) {
    (format_latitude(lat), format_longitude(lon))
}
