//! Library part of `magcalc`.
//!
//! Two things are done here:
//!
//! - converting positions given as DMS (with hemisphere letters) or as UTM coordinates in one of
//!   the SIRGAS 2000 South zones into signed decimal degrees,
//! - asking the NOAA geomagnetic calculator for declination, inclination and total intensity at
//!   that position.
//!
//! The magnetic model itself is not implemented, it is computed by the remote service.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use magcalc_geomag::{convert, FieldClient, FieldConfig, FieldSource, Position};
//!
//! let pos: Position = Position::Dms {
//!     lat: "24°33'35.3454\"S".parse()?,
//!     lon: "42°14'4.462\"W".parse()?,
//! };
//! let c = convert(&pos)?;
//! let client = FieldClient::new(FieldConfig::default())?;
//! let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let res = client.query(c.latitude, c.longitude, day)?;
//! println!("{}", res.declination);
//! # Ok::<(), magcalc_geomag::Error>(())
//! ```
//!

pub use angle::*;
pub use error::*;
pub use field::*;
pub use utm::*;

mod angle;
pub mod crs;
mod error;
mod field;
mod parse;
mod utm;

use tracing::trace;

/// All the ways a position can be entered.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Degrees, minutes, seconds with hemisphere letters
    Dms {
        lat: LatitudeDms,
        lon: LongitudeDms,
    },
    /// SIRGAS 2000 / UTM zone S
    Utm(UtmCoordinate),
    /// Already in decimal degrees
    Decimal(DecimalCoordinate),
}

/// Turn any position into signed decimal degrees.
///
#[tracing::instrument]
pub fn convert(pos: &Position) -> Result<DecimalCoordinate> {
    trace!("convert");

    match pos {
        Position::Dms { lat, lon } => DecimalCoordinate::from_dms(lat, lon),
        Position::Utm(utm) => {
            let (lat, lon) = utm.to_lat_lon()?;
            DecimalCoordinate::new(lat, lon)
        }
        Position::Decimal(c) => DecimalCoordinate::new(c.latitude, c.longitude),
    }
}
