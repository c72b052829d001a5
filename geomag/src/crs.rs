//! Coordinate reference systems known to the reprojector.
//!
//! Only the SIRGAS 2000 family is registered: the geographic system (EPSG:4674) and the UTM
//! South zones covering Brazil, 18S (EPSG:31978) to 25S (EPSG:31985).  Each entry carries the
//! proj string used to build the actual projection.
//!

use serde::Serialize;

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Datum {
    Sirgas2000,
}

/// Latitude/longitude system
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeographicCrs {
    pub code: u32,
    pub name: &'static str,
    pub datum: Datum,
    pub proj: &'static str,
}

/// UTM South zone
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectedCrs {
    pub code: u32,
    pub name: &'static str,
    pub datum: Datum,
    pub zone: u8,
    /// Central meridian, degrees
    pub lon0: f64,
    pub proj: String,
}

/// EPSG:4674
pub const SIRGAS_2000: GeographicCrs = GeographicCrs {
    code: 4674,
    name: "SIRGAS 2000",
    datum: Datum::Sirgas2000,
    proj: "+proj=longlat +ellps=GRS80 +no_defs",
};

/// EPSG code of SIRGAS 2000 / UTM zone 18S, the following zones are consecutive.
pub const SIRGAS_2000_UTM_18S: u32 = 31978;

/// First and last registered zones
pub const FIRST_ZONE: u8 = 18;
pub const LAST_ZONE: u8 = 25;

/// False northing of the South zones, the Equator
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.;

const ZONE_NAMES: [&str; 8] = [
    "SIRGAS 2000 / UTM zone 18S",
    "SIRGAS 2000 / UTM zone 19S",
    "SIRGAS 2000 / UTM zone 20S",
    "SIRGAS 2000 / UTM zone 21S",
    "SIRGAS 2000 / UTM zone 22S",
    "SIRGAS 2000 / UTM zone 23S",
    "SIRGAS 2000 / UTM zone 24S",
    "SIRGAS 2000 / UTM zone 25S",
];

/// Look up a projected CRS by its EPSG code.
///
pub fn projected(code: u32) -> Result<ProjectedCrs> {
    let last = SIRGAS_2000_UTM_18S + u32::from(LAST_ZONE - FIRST_ZONE);
    if !(SIRGAS_2000_UTM_18S..=last).contains(&code) {
        return Err(Error::UnknownCrs(code));
    }
    let idx = (code - SIRGAS_2000_UTM_18S) as usize;
    let zone = FIRST_ZONE + idx as u8;
    Ok(ProjectedCrs {
        code,
        name: ZONE_NAMES[idx],
        datum: Datum::Sirgas2000,
        zone,
        lon0: f64::from(zone) * 6. - 183.,
        proj: format!("+proj=utm +zone={zone} +south +ellps=GRS80 +units=m +no_defs"),
    })
}

/// Look up a geographic CRS by its EPSG code.
///
pub fn geographic(code: u32) -> Result<GeographicCrs> {
    match code {
        4674 => Ok(SIRGAS_2000),
        _ => Err(Error::UnknownCrs(code)),
    }
}
