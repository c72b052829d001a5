//! UTM to geographic reprojection.
//!
//! The zone gives the EPSG code of the projected system, which is looked up in the registry and
//! turned into a `Transform` towards SIRGAS 2000 geographic coordinates.  The projection itself
//! is done by `proj4rs`.
//!

use std::fmt::{Debug, Formatter};

use proj4rs::Proj;
use serde::Serialize;
use tracing::{debug, trace};

use crate::crs::{
    self, GeographicCrs, ProjectedCrs, FALSE_NORTHING_SOUTH, FIRST_ZONE, LAST_ZONE, SIRGAS_2000,
    SIRGAS_2000_UTM_18S,
};
use crate::{Error, Result};

/// Largest easting accepted, twice the false easting.
pub const MAX_EASTING: f64 = 1_000_000.;

/// UTM coordinates in one of the Brazilian South zones.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UtmCoordinate {
    pub northing: f64,
    pub easting: f64,
    pub zone: u8,
}

impl UtmCoordinate {
    /// Create a coordinate, northing and easting must be non-negative and finite.  The zone is
    /// checked on conversion.
    ///
    pub fn new(northing: f64, easting: f64, zone: u8) -> Result<Self> {
        check_utm(northing, easting)?;
        Ok(UtmCoordinate {
            northing,
            easting,
            zone,
        })
    }

    /// Convert into `(lat, lon)`.
    ///
    pub fn to_lat_lon(&self) -> Result<(f64, f64)> {
        to_lat_lon(self.northing, self.easting, self.zone)
    }
}

/// Northing in `[0, 10_000_000]` stays in the Southern hemisphere.
///
fn check_utm(northing: f64, easting: f64) -> Result<()> {
    if !(0. ..=FALSE_NORTHING_SOUTH).contains(&northing) {
        return Err(Error::InvalidUtm {
            axis: "northing",
            value: northing,
            max: FALSE_NORTHING_SOUTH,
        });
    }
    if !(0. ..=MAX_EASTING).contains(&easting) {
        return Err(Error::InvalidUtm {
            axis: "easting",
            value: easting,
            max: MAX_EASTING,
        });
    }
    Ok(())
}

/// Map a zone into its SIRGAS 2000 / UTM zone S EPSG code.
///
pub fn zone_to_projection_code(zone: u8) -> Result<u32> {
    if !(FIRST_ZONE..=LAST_ZONE).contains(&zone) {
        return Err(Error::InvalidZone(zone));
    }
    Ok(SIRGAS_2000_UTM_18S + u32::from(zone - FIRST_ZONE))
}

/// Convert UTM coordinates into SIRGAS 2000 `(lat, lon)` in decimal degrees.
///
#[tracing::instrument]
pub fn to_lat_lon(northing: f64, easting: f64, zone: u8) -> Result<(f64, f64)> {
    let code = zone_to_projection_code(zone)?;
    check_utm(northing, easting)?;

    let from = crs::projected(code)?;
    let tr = Transform::new(&from, &SIRGAS_2000)?;

    // x first, like always_xy
    //
    let (lon, lat) = tr.apply(easting, northing)?;
    debug!("EPSG:{code} ({easting}, {northing}) -> EPSG:{} ({lon}, {lat})", tr.to);
    Ok((lat, lon))
}

/// Transform from a projected CRS into a geographic one on the same datum.
///
pub struct Transform {
    pub from: u32,
    pub to: u32,
    src: Proj,
    dst: Proj,
}

impl Debug for Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl Transform {
    #[tracing::instrument]
    pub fn new(from: &ProjectedCrs, to: &GeographicCrs) -> Result<Self> {
        if from.datum != to.datum {
            return Err(Error::UnsupportedTransform {
                from: from.code,
                to: to.code,
            });
        }
        trace!("{} -> {}", from.proj, to.proj);

        let src = Proj::from_proj_string(&from.proj)
            .map_err(|e| Error::Projection(format!("EPSG:{}: {e:?}", from.code)))?;
        let dst = Proj::from_proj_string(to.proj)
            .map_err(|e| Error::Projection(format!("EPSG:{}: {e:?}", to.code)))?;
        Ok(Transform {
            from: from.code,
            to: to.code,
            src,
            dst,
        })
    }

    /// Apply the transform to `(x, y)` = `(easting, northing)`, returns `(lon, lat)` in degrees.
    ///
    pub fn apply(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let mut point = (x, y, 0.0);
        proj4rs::transform::transform(&self.src, &self.dst, &mut point)
            .map_err(|e| Error::Projection(format!("({x}, {y}): {e:?}")))?;

        // Geographic output is in radians
        //
        Ok((point.0.to_degrees(), point.1.to_degrees()))
    }
}

/// One line of the zone table
///
#[derive(Clone, Debug, Serialize)]
pub struct ZoneInfo {
    pub zone: u8,
    pub code: u32,
    pub name: &'static str,
    pub lon0: f64,
}

/// All supported zones.
///
pub fn zones() -> Vec<ZoneInfo> {
    (FIRST_ZONE..=LAST_ZONE)
        .filter_map(|zone| {
            let code = zone_to_projection_code(zone).ok()?;
            let crs = crs::projected(code).ok()?;
            Some(ZoneInfo {
                zone,
                code,
                name: crs.name,
                lon0: crs.lon0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-8;

    #[test]
    fn test_zone_to_projection_code_bounds() {
        assert_eq!(31978, zone_to_projection_code(18).unwrap());
        assert_eq!(31978 + 7, zone_to_projection_code(25).unwrap());
    }

    #[rstest]
    #[case(0)]
    #[case(17)]
    #[case(26)]
    #[case(60)]
    fn test_zone_to_projection_code_invalid(#[case] zone: u8) {
        assert!(matches!(
            zone_to_projection_code(zone),
            Err(Error::InvalidZone(z)) if z == zone
        ));
    }

    #[test]
    fn test_to_lat_lon_zone_23() {
        let (lat, lon) = to_lat_lon(7460122.0, 234567.0, 23).unwrap();
        assert!(lat < 0.);
        assert!((-48. ..-42.).contains(&lon));
        assert!((lat - -22.9459768438).abs() < EPS, "lat={lat}");
        assert!((lon - -47.5884106780).abs() < EPS, "lon={lon}");
    }

    #[rstest]
    #[case(7395000.0, 500000.0, 23, -23.5553588879, -45.0)]
    #[case(10000000.0, 500000.0, 18, 0.0, -75.0)]
    #[case(8900000.0, 700000.0, 25, -9.9460709598, -31.1756996163)]
    #[case(7000000.0, 300000.0, 22, -27.1079795244, -53.0175056552)]
    fn test_to_lat_lon(
        #[case] northing: f64,
        #[case] easting: f64,
        #[case] zone: u8,
        #[case] lat: f64,
        #[case] lon: f64,
    ) {
        let (rlat, rlon) = UtmCoordinate::new(northing, easting, zone)
            .unwrap()
            .to_lat_lon()
            .unwrap();
        assert!((rlat - lat).abs() < EPS, "lat={rlat}");
        assert!((rlon - lon).abs() < EPS, "lon={rlon}");
    }

    #[test]
    fn test_to_lat_lon_invalid_zone() {
        let r = to_lat_lon(7460122.0, 234567.0, 17);
        assert!(matches!(r, Err(Error::InvalidZone(17))));
    }

    #[rstest]
    #[case(12_000_000., 500_000., "northing")]
    #[case(-5., 500_000., "northing")]
    #[case(7_000_000., -1000., "easting")]
    #[case(7_000_000., 1_000_001., "easting")]
    #[case(f64::NAN, 500_000., "northing")]
    #[case(7_000_000., f64::INFINITY, "easting")]
    fn test_utm_out_of_range(#[case] northing: f64, #[case] easting: f64, #[case] what: &str) {
        assert!(matches!(
            UtmCoordinate::new(northing, easting, 23),
            Err(Error::InvalidUtm { axis, .. }) if axis == what
        ));
        assert!(matches!(
            to_lat_lon(northing, easting, 23),
            Err(Error::InvalidUtm { axis, .. }) if axis == what
        ));
    }

    #[test]
    fn test_utm_bounds_included() {
        assert!(UtmCoordinate::new(0., 0., 23).is_ok());
        assert!(UtmCoordinate::new(FALSE_NORTHING_SOUTH, MAX_EASTING, 23).is_ok());
    }

    #[test]
    fn test_transform_apply_is_xy() {
        let from = crs::projected(31983).unwrap();
        let tr = Transform::new(&from, &SIRGAS_2000).unwrap();
        let (lon, lat) = tr.apply(234567.0, 7460122.0).unwrap();
        assert!((lon - -47.5884106780).abs() < EPS);
        assert!((lat - -22.9459768438).abs() < EPS);
        assert_eq!(31983, tr.from);
        assert_eq!(4674, tr.to);
    }

    #[test]
    fn test_zones() {
        let z = zones();
        assert_eq!(8, z.len());
        assert_eq!(18, z[0].zone);
        assert_eq!(-75., z[0].lon0);
        assert_eq!(31985, z[7].code);
        assert_eq!(-33., z[7].lon0);
    }
}
