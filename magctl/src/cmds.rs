//! Implementation of the `convert`, `query` and `list` sub-commands.
//!
//! Every function returns the text to display, `main()` does the printing.
//!

use chrono::NaiveDate;
use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace};

use magcalc_common::date_or_today;
use magcalc_geomag::{
    convert, format, zones, DecimalCoordinate, FieldClient, FieldSource, MagneticFieldResult,
    Model, Position,
};
use strum::VariantNames;

use crate::{Config, ConvertOpts, QueryOpts};

/// Handle `convert`
///
#[tracing::instrument]
pub fn convert_position(opts: &ConvertOpts) -> Result<String> {
    trace!("convert_position");

    let pos = Position::from(&opts.pos);
    let c = convert(&pos)?;
    Ok(render_decimal(&c))
}

/// Decimal value then the formatted one, for both axes
///
fn render_decimal(c: &DecimalCoordinate) -> String {
    let (lat, lon) = c.format();
    format!(
        "Latitude decimal: {:.6}°\nLongitude decimal: {:.6}°\nLatitude: {}\nLongitude: {}",
        c.latitude, c.longitude, lat, lon
    )
}

/// Handle `query`
///
#[tracing::instrument(skip(cfg, opts))]
pub fn query_field(cfg: &Config, opts: &QueryOpts) -> Result<String> {
    trace!("query_field");

    let date = date_or_today(opts.date.as_deref())?;
    let c = convert(&Position::from(&opts.pos))?;

    let fc = cfg.field_config(opts);
    let model = fc.model;
    info!("Querying {} for {} on {}", model, c, date);

    let client = FieldClient::new(fc)?;
    query_with(&client, &c, date, model, opts.raw)
}

/// Query through any `FieldSource`, the actual client or something else.
///
pub fn query_with(
    src: &dyn FieldSource,
    c: &DecimalCoordinate,
    date: NaiveDate,
    model: Model,
    raw: bool,
) -> Result<String> {
    let body = src.fetch(c.latitude, c.longitude, date)?;
    if raw {
        // Pretty-print if this is JSON at all
        //
        return Ok(match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(v) => serde_json::to_string_pretty(&v)?,
            Err(_) => body,
        });
    }
    let res = magcalc_geomag::parse(&body)?;
    Ok(render_result(c, &res, model, date))
}

/// Display what we sent and what we got.
///
pub fn render_result(
    sent: &DecimalCoordinate,
    res: &MagneticFieldResult,
    model: Model,
    date: NaiveDate,
) -> String {
    let (lat, lon) = sent.format();
    let (alat, alon) = format(res.latitude, res.longitude);
    [
        format!("Magnetic field ({model}) on {date}:"),
        format!("Latitude: {lat}"),
        format!("Longitude: {lon}"),
        format!("Latitude (API): {alat}"),
        format!("Longitude (API): {alon}"),
        format!("Declination: {:.2}°", res.declination),
        format!("Inclination: {:.2}°", res.inclination),
        format!("Total intensity: {:.2} nT", res.total_intensity),
    ]
    .join("\n")
}

/// List all supported UTM zones
///
#[tracing::instrument]
pub fn list_zones() -> Result<String> {
    trace!("enter");
    let header = vec!["Zone", "EPSG", "Name", "Central meridian"];

    let mut builder = Builder::default();
    builder.push_record(header);

    zones().iter().for_each(|z| {
        let row = vec![
            z.zone.to_string(),
            z.code.to_string(),
            z.name.to_string(),
            format!("{:.0}°", z.lon0),
        ];
        builder.push_record(row);
    });

    let allf = builder.build().with(Style::modern()).to_string();
    Ok(format!("List all UTM zones (SIRGAS 2000, South):\n{allf}"))
}

/// List all models
///
pub fn list_models() -> Result<String> {
    Ok(format!("Models: {}", Model::VARIANTS.join(", ")))
}
