//! Module describing all possible commands and sub-commands to the `magctl` main driver
//!
//! We have four main commands:
//!
//! - `convert`
//! - `query`
//! - `list`
//! - `completion`
//!
//! `convert` takes a position (DMS, UTM or decimal) and displays it in decimal degrees.
//!
//! `query` does the same conversion then asks the NOAA calculator for the magnetic field at
//! that position for a given day (today by default).
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand};
use clap_complete::shells::Shell;

use magcalc_geomag::{DecimalCoordinate, LatitudeDms, LongitudeDms, Model, Position, UtmCoordinate};

/// CLI options
#[derive(Parser)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode, hierarchical traces.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Also log into hourly files in this directory.
    #[clap(short = 'L', long)]
    pub log_dir: Option<PathBuf>,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `convert (dms|utm|decimal) ARGS`
/// `query [-d DATE] [-m MODEL] [--range] [--raw] (dms|utm|decimal) ARGS`
/// `list (zones|models)`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Convert a position into decimal degrees
    Convert(ConvertOpts),
    /// List zones or models
    List(ListOpts),
    /// Get declination, inclination and intensity at a position
    Query(QueryOpts),
}

// ------

/// How the position is given.
///
#[derive(Clone, Debug, Subcommand)]
pub enum PosCommand {
    /// DMS with hemisphere letters, e.g. `24°33'35.3454"S 42°14'4.462"W`
    Dms {
        /// Latitude
        lat: LatitudeDms,
        /// Longitude
        lon: LongitudeDms,
    },
    /// SIRGAS 2000 UTM South zone (18 to 25)
    Utm {
        /// Northing (m)
        northing: f64,
        /// Easting (m)
        easting: f64,
        /// Zone number
        zone: u8,
    },
    /// Signed decimal degrees
    #[command(allow_negative_numbers = true)]
    Decimal {
        /// Latitude, negative South
        lat: f64,
        /// Longitude, negative West
        lon: f64,
    },
}

impl From<&PosCommand> for Position {
    fn from(value: &PosCommand) -> Self {
        match value {
            PosCommand::Dms { lat, lon } => Position::Dms {
                lat: *lat,
                lon: *lon,
            },
            PosCommand::Utm {
                northing,
                easting,
                zone,
            } => Position::Utm(UtmCoordinate {
                northing: *northing,
                easting: *easting,
                zone: *zone,
            }),
            PosCommand::Decimal { lat, lon } => Position::Decimal(DecimalCoordinate {
                latitude: *lat,
                longitude: *lon,
            }),
        }
    }
}

// ------

/// Options for `convert`
///
#[derive(Debug, Parser)]
pub struct ConvertOpts {
    /// Position
    #[clap(subcommand)]
    pub pos: PosCommand,
}

// ------

/// Options for `query`
///
#[derive(Debug, Parser)]
pub struct QueryOpts {
    /// Day to compute the field for, default is today.
    #[clap(short = 'd', long)]
    pub date: Option<String>,
    /// Model (IGRF or WMM), overrides the configuration.
    #[clap(short = 'm', long)]
    pub model: Option<Model>,
    /// Send an explicit one-day range instead of a single date.
    #[clap(long)]
    pub range: bool,
    /// Display the raw JSON answer.
    #[clap(long)]
    pub raw: bool,
    /// API key, overrides the configuration.
    #[clap(short = 'k', long, env = "MAGCALC_API_KEY", hide_env_values = true)]
    pub key: Option<String>,
    /// Calculator URL, overrides the configuration.
    #[clap(short = 'e', long, env = "MAGCALC_ENDPOINT")]
    pub endpoint: Option<String>,
    /// Position
    #[clap(subcommand)]
    pub pos: PosCommand,
}

// ------

/// Options for `list`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(subcommand)]
    pub cmd: ListSubCommand,
}

#[derive(Debug, Parser)]
pub enum ListSubCommand {
    /// Supported UTM zones
    Zones,
    /// Supported magnetic models
    Models,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_dms() {
        let opts = Opts::try_parse_from([
            "magctl",
            "convert",
            "dms",
            "24 33 35.3454 S",
            "42°14'4.462\"W",
        ])
        .unwrap();
        match opts.subcmd {
            SubCommand::Convert(c) => assert!(matches!(c.pos, PosCommand::Dms { .. })),
            _ => panic!("bad subcommand"),
        }
    }

    #[test]
    fn test_parse_decimal_negative() {
        let opts =
            Opts::try_parse_from(["magctl", "convert", "decimal", "-24.5", "-42.2"]).unwrap();
        match opts.subcmd {
            SubCommand::Convert(ConvertOpts {
                pos: PosCommand::Decimal { lat, lon },
            }) => {
                assert_eq!(-24.5, lat);
                assert_eq!(-42.2, lon);
            }
            _ => panic!("bad subcommand"),
        }
    }

    #[test]
    fn test_parse_query_model() {
        let opts = Opts::try_parse_from([
            "magctl", "query", "-m", "WMM", "--range", "utm", "7460122", "234567", "23",
        ])
        .unwrap();
        match opts.subcmd {
            SubCommand::Query(q) => {
                assert_eq!(Some(Model::Wmm), q.model);
                assert!(q.range);
            }
            _ => panic!("bad subcommand"),
        }
    }

    #[test]
    fn test_parse_bad_dms() {
        let r = Opts::try_parse_from(["magctl", "convert", "dms", "24 33 35", "42 14 4 W"]);
        assert!(r.is_err());
    }
}
