//! Library part of the `magctl` utility.
//!
//! The command-line definitions live in `cli`, the configuration file (mostly the API key for the
//! NOAA calculator) in `config` and the actual sub-commands in `cmds`.  Conversion and querying
//! themselves are done by `magcalc-geomag`.
//!

/// Re-export
///
pub use cli::*;
pub use cmds::*;
pub use config::*;

mod cli;
mod cmds;
mod config;
