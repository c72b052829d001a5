//! Error module
//!

use thiserror::Error;

/// Custom error type for conversions and queries, allow us to differentiate between errors.
///
/// None of them is fatal, each one only aborts the current conversion or query.
///
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid UTM zone {0}, must be between 18 and 25")]
    InvalidZone(u8),
    #[error("Invalid UTM {axis} {value}, must be in [0, {max}]")]
    InvalidUtm {
        axis: &'static str,
        value: f64,
        max: f64,
    },
    #[error("Invalid angle: {0}")]
    InvalidAngle(String),
    #[error("{axis} {value} out of range [-{max}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        max: f64,
    },
    #[error("Unknown CRS EPSG:{0}")]
    UnknownCrs(u32),
    #[error("Can not transform from EPSG:{from} to EPSG:{to}, datums differ")]
    UnsupportedTransform { from: u32, to: u32 },
    #[error("Projection error: {0}")]
    Projection(String),
    #[error("Network error: {message}")]
    Network {
        message: String,
        url: Option<String>,
        body: Option<String>,
    },
    #[error("Can not parse response: {0}")]
    Parse(String),
}

impl Error {
    /// Build a `Network` error from a transport failure
    ///
    pub(crate) fn transport(e: reqwest::Error) -> Self {
        Error::Network {
            url: e.url().map(crate::field::scrub_url),
            message: e.without_url().to_string(),
            body: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
