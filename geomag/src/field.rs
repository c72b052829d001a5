//! Client for the NOAA NCEI geomagnetic calculator.
//!
//! The service computes IGRF or WMM values for a point and a date, we only prepare the request
//! and parse the answer.  See <https://www.ngdc.noaa.gov/geomag/CalcSurvey.shtml>.
//!
//! Request parameters (HTTP GET):
//!
//! - `lat1`, `lon1`: decimal degrees
//! - `elevation`: always 0, `elevationUnits` with the `range` policy
//! - `coordinateSystem=D`
//! - `model`: `IGRF` or `WMM`
//! - `startYear`, `startMonth`, `startDay`, plus `endYear`, `endMonth`, `endDay` with the
//!   `range` policy
//! - `key`: API key
//! - `resultFormat=json`
//!
//! No retry, one call per query.
//!

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::{debug, trace, warn};

use crate::{Error, Result};

/// Default endpoint
pub const DEF_ENDPOINT: &str = "https://www.ngdc.noaa.gov/geomag-web/calculators/calculateIgrfwmm";

/// Shown instead of the API key in logs
pub const REDACTED: &str = "<redacted>";

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Magnetic model computed by the remote service.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Model {
    #[default]
    Igrf,
    Wmm,
}

/// Elevation unit, only sent with the `range` policy
///
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ElevationUnit {
    /// Kilometers
    #[default]
    #[serde(rename = "K")]
    Km,
    /// Meters
    #[serde(rename = "M")]
    Meter,
    /// Feet
    #[serde(rename = "F")]
    Feet,
}

/// Which optional fields go into the request.
///
/// Both variants ask for a single day, `range` sends the end of the interval explicitly.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueryPolicy {
    pub elevation_units: Option<ElevationUnit>,
    pub date_range: bool,
}

impl QueryPolicy {
    /// Start date only
    ///
    pub fn single_day() -> Self {
        QueryPolicy {
            elevation_units: None,
            date_range: false,
        }
    }

    /// Start and end date (same day) and elevation units
    ///
    pub fn range() -> Self {
        QueryPolicy {
            elevation_units: Some(ElevationUnit::Km),
            date_range: true,
        }
    }
}

/// Named policies as written in the configuration file
///
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, strum::Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PolicyName {
    #[default]
    SingleDay,
    Range,
}

impl From<PolicyName> for QueryPolicy {
    fn from(value: PolicyName) -> Self {
        match value {
            PolicyName::SingleDay => QueryPolicy::single_day(),
            PolicyName::Range => QueryPolicy::range(),
        }
    }
}

/// Everything the client needs, passed explicitly.
///
#[derive(Clone)]
pub struct FieldConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: Model,
    pub policy: QueryPolicy,
    /// `None` means wait forever
    pub timeout: Option<Duration>,
}

impl Debug for FieldConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("model", &self.model)
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            endpoint: DEF_ENDPOINT.to_string(),
            api_key: None,
            model: Model::default(),
            policy: QueryPolicy::default(),
            timeout: None,
        }
    }
}

/// Query parameters, serialized into the URL.
///
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Param<'a> {
    lat1: f64,
    lon1: f64,
    elevation: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation_units: Option<ElevationUnit>,
    coordinate_system: &'a str,
    model: Model,
    start_year: i32,
    start_month: u32,
    start_day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
    result_format: &'a str,
}

impl Debug for Param<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Param")
            .field("lat1", &self.lat1)
            .field("lon1", &self.lon1)
            .field("elevation", &self.elevation)
            .field("elevation_units", &self.elevation_units)
            .field("coordinate_system", &self.coordinate_system)
            .field("model", &self.model)
            .field("start", &(self.start_year, self.start_month, self.start_day))
            .field("end", &(self.end_year, self.end_month, self.end_day))
            .field("key", &self.key.map(|_| REDACTED))
            .field("result_format", &self.result_format)
            .finish()
    }
}

/// Replace the value of the `key` query parameter, for logs and errors.
///
pub(crate) fn scrub_url(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" {
                REDACTED.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    let mut url = url.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

/// What we get back for one point.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MagneticFieldResult {
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees
    pub declination: f64,
    /// Degrees
    pub inclination: f64,
    /// nT
    #[serde(rename = "totalintensity")]
    pub total_intensity: f64,
}

/// Response envelope, other fields are ignored.
///
#[derive(Debug, Deserialize)]
struct Answer {
    result: Vec<MagneticFieldResult>,
}

/// Anything able to answer a field query.
///
pub trait FieldSource: Debug {
    /// Get the raw body for one point and one day.
    fn fetch(&self, lat: f64, lon: f64, date: NaiveDate) -> Result<String>;

    /// Get and parse.
    fn query(&self, lat: f64, lon: f64, date: NaiveDate) -> Result<MagneticFieldResult> {
        let body = self.fetch(lat, lon, date)?;
        parse(&body)
    }
}

/// Parse the JSON answer, the first point is the one we asked for.
///
#[tracing::instrument(skip(body))]
pub fn parse(body: &str) -> Result<MagneticFieldResult> {
    let answer: Answer = serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;
    match answer.result.first() {
        Some(res) => {
            trace!("{} point(s), using first", answer.result.len());
            Ok(*res)
        }
        None => Err(Error::Parse("empty result".to_string())),
    }
}

/// HTTP client for the NOAA calculator.
///
#[derive(Clone, Debug)]
pub struct FieldClient {
    config: FieldConfig,
    client: Client,
}

impl FieldClient {
    #[tracing::instrument(skip(config))]
    pub fn new(config: FieldConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", NAME, VERSION))
            .timeout(config.timeout)
            .build()
            .map_err(Error::transport)?;
        if config.api_key.is_none() {
            warn!("no API key configured, the service will probably refuse the request");
        }
        Ok(FieldClient { config, client })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn params(&self, lat: f64, lon: f64, date: NaiveDate) -> Param<'_> {
        let policy = self.config.policy;
        let (end_year, end_month, end_day) = if policy.date_range {
            (Some(date.year()), Some(date.month()), Some(date.day()))
        } else {
            (None, None, None)
        };
        Param {
            lat1: lat,
            lon1: lon,
            elevation: 0,
            elevation_units: policy.elevation_units,
            coordinate_system: "D",
            model: self.config.model,
            start_year: date.year(),
            start_month: date.month(),
            start_day: date.day(),
            end_year,
            end_month,
            end_day,
            key: self.config.api_key.as_deref(),
            result_format: "json",
        }
    }
}

impl FieldSource for FieldClient {
    #[tracing::instrument(skip(self))]
    fn fetch(&self, lat: f64, lon: f64, date: NaiveDate) -> Result<String> {
        let param = self.params(lat, lon, date);
        trace!("param={param:?}");

        let resp = self
            .client
            .get(&self.config.endpoint)
            .query(&param)
            .send()
            .map_err(Error::transport)?;

        let url = scrub_url(resp.url());
        let status = resp.status();
        debug!("URL: {url}");
        debug!("Status: {status}");

        if !status.is_success() {
            let body = resp.text().ok();
            return Err(Error::Network {
                message: format!("HTTP status {status}"),
                url: Some(url),
                body,
            });
        }

        resp.text().map_err(Error::transport)
    }
}
