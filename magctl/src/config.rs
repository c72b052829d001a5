use std::fmt::{Debug, Formatter};
use std::time::Duration;

use serde::Deserialize;

use magcalc_common::Versioned;
use magcalc_geomag::{FieldConfig, Model, PolicyName, QueryPolicy, DEF_ENDPOINT, REDACTED};

use crate::QueryOpts;

/// Current version
pub const CVERSION: usize = 1;

/// Configuration for the CLI tool, mostly the credentials for the NOAA calculator.
///
/// Every field except `version` is optional.
///
#[derive(Deserialize)]
pub struct Config {
    /// Must be `CVERSION`
    pub version: usize,
    /// API key
    pub api_key: Option<String>,
    /// Calculator URL
    pub endpoint: Option<String>,
    /// Default model
    pub model: Option<Model>,
    /// Which optional fields to send
    pub policy: Option<PolicyName>,
    /// Request timeout in seconds, none by default
    pub timeout: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: CVERSION,
            api_key: None,
            endpoint: None,
            model: None,
            policy: None,
            timeout: None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("version", &self.version)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Versioned for Config {
    const VERSION: usize = CVERSION;

    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    /// Merge with command-line options, the latter win.
    ///
    pub fn field_config(&self, opts: &QueryOpts) -> FieldConfig {
        let policy = if opts.range {
            QueryPolicy::range()
        } else {
            self.policy.unwrap_or_default().into()
        };
        FieldConfig {
            endpoint: opts
                .endpoint
                .clone()
                .or_else(|| self.endpoint.clone())
                .unwrap_or_else(|| DEF_ENDPOINT.to_string()),
            api_key: opts.key.clone().or_else(|| self.api_key.clone()),
            model: opts.model.or(self.model).unwrap_or_default(),
            policy,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;
    use magcalc_common::ConfigFile;

    use crate::{Opts, SubCommand};

    fn query_opts(args: &[&str]) -> QueryOpts {
        let mut all = vec!["magctl", "query"];
        all.extend_from_slice(args);
        all.extend_from_slice(&["decimal", "-24.5", "-42.2"]);
        match Opts::try_parse_from(all).unwrap().subcmd {
            SubCommand::Query(q) => q,
            _ => panic!("not a query"),
        }
    }

    #[test]
    fn test_config_hcl() {
        let cfg = ConfigFile::<Config>::from_str(
            r##"
version = 1
api_key = "SECRET"
model = "WMM"
policy = "range"
timeout = 30
"##,
        )
        .unwrap();
        assert_eq!(Some("SECRET".to_string()), cfg.api_key);
        assert_eq!(Some(Model::Wmm), cfg.model);
        assert_eq!(Some(PolicyName::Range), cfg.policy);
    }

    #[test]
    fn test_config_debug_hides_key() {
        let cfg = Config {
            api_key: Some("SECRET".to_string()),
            ..Config::default()
        };
        let s = format!("{cfg:?}");
        assert!(!s.contains("SECRET"));
        assert!(s.contains(REDACTED));
    }

    #[test]
    fn test_field_config_defaults() {
        let cfg = Config::default();
        let fc = cfg.field_config(&query_opts(&["-k", "CLI"]));
        assert_eq!(DEF_ENDPOINT, fc.endpoint);
        assert_eq!(Some("CLI".to_string()), fc.api_key);
        assert_eq!(Model::Igrf, fc.model);
        assert_eq!(QueryPolicy::single_day(), fc.policy);
        assert!(fc.timeout.is_none());
    }

    #[test]
    fn test_field_config_cli_wins() {
        let cfg = Config {
            api_key: Some("FILE".to_string()),
            model: Some(Model::Igrf),
            timeout: Some(5),
            ..Config::default()
        };
        let fc = cfg.field_config(&query_opts(&["-k", "CLI", "-m", "wmm", "--range"]));
        assert_eq!(Some("CLI".to_string()), fc.api_key);
        assert_eq!(Model::Wmm, fc.model);
        assert_eq!(QueryPolicy::range(), fc.policy);
        assert_eq!(Some(Duration::from_secs(5)), fc.timeout);
    }
}
