//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration file of `magcalc`.
//! This is a configuration file/struct neutral loading engine, storing only the base directory
//! and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::makepath;

/// Config filename
pub const CONFIG: &str = "config.hcl";

/// Main name for the directory base
pub const TAG: &str = "magcalc";

/// Every configuration struct carries a version number checked on load.
///
pub trait Versioned {
    /// Version expected by this build
    const VERSION: usize;

    /// Version found in the file
    fn version(&self) -> usize;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Bad file version {found}, expected {expected}")]
    BadFileVersion { found: usize, expected: usize },
    #[error("Unknown config file {0:?}")]
    MissingConfig(PathBuf),
    #[error("Can not read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing {path:?}: {source}")]
    BadSyntax { path: PathBuf, source: hcl::Error },
    #[error("No home directory, can not find default configuration")]
    NoHome,
}

/// Configuration for the CLI tool, supposed to include parameters and most importantly
/// credentials for the remote service.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Default + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Where did we load from, if anywhere
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Default + Versioned,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Result<Self, ConfigError> {
        let base = BaseDirs::new().ok_or(ConfigError::NoHome)?;

        #[cfg(unix)]
        let basedir = makepath!(base.home_dir(), ".config", tag);

        #[cfg(windows)]
        let basedir = makepath!(base.data_local_dir(), tag);

        debug!("base = {basedir:?}");
        Ok(ConfigFile {
            tag: String::from(tag),
            basedir,
            source: None,
            inner: T::default(),
        })
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        let cfg = self.config_path().join(CONFIG);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Project tag
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// File actually loaded, `None` means we run on defaults.
    ///
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - default basedir (base on $HOME or $LOCALAPPDATA), defaults if not there
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>, ConfigError> {
        let mut cfg = ConfigFile::<T>::new(TAG)?;

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(ConfigError::MissingConfig(fname.to_path_buf()));
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    trace!("no default config file, using defaults");
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?} from {:?}", cfg.config_path());
        cfg.inner = Self::read(&fname)?;
        cfg.source = Some(fname);
        Ok(cfg)
    }

    /// Read and check one file
    ///
    #[tracing::instrument]
    pub fn read(fname: &Path) -> Result<T, ConfigError> {
        let data = fs::read_to_string(fname).map_err(|source| ConfigError::Unreadable {
            path: fname.to_path_buf(),
            source,
        })?;
        Self::from_str(&data).map_err(|e| match e {
            ConfigError::BadSyntax { source, .. } => ConfigError::BadSyntax {
                path: fname.to_path_buf(),
                source,
            },
            e => e,
        })
    }

    /// Parse and check configuration text
    ///
    pub fn from_str(data: &str) -> Result<T, ConfigError> {
        let data: T = hcl::from_str(data).map_err(|source| ConfigError::BadSyntax {
            path: PathBuf::new(),
            source,
        })?;
        debug!("struct data = {data:?}");

        if data.version() != T::VERSION {
            return Err(ConfigError::BadFileVersion {
                found: data.version(),
                expected: T::VERSION,
            });
        }
        Ok(data)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
