//! TOML configuration for the `kairos` binary.
//!
//! Every section is optional; missing sections and keys keep the library
//! defaults.
//!
//! ```toml
//! [dignity]
//! term_system = "ptolemaic"
//!
//! [syzygy]
//! tolerance_deg = 0.05
//!
//! [saturn_return]
//! max_age_years = 100
//!
//! [longevity.alcochoden]
//! combustion_orb_deg = 8.5
//! ```

use std::fs;
use std::path::Path;

use kairos_base::DignityConfig;
use kairos_longevity::LongevityConfig;
use kairos_search::{SaturnReturnConfig, SyzygyConfig};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub dignity: DignityConfig,
    pub syzygy: SyzygyConfig,
    pub saturn_return: SaturnReturnConfig,
    pub longevity: LongevityConfig,
}

impl CliConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
