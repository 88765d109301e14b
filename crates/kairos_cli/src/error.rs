//! Errors surfaced by the `kairos` binary.

use std::path::PathBuf;

use kairos_base::BaseError;
use kairos_core::EphemerisError;
use kairos_longevity::LongevityError;
use kairos_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid chart file {}: {source}", path.display())]
    Chart {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid date '{0}' (expected RFC 3339, e.g. 1990-05-17T08:30:00Z)")]
    Date(String),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Base(#[from] BaseError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Longevity(#[from] LongevityError),
    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),
}
