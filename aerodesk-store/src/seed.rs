use std::fs;
use std::path::PathBuf;

use aerodesk_catalog::{snapshot, SnapshotError};
use aerodesk_core::FlightRecord;
use tracing::{info, warn};

/// Flights shipped with the binary.
pub const BUNDLED_FLIGHTS: &str = include_str!("../data/default_flights.json");

/// Where the first-start dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    None,
    Bundled,
    File(PathBuf),
}

impl SeedSource {
    pub fn parse(setting: &str) -> Self {
        match setting.trim() {
            "" | "none" => SeedSource::None,
            "bundled" => SeedSource::Bundled,
            path => SeedSource::File(PathBuf::from(path)),
        }
    }
}

pub fn bundled_flights() -> Result<Vec<FlightRecord>, SnapshotError> {
    snapshot::decode(BUNDLED_FLIGHTS)
}

pub fn try_load_seed(source: &SeedSource) -> Result<Option<Vec<FlightRecord>>, SeedError> {
    match source {
        SeedSource::None => Ok(None),
        SeedSource::Bundled => Ok(Some(bundled_flights()?)),
        SeedSource::File(path) => {
            let text = fs::read_to_string(path).map_err(|source| SeedError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(Some(snapshot::decode(&text)?))
        }
    }
}

/// Like [`try_load_seed`], but an unusable seed is logged and treated as none.
pub fn load_seed(source: &SeedSource) -> Option<Vec<FlightRecord>> {
    match try_load_seed(source) {
        Ok(Some(flights)) => {
            info!(count = flights.len(), ?source, "Seed dataset loaded");
            Some(flights)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, ?source, "Ignoring unusable seed dataset");
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Cannot read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid seed dataset: {0}")]
    Invalid(#[from] SnapshotError),
}
