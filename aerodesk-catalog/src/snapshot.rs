//! JSON snapshot codec shared by persistence, export/import and seed loading.

use std::collections::HashSet;

use aerodesk_core::{FlightRecord, ValidationError};
use serde_json::Value;

/// Serialize flights as a pretty-printed (2-space) JSON array, order preserved.
pub fn encode(flights: &[FlightRecord]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(flights)?)
}

/// Compact form used for the persisted value.
pub fn encode_compact(flights: &[FlightRecord]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(flights)?)
}

/// Parse a snapshot, rejecting anything that could not have come out of a valid catalog.
pub fn decode(text: &str) -> Result<Vec<FlightRecord>, SnapshotError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(SnapshotError::NotAnArray);
    };

    let mut flights = Vec::with_capacity(items.len());
    let mut ids = HashSet::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let flight: FlightRecord = serde_json::from_value(item)
            .map_err(|source| SnapshotError::InvalidRecord { index, source })?;
        flight
            .check_seats()
            .map_err(|source| SnapshotError::InvalidSeats { index, source })?;
        if !ids.insert(flight.id.clone()) {
            return Err(SnapshotError::DuplicateId(flight.id));
        }
        flights.push(flight);
    }
    Ok(flights)
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Snapshot root is not an array")]
    NotAnArray,

    #[error("Record {index} does not match the flight schema: {source}")]
    InvalidRecord {
        index: usize,
        source: serde_json::Error,
    },

    #[error("Record {index} breaks the seat invariant: {source}")]
    InvalidSeats {
        index: usize,
        source: ValidationError,
    },

    #[error("Duplicate flight id: {0}")]
    DuplicateId(String),
}
