pub mod flight;
pub mod repository;
pub mod schedule;

pub use flight::{FlightDraft, FlightRecord, ValidationError};
pub use repository::{KeyValueStore, StorageError};
