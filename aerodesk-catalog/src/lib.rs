mod list;
pub mod catalog;
pub mod snapshot;

pub use catalog::{CatalogError, CatalogOptions, FlightCatalog, ReserveOutcome, STORAGE_KEY};
pub use list::Iter;
pub use snapshot::SnapshotError;
