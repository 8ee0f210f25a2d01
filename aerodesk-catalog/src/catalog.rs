use aerodesk_core::{FlightRecord, KeyValueStore, StorageError};
use tracing::{debug, info, warn};

use crate::list::{FlightList, Iter};
use crate::snapshot::{self, SnapshotError};

/// Storage key the catalog snapshot lives under unless configured otherwise.
pub const STORAGE_KEY: &str = "airport_system_flights_v1";

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub storage_key: String,
    /// Flights to start with when nothing usable is persisted.
    pub seed: Option<Vec<FlightRecord>>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            seed: None,
        }
    }
}

/// Result of a reservation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved { remaining: u32 },
    SoldOut,
    NotFound,
}

impl ReserveOutcome {
    pub fn is_reserved(&self) -> bool {
        matches!(self, ReserveOutcome::Reserved { .. })
    }
}

/// In-memory flight catalog backed by a key-value store.
///
/// Flights iterate newest first. Every query hands out clones, so the only
/// way to change a stored flight is through [`FlightCatalog::reserve_ticket`].
/// Storage failures never surface from the mutating operations: they are
/// logged and the catalog keeps working in memory (see [`FlightCatalog::is_persistent`]).
pub struct FlightCatalog<S> {
    flights: FlightList,
    store: S,
    storage_key: String,
    persistent: bool,
}

impl<S: KeyValueStore> FlightCatalog<S> {
    /// Restore the persisted catalog, or fall back to the seed (or nothing)
    /// and write that back so the next start restores it.
    pub fn open(store: S, options: CatalogOptions) -> Self {
        let mut catalog = Self {
            flights: FlightList::new(),
            store,
            storage_key: options.storage_key,
            persistent: true,
        };

        match catalog.restore() {
            Some(flights) => {
                info!(count = flights.len(), key = %catalog.storage_key, "Restored flight catalog");
                catalog.flights = FlightList::from_ordered(flights);
            }
            None => {
                let seed = options.seed.unwrap_or_default();
                if seed.is_empty() {
                    info!(key = %catalog.storage_key, "Starting with an empty flight catalog");
                } else {
                    info!(count = seed.len(), key = %catalog.storage_key, "Seeding flight catalog");
                }
                catalog.flights = FlightList::from_ordered(seed);
                catalog.persist();
            }
        }

        catalog
    }

    /// Release the catalog and hand the store back.
    pub fn close(self) -> S {
        self.store
    }

    fn restore(&self) -> Option<Vec<FlightRecord>> {
        let raw = match self.store.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted catalog");
                return None;
            }
        };

        match snapshot::decode(&raw) {
            Ok(flights) => Some(flights),
            Err(e) => {
                warn!(error = %e, "Discarding invalid persisted catalog");
                None
            }
        }
    }

    /// Write the full catalog to storage.
    pub fn save(&mut self) -> Result<(), CatalogError> {
        let result = self.write_snapshot();
        self.persistent = result.is_ok();
        result
    }

    fn write_snapshot(&mut self) -> Result<(), CatalogError> {
        let text = snapshot::encode_compact(&self.get_all_flights())?;
        self.store.set(&self.storage_key, &text)?;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to persist flight catalog, continuing in memory");
        }
    }

    /// Whether the last storage write went through.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Prepend a flight and persist. The caller assigns the id and validates.
    pub fn add_flight(&mut self, flight: FlightRecord) {
        self.add_flight_deferred(flight);
        self.persist();
    }

    /// Prepend a flight without touching storage; see [`FlightCatalog::save`].
    pub fn add_flight_deferred(&mut self, flight: FlightRecord) {
        debug!(id = %flight.id, plane_number = %flight.plane_number, "Flight added");
        self.flights.push_front(flight);
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.len() == 0
    }

    pub fn iter(&self) -> Iter<'_> {
        self.flights.iter()
    }

    /// Snapshot of every flight, newest first.
    pub fn get_all_flights(&self) -> Vec<FlightRecord> {
        self.flights.iter().cloned().collect()
    }

    /// First flight whose plane number matches exactly (case-sensitive).
    pub fn find_flight_by_plane_number(&self, plane_number: &str) -> Option<FlightRecord> {
        self.flights
            .iter()
            .find(|f| f.plane_number == plane_number)
            .cloned()
    }

    /// Every flight whose destination contains `query`, ignoring case.
    ///
    /// No trimming happens here; an empty query matches everything.
    pub fn find_flights_by_destination(&self, query: &str) -> Vec<FlightRecord> {
        let needle = query.to_lowercase();
        let found: Vec<FlightRecord> = self
            .flights
            .iter()
            .filter(|f| f.destination.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        debug!(query, matches = found.len(), "Destination search");
        found
    }

    /// Sell one seat on the first flight with this plane number.
    ///
    /// A successful reservation is persisted right away.
    pub fn reserve_ticket(&mut self, plane_number: &str) -> ReserveOutcome {
        let outcome = match self.flights.find_mut(|f| f.plane_number == plane_number) {
            None => ReserveOutcome::NotFound,
            Some(flight) if flight.is_sold_out() => ReserveOutcome::SoldOut,
            Some(flight) => {
                flight.sold_tickets += 1;
                ReserveOutcome::Reserved {
                    remaining: flight.available_seats(),
                }
            }
        };

        debug!(plane_number, ?outcome, "Reservation attempt");
        if outcome.is_reserved() {
            self.persist();
        }
        outcome
    }

    pub fn available_seats(flight: &FlightRecord) -> u32 {
        flight.available_seats()
    }

    /// Pretty-printed JSON array of the whole catalog.
    pub fn export_snapshot(&self) -> Result<String, SnapshotError> {
        snapshot::encode(&self.get_all_flights())
    }

    /// Replace the whole catalog with a snapshot; iteration order follows the array.
    ///
    /// On error nothing changes. Returns the number of flights imported.
    pub fn import_snapshot(&mut self, text: &str) -> Result<usize, SnapshotError> {
        let flights = snapshot::decode(text)?;
        let count = flights.len();
        self.flights = FlightList::from_ordered(flights);
        info!(count, "Imported flight catalog");
        self.persist();
        Ok(count)
    }

    /// Drop every flight and the persisted snapshot.
    pub fn clear_all(&mut self) {
        self.flights.clear();
        match self.store.remove(&self.storage_key) {
            Ok(()) => self.persistent = true,
            Err(e) => {
                warn!(error = %e, "Failed to remove persisted catalog");
                self.persistent = false;
            }
        }
        info!("Flight catalog cleared");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
