use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scheduled flight as stored in the catalog.
///
/// Field names follow the persisted JSON schema (`planeNumber`, `totalSeats`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub id: String,
    pub plane_number: String,
    pub destination: String,
    /// Kept as entered; only parsed for display.
    pub departure_time: String,
    pub arrival_time: String,
    pub total_seats: u32,
    pub sold_tickets: u32,
}

impl FlightRecord {
    /// Seats still open for reservation.
    pub fn available_seats(&self) -> u32 {
        self.total_seats.saturating_sub(self.sold_tickets)
    }

    pub fn is_sold_out(&self) -> bool {
        self.sold_tickets >= self.total_seats
    }

    /// Checks the seat invariant: `total_seats > 0` and `sold_tickets <= total_seats`.
    pub fn check_seats(&self) -> Result<(), ValidationError> {
        check_seat_counts(self.total_seats as i64, self.sold_tickets as i64)
    }

    /// Generate a fresh opaque identifier for a new record.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Flight data as entered by a user, before an id is assigned.
///
/// Every field is raw text so the caller layer can hand over form input
/// untouched and get a single validation pass.
#[derive(Debug, Clone, Default)]
pub struct FlightDraft {
    pub plane_number: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub total_seats: String,
    /// Empty means no tickets sold yet.
    pub sold_tickets: String,
}

impl FlightDraft {
    /// Validate the draft and turn it into a record with a freshly generated id.
    pub fn validate(&self) -> Result<FlightRecord, ValidationError> {
        let required = [
            ("planeNumber", &self.plane_number),
            ("destination", &self.destination),
            ("departureTime", &self.departure_time),
            ("arrivalTime", &self.arrival_time),
            ("totalSeats", &self.total_seats),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        let total_seats = parse_count("totalSeats", &self.total_seats)?;
        let sold_tickets = if self.sold_tickets.trim().is_empty() {
            0
        } else {
            parse_count("soldTickets", &self.sold_tickets)?
        };
        check_seat_counts(total_seats, sold_tickets)?;

        Ok(FlightRecord {
            id: FlightRecord::generate_id(),
            plane_number: self.plane_number.trim().to_string(),
            destination: self.destination.trim().to_string(),
            departure_time: self.departure_time.trim().to_string(),
            arrival_time: self.arrival_time.trim().to_string(),
            // Both counts are range-checked above.
            total_seats: total_seats as u32,
            sold_tickets: sold_tickets as u32,
        })
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

fn check_seat_counts(total_seats: i64, sold_tickets: i64) -> Result<(), ValidationError> {
    if total_seats <= 0 || total_seats > u32::MAX as i64 {
        return Err(ValidationError::NonPositiveSeats(total_seats));
    }
    if sold_tickets < 0 || sold_tickets > total_seats {
        return Err(ValidationError::SoldOutOfRange {
            sold: sold_tickets,
            total: total_seats,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field is missing: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a whole number: {value:?}")]
    NotANumber {
        field: &'static str,
        value: String,
    },

    #[error("Total seats must be a positive number, got {0}")]
    NonPositiveSeats(i64),

    #[error("Sold tickets must be between 0 and {total}, got {sold}")]
    SoldOutOfRange {
        sold: i64,
        total: i64,
    },
}
