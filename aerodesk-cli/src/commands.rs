use std::fs;
use std::path::PathBuf;

use aerodesk_catalog::{FlightCatalog, ReserveOutcome};
use aerodesk_core::{FlightDraft, KeyValueStore};
use clap::{Args, Subcommand};
use tracing::info;

use crate::error::CliError;
use crate::render;

pub const DEFAULT_EXPORT_FILE: &str = "flights_export.json";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every flight, newest first
    List,
    /// Look up a flight by plane number (exact match)
    Find { plane_number: String },
    /// Find flights whose destination contains the text, ignoring case
    Search { destination: String },
    /// Sell one ticket on a flight
    Reserve { plane_number: String },
    /// Add a new flight
    Add(AddArgs),
    /// Write the whole catalog as pretty JSON
    Export {
        #[arg(long, short, default_value = DEFAULT_EXPORT_FILE)]
        out: PathBuf,
        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Replace the whole catalog with a JSON export
    Import { file: PathBuf },
    /// Remove every flight and the stored data
    Clear,
}

#[derive(Debug, Args, Default)]
pub struct AddArgs {
    #[arg(long = "plane")]
    pub plane_number: String,
    #[arg(long)]
    pub destination: String,
    /// e.g. 2024-05-01T10:30
    #[arg(long)]
    pub departure: String,
    #[arg(long)]
    pub arrival: String,
    #[arg(long)]
    pub total_seats: String,
    #[arg(long = "sold", default_value = "")]
    pub sold_tickets: String,
}

impl From<AddArgs> for FlightDraft {
    fn from(args: AddArgs) -> Self {
        FlightDraft {
            plane_number: args.plane_number,
            destination: args.destination,
            departure_time: args.departure,
            arrival_time: args.arrival,
            total_seats: args.total_seats,
            sold_tickets: args.sold_tickets,
        }
    }
}

/// Run one command against the catalog and return the text to show.
pub fn execute<S: KeyValueStore>(
    catalog: &mut FlightCatalog<S>,
    command: Command,
) -> Result<String, CliError> {
    match command {
        Command::List => {
            let flights = catalog.get_all_flights();
            if flights.is_empty() {
                return Ok("No flights in the catalog\n".to_string());
            }
            Ok(render::flight_table(&flights))
        }

        Command::Find { plane_number } => {
            let plane_number = non_empty(&plane_number, "plane number")?;
            catalog
                .find_flight_by_plane_number(plane_number)
                .map(|flight| render::flight_details(&flight))
                .ok_or_else(|| CliError::NotFound(plane_number.to_string()))
        }

        Command::Search { destination } => {
            let destination = non_empty(&destination, "destination airport")?;
            let flights = catalog.find_flights_by_destination(destination);
            if flights.is_empty() {
                return Ok(format!("No flights to \"{}\"\n", destination));
            }
            Ok(render::flight_table(&flights))
        }

        Command::Reserve { plane_number } => {
            let plane_number = non_empty(&plane_number, "plane number")?;
            match catalog.reserve_ticket(plane_number) {
                ReserveOutcome::Reserved { remaining } => Ok(format!(
                    "Ticket reserved on {}, {} seats left\n",
                    plane_number, remaining
                )),
                ReserveOutcome::SoldOut => Err(CliError::SoldOut(plane_number.to_string())),
                ReserveOutcome::NotFound => Err(CliError::NotFound(plane_number.to_string())),
            }
        }

        Command::Add(args) => {
            let flight = FlightDraft::from(args).validate()?;
            let message = format!("Flight {} to {} added\n", flight.plane_number, flight.destination);
            catalog.add_flight(flight);
            Ok(message)
        }

        Command::Export { out, stdout } => {
            let text = catalog.export_snapshot().map_err(CliError::Export)?;
            if stdout {
                return Ok(format!("{}\n", text));
            }
            fs::write(&out, &text).map_err(|source| CliError::WriteFile {
                path: out.clone(),
                source,
            })?;
            info!(path = %out.display(), count = catalog.len(), "Catalog exported");
            Ok(format!("Exported {} flights to {}\n", catalog.len(), out.display()))
        }

        Command::Import { file } => {
            let text = fs::read_to_string(&file).map_err(|source| CliError::ReadFile {
                path: file.clone(),
                source,
            })?;
            let count = catalog
                .import_snapshot(&text)
                .map_err(CliError::ImportRejected)?;
            Ok(format!("Imported {} flights from {}\n", count, file.display()))
        }

        Command::Clear => {
            catalog.clear_all();
            Ok("All flight data cleared\n".to_string())
        }
    }
}

fn non_empty<'a>(raw: &'a str, what: &'static str) -> Result<&'a str, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyQuery(what));
    }
    Ok(trimmed)
}
