use std::fmt::Write;

use aerodesk_core::schedule::format_date_time;
use aerodesk_core::FlightRecord;

const HEADER: [&str; 6] = ["Plane", "Destination", "Departure", "Arrival", "Seats", "Free"];

/// Render flights as an aligned text table, in the order given.
pub fn flight_table(flights: &[FlightRecord]) -> String {
    let rows: Vec<[String; 6]> = flights
        .iter()
        .map(|f| {
            [
                f.plane_number.clone(),
                f.destination.clone(),
                format_date_time(&f.departure_time),
                format_date_time(&f.arrival_time),
                format!("{}/{}", f.sold_tickets, f.total_seats),
                f.available_seats().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADER.map(str::to_string), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Full card for a single flight.
pub fn flight_details(flight: &FlightRecord) -> String {
    format!(
        "Flight {}\n  Destination: {}\n  Departure:   {}\n  Arrival:     {}\n  Seats:       {} total, {} sold, {} free\n  Id:          {}\n",
        flight.plane_number,
        flight.destination,
        format_date_time(&flight.departure_time),
        format_date_time(&flight.arrival_time),
        flight.total_seats,
        flight.sold_tickets,
        flight.available_seats(),
        flight.id,
    )
}
