use chrono::{DateTime, NaiveDateTime};

/// Layouts accepted for stored date-times, besides RFC 3339.
/// The first is what an HTML `datetime-local` input produces.
const LOCAL_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a stored departure/arrival time.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    LOCAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
}

/// Render a stored time as `dd.mm.yyyy, HH:MM:SS`.
///
/// Unparseable text is shown as-is.
pub fn format_date_time(raw: &str) -> String {
    match parse_date_time(raw) {
        Some(dt) => dt.format("%d.%m.%Y, %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}
