use std::fs;

use aerodesk_catalog::{CatalogOptions, FlightCatalog};
use aerodesk_cli::{execute, AddArgs, CliError, Command};
use aerodesk_store::{JsonFileStore, MemoryStore};
use clap::Parser;
use tempfile::tempdir;

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: Command,
}

fn parse(args: &[&str]) -> Command {
    TestCli::parse_from(std::iter::once("aerodesk").chain(args.iter().copied())).command
}

fn empty_catalog() -> FlightCatalog<MemoryStore> {
    FlightCatalog::open(MemoryStore::new(), CatalogOptions::default())
}

fn add_args(plane: &str, destination: &str, total: &str, sold: &str) -> AddArgs {
    AddArgs {
        plane_number: plane.to_string(),
        destination: destination.to_string(),
        departure: "2024-05-01T10:30".to_string(),
        arrival: "2024-05-01T12:45".to_string(),
        total_seats: total.to_string(),
        sold_tickets: sold.to_string(),
    }
}

#[test]
fn test_add_reserve_search_export_flow() {
    let dir = tempdir().unwrap();
    let mut catalog = empty_catalog();

    let out = execute(&mut catalog, Command::Add(add_args("SU-1001", "Moscow", "100", ""))).unwrap();
    assert!(out.contains("SU-1001"));
    assert_eq!(catalog.len(), 1);

    let out = execute(&mut catalog, Command::Reserve { plane_number: " SU-1001 ".to_string() }).unwrap();
    assert!(out.contains("99 seats left"));

    let out = execute(&mut catalog, Command::Search { destination: "mos".to_string() }).unwrap();
    assert!(out.contains("SU-1001"));
    assert!(out.contains("1/100"));

    let path = dir.path().join("export.json");
    execute(&mut catalog, Command::Export { out: path.clone(), stdout: false }).unwrap();
    let exported: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 1);
    assert_eq!(exported[0]["soldTickets"], 1);
    assert_eq!(exported[0]["planeNumber"], "SU-1001");
}

#[test]
fn test_blank_queries_never_reach_the_catalog() {
    let mut catalog = empty_catalog();
    for command in [
        Command::Find { plane_number: "  ".to_string() },
        Command::Search { destination: "".to_string() },
        Command::Reserve { plane_number: "\t".to_string() },
    ] {
        let err = execute(&mut catalog, command).unwrap_err();
        assert!(matches!(err, CliError::EmptyQuery(_)));
        assert_eq!(err.exit_code(), 2);
    }
}

#[test]
fn test_add_validation_messages() {
    let mut catalog = empty_catalog();

    let err = execute(&mut catalog, Command::Add(add_args("SU-1", "Moscow", "0", ""))).unwrap_err();
    assert!(err.to_string().contains("positive"));

    let err = execute(&mut catalog, Command::Add(add_args("SU-1", "Moscow", "10", "11"))).unwrap_err();
    assert!(err.to_string().contains("between 0 and 10"));

    let err = execute(&mut catalog, Command::Add(add_args("", "Moscow", "10", ""))).unwrap_err();
    assert!(err.to_string().contains("planeNumber"));

    assert!(catalog.is_empty());
}

#[test]
fn test_reserve_not_found_and_sold_out() {
    let mut catalog = empty_catalog();
    execute(&mut catalog, Command::Add(add_args("FULL", "Kazan", "1", "1"))).unwrap();

    let err = execute(&mut catalog, Command::Reserve { plane_number: "FULL".to_string() }).unwrap_err();
    assert!(matches!(err, CliError::SoldOut(_)));

    let err = execute(&mut catalog, Command::Reserve { plane_number: "NONE".to_string() }).unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_import_rejection_and_clear() {
    let dir = tempdir().unwrap();
    let mut catalog = empty_catalog();
    execute(&mut catalog, Command::Add(add_args("SU-1", "Moscow", "10", "2"))).unwrap();
    let before = catalog.get_all_flights();

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{}").unwrap();
    let err = execute(&mut catalog, Command::Import { file: bad }).unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON format"));
    assert_eq!(catalog.get_all_flights(), before);

    let missing = dir.path().join("missing.json");
    let err = execute(&mut catalog, Command::Import { file: missing }).unwrap_err();
    assert!(matches!(err, CliError::ReadFile { .. }));

    let export = dir.path().join("good.json");
    execute(&mut catalog, Command::Export { out: export.clone(), stdout: false }).unwrap();
    execute(&mut catalog, Command::Clear).unwrap();
    assert_eq!(execute(&mut catalog, Command::List).unwrap(), "No flights in the catalog\n");

    let out = execute(&mut catalog, Command::Import { file: export }).unwrap();
    assert!(out.starts_with("Imported 1 flights"));
    assert_eq!(catalog.get_all_flights(), before);
}

#[test]
fn test_file_backed_session_round_trip() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("storage.json");

    let mut catalog = FlightCatalog::open(JsonFileStore::new(&storage), CatalogOptions::default());
    execute(&mut catalog, parse(&["add", "--plane", "SU-7", "--destination", "Sochi",
        "--departure", "2024-05-01T10:30", "--arrival", "2024-05-01T13:00", "--total-seats", "3"])).unwrap();
    execute(&mut catalog, parse(&["reserve", "SU-7"])).unwrap();
    drop(catalog);

    let mut catalog = FlightCatalog::open(JsonFileStore::new(&storage), CatalogOptions::default());
    let out = execute(&mut catalog, parse(&["find", "SU-7"])).unwrap();
    assert!(out.contains("3 total, 1 sold, 2 free"));

    execute(&mut catalog, parse(&["clear"])).unwrap();
    drop(catalog);
    let catalog = FlightCatalog::open(JsonFileStore::new(&storage), CatalogOptions::default());
    assert!(catalog.is_empty());
}

#[test]
fn test_export_to_stdout() {
    let mut catalog = empty_catalog();
    execute(&mut catalog, Command::Add(add_args("SU-1", "Moscow", "10", ""))).unwrap();
    let out = execute(&mut catalog, parse(&["export", "--stdout"])).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["destination"], "Moscow");
}
