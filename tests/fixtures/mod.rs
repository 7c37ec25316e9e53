// Shared fixtures for integration tests

use chrono::{DateTime, Duration, Local, TimeZone};

use flightboard::models::flight::{Flight, ServiceTag};
use flightboard::services::database::Database;

/// In-memory database with the schema applied.
pub fn setup_db() -> Database {
    let db = Database::new(":memory:").expect("in-memory database");
    db.initialize_schema().expect("schema");
    db
}

/// Monday 2024-06-03 at the given time; the anchor week used throughout
/// the integration tests.
pub fn monday_at(hour: u32, minute: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 3, hour, minute, 0).unwrap()
}

pub fn week_dates() -> Vec<chrono::NaiveDate> {
    let monday = monday_at(0, 0).date_naive();
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

pub fn departure(tail: &str, at: DateTime<Local>) -> Flight {
    Flight::new(tail, at).expect("valid flight")
}

pub fn arrival(tail: &str, at: DateTime<Local>) -> Flight {
    let mut flight = Flight::new(tail, at).expect("valid flight");
    flight.arrival_time = flight.departure_time.take();
    flight
}

pub fn turnaround(tail: &str, arrives: DateTime<Local>, departs: DateTime<Local>) -> Flight {
    Flight::builder()
        .tail_number(tail)
        .arrival_time(arrives)
        .departure_time(departs)
        .service(ServiceTag::Fuel)
        .build()
        .expect("valid flight")
}
