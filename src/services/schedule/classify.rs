//! Flight classification.
//!
//! Kind and duration are never stored on the record; they are recomputed
//! here on every projection pass from which timestamps are present.

use chrono::{DateTime, Duration, Local};

use crate::models::flight::Flight;

/// Minimum ground-service time in minutes. Turnarounds shorter than this
/// (including corrupt or drag-transient negative spans) are floored to it,
/// and it doubles as the default block length for single-timestamp flights.
pub const MIN_GROUND_MINUTES: i64 = 45;

/// Derived role of a flight on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightKind {
    Arrival,
    Departure,
    Turnaround,
}

impl FlightKind {
    pub fn label(&self) -> &'static str {
        match self {
            FlightKind::Arrival => "Arrival",
            FlightKind::Departure => "Departure",
            FlightKind::Turnaround => "Turnaround",
        }
    }
}

/// Classification result: role plus block length in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub kind: FlightKind,
    pub duration_minutes: i64,
}

/// Classify a pair of optional timestamps.
///
/// Total: every input combination produces a result. A record with neither
/// timestamp (rejected at the store boundary, but tolerated here) degrades
/// to the departure-only case.
pub fn classify(
    arrival: Option<DateTime<Local>>,
    departure: Option<DateTime<Local>>,
) -> Classified {
    match (arrival, departure) {
        (Some(arrival), Some(departure)) => Classified {
            kind: FlightKind::Turnaround,
            duration_minutes: (departure - arrival)
                .num_minutes()
                .max(MIN_GROUND_MINUTES),
        },
        (Some(_), None) => Classified {
            kind: FlightKind::Arrival,
            duration_minutes: MIN_GROUND_MINUTES,
        },
        (None, _) => Classified {
            kind: FlightKind::Departure,
            duration_minutes: MIN_GROUND_MINUTES,
        },
    }
}

pub fn classify_flight(flight: &Flight) -> Classified {
    classify(flight.arrival_time, flight.departure_time)
}

/// The timestamp a flight's block is anchored at: the arrival when there is
/// one, otherwise the departure. `None` only for a record with no
/// timestamps at all.
pub fn scheduled_start(flight: &Flight) -> Option<DateTime<Local>> {
    flight.arrival_time.or(flight.departure_time)
}

/// The departure to use where one is structurally required: the real one,
/// or a synthetic departure `MIN_GROUND_MINUTES` after the arrival.
pub fn effective_departure(flight: &Flight) -> Option<DateTime<Local>> {
    flight
        .departure_time
        .or_else(|| flight.arrival_time.map(|a| a + Duration::minutes(MIN_GROUND_MINUTES)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
    }

    #[test_case(Some(at(10, 0)), Some(at(12, 0)), FlightKind::Turnaround; "both present")]
    #[test_case(Some(at(10, 0)), None, FlightKind::Arrival; "arrival only")]
    #[test_case(None, Some(at(10, 0)), FlightKind::Departure; "departure only")]
    #[test_case(None, None, FlightKind::Departure; "neither present degrades")]
    fn test_classify_totality(
        arrival: Option<DateTime<Local>>,
        departure: Option<DateTime<Local>>,
        expected: FlightKind,
    ) {
        let classified = classify(arrival, departure);
        assert_eq!(classified.kind, expected);
        assert!(classified.duration_minutes >= MIN_GROUND_MINUTES);
    }

    #[test]
    fn test_turnaround_duration() {
        let classified = classify(Some(at(10, 0)), Some(at(12, 30)));
        assert_eq!(classified.duration_minutes, 150);
    }

    #[test]
    fn test_short_turnaround_floors_to_minimum() {
        // 20 minutes on the ground still blocks 45 minutes of ramp time.
        let classified = classify(Some(at(10, 0)), Some(at(10, 20)));
        assert_eq!(classified.duration_minutes, MIN_GROUND_MINUTES);
    }

    #[test]
    fn test_inverted_turnaround_floors_instead_of_going_negative() {
        let classified = classify(Some(at(12, 0)), Some(at(10, 0)));
        assert_eq!(classified.kind, FlightKind::Turnaround);
        assert_eq!(classified.duration_minutes, MIN_GROUND_MINUTES);
    }

    #[test]
    fn test_scheduled_start_prefers_arrival() {
        let mut flight = Flight::new("N1", at(14, 0)).unwrap();
        assert_eq!(scheduled_start(&flight), Some(at(14, 0)));

        flight.arrival_time = Some(at(11, 0));
        assert_eq!(scheduled_start(&flight), Some(at(11, 0)));
    }

    #[test]
    fn test_effective_departure_synthesizes_from_arrival() {
        let mut flight = Flight::new("N1", at(14, 0)).unwrap();
        flight.arrival_time = Some(at(11, 0));
        flight.departure_time = None;
        assert_eq!(effective_departure(&flight), Some(at(11, 45)));
    }
}
