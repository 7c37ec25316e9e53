//! Turnaround link detection.
//!
//! An arrival and a departure flown by the same tail are one aircraft
//! visit split across two records; the board paints them with a shared
//! accent so the pairing is visible. The relation is derived on every
//! projection pass and never persisted.

use std::collections::{BTreeMap, HashMap};

use crate::models::flight::Flight;

use super::classify::{classify_flight, FlightKind};

/// Number of distinct link accents before slots repeat.
pub const LINK_PALETTE_SIZE: usize = 8;

/// Map from flight id to its link-group palette slot.
///
/// Flights absent from the map are unlinked. Partitions are keyed by tail
/// number; a partition qualifies when it contains at least one
/// arrival-role and one departure-role record. Every flight in a
/// qualifying partition shares the slot, turnarounds included. A lone
/// turnaround is its own visit and gets no slot.
///
/// Slots are assigned over the lexicographically sorted linked tails, so
/// the assignment is deterministic for a given working set regardless of
/// input order.
pub fn link_slots(flights: &[Flight]) -> HashMap<i64, usize> {
    // BTreeMap gives the sorted iteration the palette indexing relies on.
    let mut partitions: BTreeMap<&str, Vec<&Flight>> = BTreeMap::new();
    for flight in flights {
        if flight.id.is_some() {
            partitions
                .entry(flight.tail_number.as_str())
                .or_default()
                .push(flight);
        }
    }

    let mut slots = HashMap::new();
    let mut next_slot = 0;
    for (_tail, members) in partitions {
        let mut has_arrival = false;
        let mut has_departure = false;
        for flight in &members {
            match classify_flight(flight).kind {
                FlightKind::Arrival => has_arrival = true,
                FlightKind::Departure => has_departure = true,
                FlightKind::Turnaround => {}
            }
        }

        if has_arrival && has_departure {
            let slot = next_slot % LINK_PALETTE_SIZE;
            next_slot += 1;
            for flight in members {
                if let Some(id) = flight.id {
                    slots.insert(id, slot);
                }
            }
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn arrival_only(id: i64, tail: &str) -> Flight {
        let mut flight =
            Flight::new(tail, Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()).unwrap();
        flight.id = Some(id);
        flight.arrival_time = flight.departure_time.take();
        flight
    }

    fn departure_only(id: i64, tail: &str) -> Flight {
        let mut flight =
            Flight::new(tail, Local.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap()).unwrap();
        flight.id = Some(id);
        flight
    }

    fn turnaround(id: i64, tail: &str) -> Flight {
        let mut flight = departure_only(id, tail);
        flight.arrival_time = Some(Local.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
        flight
    }

    #[test]
    fn test_arrival_departure_pair_is_linked() {
        let flights = vec![
            arrival_only(1, "N100"),
            departure_only(2, "N100"),
            departure_only(3, "N200"),
        ];

        let slots = link_slots(&flights);
        assert_eq!(slots.get(&1), slots.get(&2));
        assert!(slots.contains_key(&1));
        assert!(!slots.contains_key(&3), "unrelated flight must not link");
    }

    #[test]
    fn test_lone_turnaround_is_not_linked() {
        let slots = link_slots(&[turnaround(1, "N100")]);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_turnaround_joins_its_partition() {
        let flights = vec![
            arrival_only(1, "N100"),
            departure_only(2, "N100"),
            turnaround(3, "N100"),
        ];

        let slots = link_slots(&flights);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots.get(&1), slots.get(&3));
    }

    #[test]
    fn test_assignment_is_deterministic_under_reordering() {
        let mut flights = vec![
            arrival_only(1, "N300"),
            departure_only(2, "N300"),
            arrival_only(3, "N100"),
            departure_only(4, "N100"),
            arrival_only(5, "N200"),
            departure_only(6, "N200"),
        ];

        let forward = link_slots(&flights);
        flights.reverse();
        let reversed = link_slots(&flights);

        assert_eq!(forward, reversed);
        // Sorted tails: N100 first, then N200, then N300.
        assert_eq!(forward.get(&3), Some(&0));
        assert_eq!(forward.get(&5), Some(&1));
        assert_eq!(forward.get(&1), Some(&2));
    }

    #[test]
    fn test_slots_wrap_around_palette() {
        let mut flights = Vec::new();
        for i in 0..(LINK_PALETTE_SIZE as i64 + 1) {
            let tail = format!("N{:03}", i);
            flights.push(arrival_only(i * 2 + 1, &tail));
            flights.push(departure_only(i * 2 + 2, &tail));
        }

        let slots = link_slots(&flights);
        // Ninth linked tail reuses slot 0.
        assert_eq!(slots.get(&(LINK_PALETTE_SIZE as i64 * 2 + 1)), Some(&0));
    }
}
