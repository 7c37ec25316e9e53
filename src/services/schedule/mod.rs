//! Read-side projection for the scheduling board.
//!
//! Classification, link detection, filtering and positioning are pure
//! functions over the latest working set; nothing here is cached on the
//! stored record or survives a data refresh.

pub mod classify;
pub mod filter;
pub mod layout;
pub mod link;
pub mod week;

use chrono::NaiveDate;

pub use classify::{classify, classify_flight, Classified, FlightKind, MIN_GROUND_MINUTES};
pub use filter::{FlightFilter, StatusFilter};
pub use layout::{TimeGridLayout, SLOT_MINUTES};
pub use link::{link_slots, LINK_PALETTE_SIZE};
pub use week::{WeekWindow, MAX_WEEK_OFFSET};

use crate::models::flight::Flight;

/// A flight positioned on the board: the render-ready model handed to the
/// view layer.
#[derive(Debug, Clone)]
pub struct BoardFlight {
    pub flight: Flight,
    pub kind: FlightKind,
    pub duration_minutes: i64,
    /// Column within the visible week, `0..7`.
    pub day_index: usize,
    /// Vertical offset from the top of the time grid.
    pub y: f32,
    /// Block height; the visible clip of the flight's duration.
    pub height: f32,
    /// Link-group palette slot, if the flight is part of a linked visit.
    pub link_slot: Option<usize>,
}

impl BoardFlight {
    pub fn id(&self) -> Option<i64> {
        self.flight.id
    }
}

/// Project the working set onto one visible week.
///
/// Link detection runs over the full set before filtering so a filtered
/// view never changes which visits count as linked; the filter then
/// narrows what is shown, and the layout positions the survivors whose
/// anchor date falls on one of `dates`.
pub fn project_week(
    flights: &[Flight],
    filter: &FlightFilter,
    dates: &[NaiveDate],
    layout: &TimeGridLayout,
) -> Vec<BoardFlight> {
    let links = link_slots(flights);

    let mut positioned = Vec::new();
    for flight in flights {
        let Some(start) = classify::scheduled_start(flight) else {
            continue;
        };
        if !filter.matches(flight) {
            continue;
        }
        let Some(day_index) = dates.iter().position(|d| *d == start.date_naive()) else {
            continue;
        };

        let classified = classify_flight(flight);
        let start_time = start.time();
        let height = layout.height_for_duration(start_time, classified.duration_minutes);
        if height <= 0.0 {
            // Entirely outside the configured visible hours.
            continue;
        }

        positioned.push(BoardFlight {
            kind: classified.kind,
            duration_minutes: classified.duration_minutes,
            day_index,
            y: layout.y_for_time(start_time),
            height,
            link_slot: flight.id.and_then(|id| links.get(&id).copied()),
            flight: flight.clone(),
        });
    }

    positioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flight::FlightStatus;
    use chrono::{Duration, Local, TimeZone};

    fn week_dates() -> Vec<NaiveDate> {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        (0..7).map(|i| monday + Duration::days(i)).collect()
    }

    fn flight_at(id: i64, tail: &str, day: u32, hour: u32) -> Flight {
        let mut flight = Flight::new(
            tail,
            Local.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
        )
        .unwrap();
        flight.id = Some(id);
        flight
    }

    #[test]
    fn test_projection_positions_flights_in_window() {
        let layout = TimeGridLayout::full_day();
        let flights = vec![
            flight_at(1, "N1", 3, 10),  // Monday 10:00
            flight_at(2, "N2", 5, 8),   // Wednesday 08:00
            flight_at(3, "N3", 12, 10), // Next week; excluded
        ];

        let board = project_week(&flights, &FlightFilter::default(), &week_dates(), &layout);
        assert_eq!(board.len(), 2);

        let monday = board.iter().find(|b| b.id() == Some(1)).unwrap();
        assert_eq!(monday.day_index, 0);
        assert_eq!(monday.y, layout.y_for_time(chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert_eq!(monday.kind, FlightKind::Departure);
        assert_eq!(monday.duration_minutes, MIN_GROUND_MINUTES);

        let wednesday = board.iter().find(|b| b.id() == Some(2)).unwrap();
        assert_eq!(wednesday.day_index, 2);
    }

    #[test]
    fn test_projection_applies_filter() {
        let layout = TimeGridLayout::full_day();
        let mut delayed = flight_at(1, "N1", 3, 10);
        delayed.status = FlightStatus::Delayed;
        let flights = vec![delayed, flight_at(2, "N2", 3, 12)];

        let filter = FlightFilter {
            status: StatusFilter::Only(FlightStatus::Delayed),
            ..Default::default()
        };
        let board = project_week(&flights, &filter, &week_dates(), &layout);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id(), Some(1));
    }

    #[test]
    fn test_linked_pair_shares_slot_through_projection() {
        let layout = TimeGridLayout::full_day();
        let mut arrival = flight_at(1, "N100", 3, 9);
        arrival.arrival_time = arrival.departure_time.take();
        let departure = flight_at(2, "N100", 3, 15);
        let lone = flight_at(3, "N200", 3, 11);

        let board = project_week(
            &[arrival, departure, lone],
            &FlightFilter::default(),
            &week_dates(),
            &layout,
        );

        let slot_of = |id: i64| {
            board
                .iter()
                .find(|b| b.id() == Some(id))
                .unwrap()
                .link_slot
        };
        assert!(slot_of(1).is_some());
        assert_eq!(slot_of(1), slot_of(2));
        assert_eq!(slot_of(3), None);
    }

    #[test]
    fn test_linking_ignores_filter_narrowing() {
        let layout = TimeGridLayout::full_day();
        let mut arrival = flight_at(1, "N100", 3, 9);
        arrival.arrival_time = arrival.departure_time.take();
        arrival.status = FlightStatus::Arrived;
        let departure = flight_at(2, "N100", 3, 15);

        // Filter hides the arrival leg; the departure stays linked.
        let filter = FlightFilter {
            status: StatusFilter::Only(FlightStatus::Scheduled),
            ..Default::default()
        };
        let board = project_week(&[arrival, departure], &filter, &week_dates(), &layout);
        assert_eq!(board.len(), 1);
        assert!(board[0].link_slot.is_some());
    }

    #[test]
    fn test_turnaround_block_spans_ground_time() {
        let layout = TimeGridLayout::full_day();
        let mut flight = flight_at(1, "N1", 3, 14);
        flight.arrival_time = Some(Local.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap());

        let board = project_week(
            std::slice::from_ref(&flight),
            &FlightFilter::default(),
            &week_dates(),
            &layout,
        );
        assert_eq!(board[0].kind, FlightKind::Turnaround);
        assert_eq!(board[0].duration_minutes, 120);
        assert_eq!(
            board[0].y,
            layout.y_for_time(chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        );
        assert_eq!(board[0].height, layout.height_for_duration(
            chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            120,
        ));
    }

    #[test]
    fn test_flight_outside_visible_hours_is_dropped() {
        let layout = TimeGridLayout::new(6, 12);
        let flights = vec![flight_at(1, "N1", 3, 18)];
        let board = project_week(&flights, &FlightFilter::default(), &week_dates(), &layout);
        assert!(board.is_empty());
    }
}
