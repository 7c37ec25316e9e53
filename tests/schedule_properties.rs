// Property tests for the pure scheduling core

use chrono::{Duration, Local, NaiveTime, TimeZone, Timelike};
use proptest::prelude::*;

use flightboard::services::schedule::layout::{snap_minutes, TimeGridLayout, SLOT_MINUTES};
use flightboard::services::schedule::{classify, FlightKind, WeekWindow, MAX_WEEK_OFFSET, MIN_GROUND_MINUTES};

proptest! {
    /// Converting time -> pixel -> time is stable once snapped: snapping a
    /// second time changes nothing.
    #[test]
    fn snap_round_trip_is_idempotent(y in 0.0_f32..5000.0, start_hour in 0_u32..23) {
        let layout = TimeGridLayout::new(start_hour, 24);

        let snapped = layout.time_for_y(y);
        let resnapped = layout.time_for_y(layout.y_for_time(snapped));
        prop_assert_eq!(snapped, resnapped);
    }

    /// Every snapped time sits on the 15-minute grid.
    #[test]
    fn snapped_times_are_on_the_slot_grid(y in -100.0_f32..5000.0) {
        let layout = TimeGridLayout::full_day();
        let time = layout.time_for_y(y);
        prop_assert_eq!(i64::from(time.minute()) % SLOT_MINUTES, 0);
        prop_assert_eq!(time.second(), 0);
    }

    /// snap_minutes lands on the grid and moves by at most half a slot.
    #[test]
    fn snap_minutes_is_nearest(minutes in 0_i64..(24 * 60)) {
        let snapped = snap_minutes(minutes);
        prop_assert_eq!(snapped % SLOT_MINUTES, 0);
        prop_assert!((snapped - minutes).abs() <= SLOT_MINUTES / 2);
    }

    /// The classifier is total and never yields a duration under the
    /// ground-time floor, whatever the timestamp spread.
    #[test]
    fn classifier_is_total(
        has_arrival in any::<bool>(),
        has_departure in any::<bool>(),
        arrival_offset in -10_000_i64..10_000,
        spread in -10_000_i64..10_000,
    ) {
        let base = Local.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
        let arrival = has_arrival.then(|| base + Duration::minutes(arrival_offset));
        let departure = has_departure.then(|| base + Duration::minutes(arrival_offset + spread));

        let classified = classify(arrival, departure);
        prop_assert!(classified.duration_minutes >= MIN_GROUND_MINUTES);

        let expected = match (has_arrival, has_departure) {
            (true, true) => FlightKind::Turnaround,
            (true, false) => FlightKind::Arrival,
            _ => FlightKind::Departure,
        };
        prop_assert_eq!(classified.kind, expected);
    }

    /// Any sequence of paging actions keeps the window inside its bounds.
    #[test]
    fn week_offset_never_escapes_bounds(steps in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut window = WeekWindow::new();
        for forward in steps {
            if forward {
                window.next();
            } else {
                window.previous();
            }
            prop_assert!(window.offset().abs() <= MAX_WEEK_OFFSET);
        }
    }

    /// The vertical mapping is injective over slots: distinct slot times
    /// never collide on a pixel row.
    #[test]
    fn slots_have_distinct_rows(a in 0_i64..96, b in 0_i64..96) {
        prop_assume!(a != b);
        let layout = TimeGridLayout::full_day();
        let time = |slot: i64| {
            let minutes = slot * SLOT_MINUTES;
            NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0).unwrap()
        };
        prop_assert_ne!(layout.y_for_time(time(a)), layout.y_for_time(time(b)));
    }
}
