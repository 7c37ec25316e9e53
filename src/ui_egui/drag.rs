// Card drag system
//
// Moves a flight's block to a new slot and day column. The pre-drag
// schedule is snapshotted as a restore point; pointer moves only update
// the tentative hover slot, and the store is touched on release alone.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

use crate::models::flight::Flight;
use crate::services::schedule::classify::{classify_flight, scheduled_start, FlightKind};

use super::interaction::ScheduleChange;

/// State of one in-flight drag.
#[derive(Clone, Debug)]
pub struct DragState {
    pub flight_id: i64,
    pub kind: FlightKind,
    original_arrival: Option<DateTime<Local>>,
    original_departure: Option<DateTime<Local>>,
    /// Anchor timestamp at drag start; the restore point a release is
    /// compared against.
    origin_start: DateTime<Local>,
    /// Block length, preserved across the move.
    pub duration: Duration,
    hovered: Option<(NaiveDate, NaiveTime)>,
}

impl DragState {
    pub fn from_flight(flight: &Flight) -> Option<Self> {
        let flight_id = flight.id?;
        let origin_start = scheduled_start(flight)?;
        let classified = classify_flight(flight);
        Some(Self {
            flight_id,
            kind: classified.kind,
            original_arrival: flight.arrival_time,
            original_departure: flight.departure_time,
            origin_start,
            duration: Duration::minutes(classified.duration_minutes),
            hovered: None,
        })
    }

    /// Record the slot currently under the pointer.
    pub fn update_hover(&mut self, date: NaiveDate, slot_start: NaiveTime) {
        self.hovered = Some((date, slot_start));
    }

    pub fn is_hovering(&self, date: NaiveDate, slot_start: NaiveTime) -> bool {
        self.hovered == Some((date, slot_start))
    }

    /// Tentative new anchor, if the pointer has crossed a slot yet.
    pub fn hovered_start(&self) -> Option<DateTime<Local>> {
        let (date, time) = self.hovered?;
        date.and_time(time).and_local_timezone(Local).single()
    }

    /// Resolve the drag into a commit.
    ///
    /// `None` when the tentative position is missing or equals the restore
    /// point; in that case nothing may be written to the store. Otherwise
    /// the timestamp matching the flight's role is rewritten: an arrival
    /// moves its arrival time, a departure its departure time, and a
    /// turnaround shifts both, preserving its ground time.
    pub fn reschedule(&self) -> Option<ScheduleChange> {
        let target = self.hovered_start()?;
        if target == self.origin_start {
            return None;
        }

        let (arrival_time, departure_time) = match self.kind {
            FlightKind::Turnaround => {
                let delta = target - self.origin_start;
                (
                    self.original_arrival.map(|a| a + delta),
                    self.original_departure.map(|d| d + delta),
                )
            }
            FlightKind::Arrival => (Some(target), self.original_departure),
            FlightKind::Departure => (self.original_arrival, Some(target)),
        };

        Some(ScheduleChange {
            flight_id: self.flight_id,
            arrival_time,
            departure_time,
        })
    }
}
