// Interaction state
//
// One explicit, single-owner value holds whatever manipulation is in
// progress. The board passes it down through rendering; cells feed it
// hover slots and the release handler drains it. Because there is exactly
// one slot, only one card can be dragged or resized at a time.

use chrono::{DateTime, Local, NaiveDate, NaiveTime};

use crate::models::flight::Flight;

use super::drag::DragState;
use super::resize::{ResizeEdge, ResizeState};

/// The commit produced by a finished interaction: the rewritten schedule
/// for exactly one flight. Applying it is the caller's single update call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleChange {
    pub flight_id: i64,
    pub arrival_time: Option<DateTime<Local>>,
    pub departure_time: Option<DateTime<Local>>,
}

impl ScheduleChange {
    /// Copy the rewritten schedule onto a fetched record.
    pub fn apply_to(&self, flight: &mut Flight) {
        flight.arrival_time = self.arrival_time;
        flight.departure_time = self.departure_time;
    }
}

/// What the pointer is currently doing to the board.
#[derive(Clone, Debug, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    /// The flight being manipulated, if any.
    pub fn active_flight_id(&self) -> Option<i64> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging(drag) => Some(drag.flight_id),
            Interaction::Resizing(resize) => Some(resize.flight_id),
        }
    }

    /// Start dragging a card. Refused unless idle, so a second pointer
    /// cannot steal an interaction mid-flight.
    pub fn begin_drag(&mut self, flight: &Flight) -> bool {
        if !self.is_idle() {
            return false;
        }
        match DragState::from_flight(flight) {
            Some(drag) => {
                *self = Interaction::Dragging(drag);
                true
            }
            None => false,
        }
    }

    /// Start resizing a turnaround edge. Refused unless idle or the flight
    /// has no stored round trip.
    pub fn begin_resize(&mut self, flight: &Flight, edge: ResizeEdge) -> bool {
        if !self.is_idle() {
            return false;
        }
        match ResizeState::from_flight(flight, edge) {
            Some(resize) => {
                *self = Interaction::Resizing(resize);
                true
            }
            None => false,
        }
    }

    /// Feed the slot under the pointer to whichever machine is active.
    pub fn update_hover(&mut self, date: NaiveDate, slot_start: NaiveTime, slot_end: NaiveTime) {
        match self {
            Interaction::Idle => {}
            Interaction::Dragging(drag) => drag.update_hover(date, slot_start),
            Interaction::Resizing(resize) => resize.update_hover(date, slot_start, slot_end),
        }
    }

    /// Resolve on pointer release: at most one commit, and back to idle
    /// either way. The tentative state is discarded here; a no-op drag
    /// leaves no trace.
    pub fn finish(&mut self) -> Option<ScheduleChange> {
        let change = match &*self {
            Interaction::Idle => None,
            Interaction::Dragging(drag) => drag.reschedule(),
            Interaction::Resizing(resize) => resize.resized(),
        };
        *self = Interaction::Idle;
        change
    }

    /// Discard without committing (pointer lost, escape pressed).
    pub fn cancel(&mut self) {
        *self = Interaction::Idle;
    }

    pub fn drag(&self) -> Option<&DragState> {
        match self {
            Interaction::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn resize(&self) -> Option<&ResizeState> {
        match self {
            Interaction::Resizing(resize) => Some(resize),
            _ => None,
        }
    }
}
