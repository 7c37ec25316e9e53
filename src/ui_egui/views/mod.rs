//! Shared types for the board views.

use chrono::{NaiveDate, NaiveTime};

use crate::models::flight::{Flight, FlightStatus};
use crate::services::schedule::{BoardFlight, FlightKind};
use crate::utils::date::format_time;

pub mod board_cell;
pub mod flight_card;
mod palette;
pub mod week_board;

/// Seconds a pointer must rest on a slot before the quick-create
/// affordance is revealed.
pub const QUICK_CREATE_DELAY: f64 = 0.2;

/// Request for delete confirmation dialog.
#[derive(Clone)]
pub struct DeleteConfirmRequest {
    /// ID of the flight to delete
    pub flight_id: i64,
    /// Tail number (for display in the confirmation dialog)
    pub tail_number: String,
}

/// Result of flight interactions in the board (context menus, clicks,
/// drag/resize commits). Collected while rendering and processed by the
/// app afterwards.
#[derive(Default)]
pub struct BoardInteractionResult {
    /// Flight that was clicked for editing
    pub flight_to_edit: Option<Flight>,
    /// Flights rewritten by a committed drag/resize (already stored)
    pub rescheduled: Vec<Flight>,
    /// Status changes requested from a context menu
    pub status_changes: Vec<(i64, FlightStatus)>,
    /// Request to show delete confirmation dialog
    pub delete_confirm_request: Option<DeleteConfirmRequest>,
    /// Request to create a flight at this slot
    pub quick_create: Option<(NaiveDate, NaiveTime)>,
    /// Store failure to surface in the status bar
    pub store_error: Option<String>,
}

impl BoardInteractionResult {
    pub fn merge(&mut self, other: BoardInteractionResult) {
        if other.flight_to_edit.is_some() {
            self.flight_to_edit = other.flight_to_edit;
        }
        self.rescheduled.extend(other.rescheduled);
        self.status_changes.extend(other.status_changes);
        if other.delete_confirm_request.is_some() {
            self.delete_confirm_request = other.delete_confirm_request;
        }
        if other.quick_create.is_some() {
            self.quick_create = other.quick_create;
        }
        if other.store_error.is_some() {
            self.store_error = other.store_error;
        }
    }

    /// Check if any action needs to be processed.
    pub fn has_actions(&self) -> bool {
        self.flight_to_edit.is_some()
            || !self.rescheduled.is_empty()
            || !self.status_changes.is_empty()
            || self.delete_confirm_request.is_some()
            || self.quick_create.is_some()
            || self.store_error.is_some()
    }
}

/// Hover timer for the quick-create affordance. Dwelling on one slot past
/// [`QUICK_CREATE_DELAY`] reveals it; moving off the slot resets with no
/// side effect.
#[derive(Default)]
pub struct SlotHover {
    slot: Option<(NaiveDate, NaiveTime)>,
    since: f64,
}

impl SlotHover {
    /// Feed the slot under the pointer (or `None`) at time `now` (seconds,
    /// monotonic). Returns true when the affordance should be shown for
    /// the given slot.
    pub fn observe(&mut self, slot: Option<(NaiveDate, NaiveTime)>, now: f64) -> bool {
        match slot {
            None => {
                self.slot = None;
                false
            }
            Some(current) => {
                if self.slot != Some(current) {
                    self.slot = Some(current);
                    self.since = now;
                    return false;
                }
                now - self.since >= QUICK_CREATE_DELAY
            }
        }
    }
}

/// Multi-line hover text for a positioned card.
pub fn format_flight_tooltip(board_flight: &BoardFlight, time_format: &str) -> String {
    let flight = &board_flight.flight;
    let mut lines = Vec::new();

    let mut headline = format!("{} · {}", flight.tail_number, board_flight.kind.label());
    if let Some(aircraft_type) = flight.aircraft_type.as_deref() {
        headline.push_str(&format!(" · {}", aircraft_type));
    }
    lines.push(headline);

    let route = flight.route_label();
    if !route.is_empty() {
        lines.push(route);
    }

    match board_flight.kind {
        FlightKind::Turnaround => {
            if let (Some(arrival), Some(departure)) = (flight.arrival_time, flight.departure_time)
            {
                lines.push(format!(
                    "On ground {} - {} ({} min)",
                    format_time(arrival.time(), time_format),
                    format_time(departure.time(), time_format),
                    board_flight.duration_minutes,
                ));
            }
        }
        FlightKind::Arrival => {
            if let Some(arrival) = flight.arrival_time {
                lines.push(format!("Arrives {}", format_time(arrival.time(), time_format)));
            }
        }
        FlightKind::Departure => {
            if let Some(departure) = flight.departure_time {
                lines.push(format!(
                    "Departs {}",
                    format_time(departure.time(), time_format)
                ));
            }
        }
    }

    lines.push(format!("Status: {}", flight.status.label()));

    if !flight.services.is_empty() {
        let tags: Vec<_> = flight.services.iter().map(|s| s.label()).collect();
        lines.push(format!("Services: {}", tags.join(", ")));
    }

    if let Some(contact) = flight.contact.as_deref() {
        if !contact.is_empty() {
            lines.push(format!("Contact: {}", contact));
        }
    }

    lines.join("\n")
}
