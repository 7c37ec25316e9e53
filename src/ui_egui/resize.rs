// Card resize system
//
// Adjusts a turnaround's ground time by dragging the block's top or bottom
// edge. Only turnarounds resize: duration is derived from the two
// timestamps, and single-timestamp flights have nothing to stretch.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};
use egui::{Pos2, Rect, Vec2};

use crate::models::flight::Flight;
use crate::services::schedule::classify::MIN_GROUND_MINUTES;
use crate::services::schedule::layout::snap_minutes;

use super::interaction::ScheduleChange;

/// Which edge of the card is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeEdge {
    /// Top edge - moves the arrival, departure stays fixed
    Top,
    /// Bottom edge - moves the departure, arrival stays fixed
    Bottom,
}

impl ResizeEdge {
    pub fn cursor_icon(&self) -> egui::CursorIcon {
        egui::CursorIcon::ResizeVertical
    }
}

/// Visual size of the handle circle
pub const HANDLE_VISUAL_SIZE: f32 = 6.0;

/// State of one in-flight resize.
#[derive(Clone, Debug)]
pub struct ResizeState {
    pub flight_id: i64,
    pub edge: ResizeEdge,
    original_arrival: DateTime<Local>,
    original_departure: DateTime<Local>,
    hovered: Option<(NaiveDate, NaiveTime, NaiveTime)>,
}

impl ResizeState {
    /// Begin a resize; `None` unless the flight is a stored turnaround.
    pub fn from_flight(flight: &Flight, edge: ResizeEdge) -> Option<Self> {
        let flight_id = flight.id?;
        let original_arrival = flight.arrival_time?;
        let original_departure = flight.departure_time?;
        Some(Self {
            flight_id,
            edge,
            original_arrival,
            original_departure,
            hovered: None,
        })
    }

    pub fn update_hover(&mut self, date: NaiveDate, slot_start: NaiveTime, slot_end: NaiveTime) {
        self.hovered = Some((date, slot_start, slot_end));
    }

    /// The edge's tentative time: the hovered slot's end for a bottom
    /// drag, its start for a top drag. Vertical only; the hovered date is
    /// ignored and the original leg's date kept, as edge drags never
    /// change columns.
    pub fn hovered_edge_time(&self) -> Option<NaiveTime> {
        let (_date, slot_start, slot_end) = self.hovered?;
        Some(match self.edge {
            ResizeEdge::Bottom => slot_end,
            ResizeEdge::Top => slot_start,
        })
    }

    /// Resolve the resize into a commit.
    ///
    /// Bottom edge: the arrival is fixed and the departure is rewritten to
    /// the snapped, floored new duration. Top edge: the departure (bottom
    /// edge of the block) is fixed and the arrival is recomputed from the
    /// new duration. `None` if nothing changed.
    pub fn resized(&self) -> Option<ScheduleChange> {
        let edge_time = self.hovered_edge_time()?;

        let (arrival, departure) = match self.edge {
            ResizeEdge::Bottom => {
                let candidate = local_datetime(self.original_departure.date_naive(), edge_time)?;
                let minutes = clamp_duration((candidate - self.original_arrival).num_minutes());
                (
                    self.original_arrival,
                    self.original_arrival + Duration::minutes(minutes),
                )
            }
            ResizeEdge::Top => {
                let candidate = local_datetime(self.original_arrival.date_naive(), edge_time)?;
                let minutes = clamp_duration((self.original_departure - candidate).num_minutes());
                (
                    self.original_departure - Duration::minutes(minutes),
                    self.original_departure,
                )
            }
        };

        if arrival == self.original_arrival && departure == self.original_departure {
            return None;
        }

        Some(ScheduleChange {
            flight_id: self.flight_id,
            arrival_time: Some(arrival),
            departure_time: Some(departure),
        })
    }
}

fn clamp_duration(minutes: i64) -> i64 {
    snap_minutes(minutes).max(MIN_GROUND_MINUTES)
}

fn local_datetime(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    use chrono::TimeZone;
    Local
        .from_local_datetime(&date.and_time(time))
        .single()
}

/// Grab-zone rectangles along a card's horizontal edges.
pub struct HandleRects {
    pub top: Rect,
    pub bottom: Rect,
}

impl HandleRects {
    pub fn for_card(card_rect: Rect) -> Self {
        let card_height = card_rect.height();

        // Small cards split into halves; larger ones get fixed edge zones.
        let zone_height = if card_height < 50.0 {
            card_height / 2.0
        } else {
            20.0
        };

        Self {
            top: Rect::from_min_size(
                Pos2::new(card_rect.left(), card_rect.top()),
                Vec2::new(card_rect.width(), zone_height),
            ),
            bottom: Rect::from_min_size(
                Pos2::new(card_rect.left(), card_rect.bottom() - zone_height),
                Vec2::new(card_rect.width(), zone_height),
            ),
        }
    }

    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeEdge> {
        if self.top.contains(pos) {
            Some(ResizeEdge::Top)
        } else if self.bottom.contains(pos) {
            Some(ResizeEdge::Bottom)
        } else {
            None
        }
    }
}

/// Draw the grab handles on a hovered card.
pub fn draw_handles(
    ui: &mut egui::Ui,
    handles: &HandleRects,
    hovered_edge: Option<ResizeEdge>,
    color: egui::Color32,
) {
    let draw_handle = |rect: Rect, edge: ResizeEdge, is_hovered: bool| {
        let center = match edge {
            ResizeEdge::Top => {
                Pos2::new(rect.center().x, rect.top() + HANDLE_VISUAL_SIZE / 2.0 + 2.0)
            }
            ResizeEdge::Bottom => {
                Pos2::new(rect.center().x, rect.bottom() - HANDLE_VISUAL_SIZE / 2.0 - 2.0)
            }
        };

        let radius = if is_hovered {
            HANDLE_VISUAL_SIZE / 2.0 + 1.0
        } else {
            HANDLE_VISUAL_SIZE / 2.0
        };

        ui.painter().circle_filled(
            center,
            radius,
            if is_hovered {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgba_unmultiplied(
                    color.r().saturating_add(60),
                    color.g().saturating_add(60),
                    color.b().saturating_add(60),
                    color.a(),
                )
            },
        );
        ui.painter().circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, color.linear_multiply(0.6)),
        );
    };

    draw_handle(
        handles.top,
        ResizeEdge::Top,
        hovered_edge == Some(ResizeEdge::Top),
    );
    draw_handle(
        handles.bottom,
        ResizeEdge::Bottom,
        hovered_edge == Some(ResizeEdge::Bottom),
    );
}
