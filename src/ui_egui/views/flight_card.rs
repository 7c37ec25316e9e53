//! Positioned flight card rendering.
//!
//! Draws one projected block, its link accent and grab handles, and routes
//! pointer input on it: click-to-edit, context menu, drag start and
//! resize start.

use egui::{Color32, CursorIcon, Id, Pos2, Rect, RichText, Sense, Stroke, Vec2};

use crate::services::schedule::{BoardFlight, FlightKind};
use crate::ui_egui::interaction::Interaction;
use crate::ui_egui::resize::{draw_handles, HandleRects};
use crate::utils::date::format_time;

use super::palette::{link_color, status_color};
use super::{format_flight_tooltip, BoardInteractionResult, DeleteConfirmRequest};

const CARD_MARGIN_X: f32 = 3.0;
const LINK_STRIPE_WIDTH: f32 = 4.0;

fn kind_glyph(kind: FlightKind) -> &'static str {
    match kind {
        FlightKind::Arrival => "▼",
        FlightKind::Departure => "▲",
        FlightKind::Turnaround => "⟳",
    }
}

/// Render one card at its computed rect.
pub fn render_flight_card(
    ui: &mut egui::Ui,
    card_rect: Rect,
    board_flight: &BoardFlight,
    interaction: &mut Interaction,
    time_format: &str,
    text_color: Color32,
) -> BoardInteractionResult {
    let mut result = BoardInteractionResult::default();
    let flight = &board_flight.flight;

    let fill = status_color(flight.status);
    let being_manipulated = flight.id.is_some() && interaction.active_flight_id() == flight.id;

    // Ghost the card in place while its tentative position is dragged.
    let fill = if being_manipulated {
        Color32::from_rgba_unmultiplied(fill.r(), fill.g(), fill.b(), 110)
    } else {
        fill
    };

    let painter = ui.painter();
    painter.rect_filled(card_rect, egui::Rounding::same(4.0), fill);

    if let Some(slot) = board_flight.link_slot {
        let stripe = Rect::from_min_size(
            card_rect.min,
            Vec2::new(LINK_STRIPE_WIDTH, card_rect.height()),
        );
        painter.rect_filled(
            stripe,
            egui::Rounding {
                nw: 4.0,
                sw: 4.0,
                ..Default::default()
            },
            link_color(slot),
        );
        painter.rect_stroke(
            card_rect,
            egui::Rounding::same(4.0),
            Stroke::new(1.5, link_color(slot)),
        );
    }

    // Label: glyph, tail number, and the anchor time when the card is
    // tall enough for a second line.
    let label_pos = Pos2::new(
        card_rect.left() + LINK_STRIPE_WIDTH + 4.0,
        card_rect.top() + 3.0,
    );
    painter.text(
        label_pos,
        egui::Align2::LEFT_TOP,
        format!("{} {}", kind_glyph(board_flight.kind), flight.tail_number),
        egui::FontId::proportional(12.0),
        text_color,
    );
    if card_rect.height() >= 44.0 {
        let time_label = match board_flight.kind {
            FlightKind::Arrival => flight.arrival_time,
            _ => flight.departure_time.or(flight.arrival_time),
        }
        .map(|dt| format_time(dt.time(), time_format))
        .unwrap_or_default();
        painter.text(
            label_pos + Vec2::new(0.0, 16.0),
            egui::Align2::LEFT_TOP,
            time_label,
            egui::FontId::proportional(10.0),
            text_color.gamma_multiply(0.85),
        );
    }

    let id = Id::new(("flight-card", flight.id));
    let response = ui.interact(card_rect, id, Sense::click_and_drag());

    // Resize handles only make sense on a stored turnaround.
    let can_resize = board_flight.kind == FlightKind::Turnaround && flight.id.is_some();
    let pointer_pos = response
        .interact_pointer_pos()
        .or_else(|| ui.input(|i| i.pointer.hover_pos()));
    let handles = HandleRects::for_card(card_rect);
    let hovered_edge = if can_resize && interaction.is_idle() {
        pointer_pos
            .filter(|pos| card_rect.contains(*pos))
            .and_then(|pos| handles.hit_test(pos))
    } else {
        None
    };

    if response.hovered() && interaction.is_idle() {
        if can_resize {
            draw_handles(ui, &handles, hovered_edge, status_color(flight.status));
        }
        match hovered_edge {
            Some(edge) => ui.output_mut(|out| out.cursor_icon = edge.cursor_icon()),
            None => ui.output_mut(|out| out.cursor_icon = CursorIcon::PointingHand),
        }
        response
            .clone()
            .on_hover_text(format_flight_tooltip(board_flight, time_format));
    }

    response.context_menu(|ui| {
        ui.set_min_width(160.0);
        ui.label(RichText::new(&flight.tail_number).strong());
        ui.separator();

        if ui.button("✏ Edit").clicked() {
            result.flight_to_edit = Some(flight.clone());
            ui.close_menu();
        }

        ui.menu_button("Set status", |ui| {
            for status in crate::models::flight::FlightStatus::ALL {
                let selected = flight.status == status;
                if ui.selectable_label(selected, status.label()).clicked() {
                    if let Some(id) = flight.id {
                        if !selected {
                            result.status_changes.push((id, status));
                        }
                    }
                    ui.close_menu();
                }
            }
        });

        if ui.button("🗑 Delete").clicked() {
            if let Some(id) = flight.id {
                result.delete_confirm_request = Some(DeleteConfirmRequest {
                    flight_id: id,
                    tail_number: flight.tail_number.clone(),
                });
            }
            ui.close_menu();
        }
    });

    if response.double_clicked() {
        result.flight_to_edit = Some(flight.clone());
    }

    if response.drag_started() {
        let started = match response
            .interact_pointer_pos()
            .filter(|_| can_resize)
            .and_then(|pos| handles.hit_test(pos))
        {
            Some(edge) => interaction.begin_resize(flight, edge),
            None => interaction.begin_drag(flight),
        };
        if started {
            ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
        }
    }

    result
}

/// Card rect within a day column, inset from the column edges.
pub fn card_rect(column_rect: Rect, y: f32, height: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(column_rect.left() + CARD_MARGIN_X, column_rect.top() + y),
        Vec2::new(
            (column_rect.width() - 2.0 * CARD_MARGIN_X).max(0.0),
            height.max(6.0),
        ),
    )
}
