//! Single 15-minute slot rendering for the week grid.
//!
//! Paints the cell background and grid lines, tracks hover for the active
//! drag/resize machine, shows the drop-target highlight, and hosts the
//! hover-revealed quick-create affordance.

use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use egui::{Color32, CursorIcon, Pos2, Rect, Sense, Stroke, Vec2};

use crate::services::schedule::layout::SLOT_HEIGHT;
use crate::ui_egui::interaction::Interaction;

use super::palette::TimeGridPalette;
use super::{BoardInteractionResult, SlotHover};

/// Per-cell output: the allocated rect feeds the card overlay pass, the
/// hovered flag feeds the shared quick-create timer.
pub struct SlotCellOutput {
    pub rect: Rect,
    pub hovered: bool,
    pub result: BoardInteractionResult,
}

#[allow(clippy::too_many_arguments)]
pub fn render_slot_cell(
    ui: &mut egui::Ui,
    col_width: f32,
    date: NaiveDate,
    slot_start: NaiveTime,
    slot_end: NaiveTime,
    is_hour_start: bool,
    palette: &TimeGridPalette,
    interaction: &mut Interaction,
    slot_hover: &mut SlotHover,
) -> SlotCellOutput {
    let mut result = BoardInteractionResult::default();
    let today = Local::now().date_naive();
    let is_today = date == today;
    let is_weekend = matches!(date.weekday().num_days_from_sunday(), 0 | 6);

    let desired_size = Vec2::new(col_width, SLOT_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

    let bg_color = if is_today {
        palette.today_bg
    } else if is_weekend {
        palette.weekend_bg
    } else {
        palette.regular_bg
    };
    ui.painter().rect_filled(rect, 0.0, bg_color);

    // Horizontal grid line
    let line_color = if is_hour_start {
        palette.hour_line
    } else {
        palette.slot_line
    };
    ui.painter().line_segment(
        [
            Pos2::new(rect.left(), rect.top()),
            Pos2::new(rect.right(), rect.top()),
        ],
        Stroke::new(1.0, line_color),
    );

    // Vertical grid line
    ui.painter().line_segment(
        [
            Pos2::new(rect.right(), rect.top()),
            Pos2::new(rect.right(), rect.bottom()),
        ],
        Stroke::new(1.0, palette.divider),
    );

    let hovered = response.hovered();

    // Quick-create: dwell on the slot to reveal, click to create.
    if hovered && interaction.is_idle() {
        ui.painter().rect_filled(rect, 0.0, palette.hover_overlay);

        let now = ui.input(|i| i.time);
        if slot_hover.observe(Some((date, slot_start)), now) {
            let badge = Rect::from_center_size(rect.center(), Vec2::splat(18.0));
            ui.painter()
                .rect_filled(badge, egui::Rounding::same(4.0), palette.hover_overlay);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "+",
                egui::FontId::proportional(14.0),
                Color32::WHITE,
            );
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            if response.clicked() {
                result.quick_create = Some((date, slot_start));
            }
        } else {
            // Timer still running; repaint so the reveal is not missed.
            ui.ctx().request_repaint();
        }
    }

    // Double-click creates without waiting for the reveal.
    if response.double_clicked() && interaction.is_idle() {
        result.quick_create = Some((date, slot_start));
    }

    // Hover tracking for the active machine.
    let pointer_for_hover = ui
        .ctx()
        .pointer_interact_pos()
        .or_else(|| ui.input(|i| i.pointer.hover_pos()));
    if let Some(pointer) = pointer_for_hover {
        if rect.contains(pointer) && interaction.is_active() {
            interaction.update_hover(date, slot_start, slot_end);
            if interaction.drag().is_some() {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
            } else if let Some(resize) = interaction.resize() {
                ui.output_mut(|out| out.cursor_icon = resize.edge.cursor_icon());
            }
            ui.ctx().request_repaint();
        }
    }

    // Drop-target highlight under an active drag.
    if let Some(drag) = interaction.drag() {
        if drag.is_hovering(date, slot_start) {
            let highlight = rect.shrink2(Vec2::new(3.0, 2.0));
            ui.painter().rect_filled(
                highlight,
                2.0,
                Color32::from_rgba_unmultiplied(120, 200, 120, 35),
            );
            ui.painter().rect_stroke(
                highlight,
                2.0,
                Stroke::new(1.5, Color32::from_rgb(120, 200, 120)),
            );
        }
    }

    SlotCellOutput {
        rect,
        hovered,
        result,
    }
}
