//! The week scheduling board.
//!
//! Header strip, scrollable hour × day time grid, positioned card overlay,
//! and the single commit funnel that turns a released drag or resize into
//! one store update.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};
use egui::{Color32, Margin, Pos2, Rect, Stroke, Vec2};

use crate::models::flight::Flight;
use crate::services::database::Database;
use crate::services::flight::FlightService;
use crate::services::schedule::layout::{
    COLUMN_SPACING, SLOT_HEIGHT, SLOT_MINUTES, TIME_LABEL_WIDTH,
};
use crate::services::schedule::{BoardFlight, TimeGridLayout};
use crate::ui_egui::interaction::{Interaction, ScheduleChange};
use crate::ui_egui::theme::BoardTheme;

use super::board_cell::render_slot_cell;
use super::flight_card::{card_rect, render_flight_card};
use super::palette::{DayStripPalette, TimeGridPalette};
use super::{BoardInteractionResult, SlotHover};

pub struct WeekBoard;

impl WeekBoard {
    #[allow(clippy::too_many_arguments)]
    pub fn show(
        ui: &mut egui::Ui,
        dates: &[NaiveDate],
        board: &[BoardFlight],
        layout: &TimeGridLayout,
        theme: &BoardTheme,
        time_format: &str,
        database: &'static Database,
        interaction: &mut Interaction,
        slot_hover: &mut SlotHover,
    ) -> BoardInteractionResult {
        let mut result = BoardInteractionResult::default();

        Self::render_header_strip(ui, dates, theme);

        let grid_palette = TimeGridPalette::from_theme(theme);
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let grid_result = Self::render_grid(
                    ui,
                    dates,
                    board,
                    layout,
                    &grid_palette,
                    theme,
                    time_format,
                    interaction,
                    slot_hover,
                );
                result.merge(grid_result);
            });

        // Commit funnel: one release resolves the active machine into at
        // most one store update. A lost pointer (no release seen, button
        // no longer down) cancels instead of leaving the machine stuck.
        let released = ui.input(|i| i.pointer.primary_released());
        let any_down = ui.input(|i| i.pointer.any_down());
        if interaction.is_active() {
            if released {
                if let Some(change) = interaction.finish() {
                    match apply_schedule_change(database, &change) {
                        Ok(flight) => result.rescheduled.push(flight),
                        Err(err) => {
                            log::error!(
                                "Failed to reschedule flight {}: {}",
                                change.flight_id,
                                err
                            );
                            result.store_error = Some(err.to_string());
                        }
                    }
                }
            } else if !any_down {
                log::debug!("Pointer lost during interaction; cancelling");
                interaction.cancel();
            }
        }

        result
    }

    fn render_header_strip(ui: &mut egui::Ui, dates: &[NaiveDate], theme: &BoardTheme) {
        let palette = DayStripPalette::from_theme(theme);
        let today = Local::now().date_naive();

        let header_frame = egui::Frame::none()
            .fill(palette.strip_bg)
            .rounding(egui::Rounding::same(8.0))
            .stroke(Stroke::new(1.0, palette.strip_border))
            .inner_margin(Margin {
                left: 0.0,
                right: 0.0,
                top: 6.0,
                bottom: 6.0,
            });

        header_frame.show(ui, |strip_ui| {
            let available = strip_ui.available_width();
            let col_width = (available - TIME_LABEL_WIDTH - COLUMN_SPACING * 7.0) / 7.0;

            strip_ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;

                ui.allocate_ui_with_layout(
                    Vec2::new(TIME_LABEL_WIDTH, 40.0),
                    egui::Layout::right_to_left(egui::Align::Center),
                    |_ui| {},
                );
                ui.add_space(COLUMN_SPACING);

                for (day_idx, date) in dates.iter().enumerate() {
                    let is_today = *date == today;
                    let cell_bg = if is_today {
                        palette.today_cell_bg
                    } else {
                        palette.cell_bg
                    };
                    let border = if is_today {
                        palette.accent_line
                    } else {
                        palette.strip_border
                    };

                    ui.allocate_ui_with_layout(
                        Vec2::new(col_width, 40.0),
                        egui::Layout::top_down(egui::Align::Center),
                        |cell_ui| {
                            egui::Frame::none()
                                .fill(cell_bg)
                                .rounding(egui::Rounding::same(6.0))
                                .stroke(Stroke::new(1.0, border))
                                .inner_margin(Margin::symmetric(4.0, 2.0))
                                .show(cell_ui, |content_ui| {
                                    content_ui.vertical_centered(|ui| {
                                        ui.label(
                                            egui::RichText::new(date.format("%a").to_string())
                                                .size(12.0)
                                                .color(palette.text)
                                                .strong(),
                                        );
                                        ui.label(
                                            egui::RichText::new(format!(
                                                "{} {}",
                                                date.format("%b"),
                                                date.day()
                                            ))
                                            .size(10.0)
                                            .color(palette.date_text),
                                        );
                                    });
                                });
                        },
                    );

                    if day_idx < dates.len() - 1 {
                        ui.add_space(COLUMN_SPACING);
                    }
                }
            });
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn render_grid(
        ui: &mut egui::Ui,
        dates: &[NaiveDate],
        board: &[BoardFlight],
        layout: &TimeGridLayout,
        palette: &TimeGridPalette,
        theme: &BoardTheme,
        time_format: &str,
        interaction: &mut Interaction,
        slot_hover: &mut SlotHover,
    ) -> BoardInteractionResult {
        let mut result = BoardInteractionResult::default();

        // Remove vertical spacing between slots so time math stays exact.
        ui.spacing_mut().item_spacing.y = 0.0;

        let available = ui.available_width();
        let col_width = (available - TIME_LABEL_WIDTH - COLUMN_SPACING * 7.0) / 7.0;
        let grid_origin = ui.cursor().min;

        let mut any_cell_hovered = false;
        let slots_per_hour = (60 / SLOT_MINUTES) as u32;

        for hour in layout.start_hour..layout.end_hour {
            for slot in 0..slots_per_hour {
                let minute = slot * SLOT_MINUTES as u32;
                let slot_start = NaiveTime::from_hms_opt(hour, minute, 0)
                    .unwrap_or(NaiveTime::MIN);
                let is_hour_start = slot == 0;

                let slot_end = {
                    let total_minutes = hour * 60 + minute + SLOT_MINUTES as u32;
                    if total_minutes >= 24 * 60 {
                        NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
                    } else {
                        NaiveTime::from_hms_opt(total_minutes / 60, total_minutes % 60, 0)
                            .unwrap_or(NaiveTime::MIN)
                    }
                };

                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;

                    // Time label gutter
                    ui.allocate_ui_with_layout(
                        Vec2::new(TIME_LABEL_WIDTH, SLOT_HEIGHT),
                        egui::Layout::right_to_left(egui::Align::Center),
                        |ui| {
                            if is_hour_start {
                                ui.add_space(5.0);
                                ui.label(
                                    egui::RichText::new(format!("{:02}:00", hour))
                                        .size(12.0)
                                        .color(Color32::GRAY),
                                );
                            }
                        },
                    );
                    ui.add_space(COLUMN_SPACING);

                    for (day_idx, date) in dates.iter().enumerate() {
                        let output = render_slot_cell(
                            ui,
                            col_width,
                            *date,
                            slot_start,
                            slot_end,
                            is_hour_start,
                            palette,
                            interaction,
                            slot_hover,
                        );
                        any_cell_hovered |= output.hovered;
                        result.merge(output.result);

                        if day_idx < dates.len() - 1 {
                            ui.add_space(COLUMN_SPACING);
                        }
                    }
                });
            }
        }

        // Leaving the grid entirely cancels a pending quick-create reveal.
        if !any_cell_hovered {
            let now = ui.input(|i| i.time);
            slot_hover.observe(None, now);
        }

        // Card overlay on top of the painted grid.
        for board_flight in board {
            if board_flight.day_index >= dates.len() {
                continue;
            }
            let column_rect = Rect::from_min_size(
                Pos2::new(
                    grid_origin.x + layout.x_for_day(board_flight.day_index, col_width),
                    grid_origin.y,
                ),
                Vec2::new(col_width, layout.grid_height()),
            );
            let rect = card_rect(column_rect, board_flight.y, board_flight.height);
            let card_result = render_flight_card(
                ui,
                rect,
                board_flight,
                interaction,
                time_format,
                Color32::WHITE,
            );
            result.merge(card_result);
        }

        Self::draw_current_time_indicator(ui, dates, layout, grid_origin, col_width, theme);

        result
    }

    /// Draw the current time indicator line across today's column.
    fn draw_current_time_indicator(
        ui: &mut egui::Ui,
        dates: &[NaiveDate],
        layout: &TimeGridLayout,
        grid_origin: Pos2,
        col_width: f32,
        theme: &BoardTheme,
    ) {
        let now = Local::now();
        let now_date = now.date_naive();
        let now_time = now.time();

        if now_time.hour() < layout.start_hour || now_time.hour() >= layout.end_hour {
            return;
        }

        if let Some(day_index) = dates.iter().position(|d| *d == now_date) {
            let y_position = grid_origin.y + layout.y_for_time(now_time);
            let x_start = grid_origin.x + layout.x_for_day(day_index, col_width);
            let x_end = x_start + col_width;

            let painter = ui.painter();
            let line_color = if theme.is_dark {
                Color32::from_rgb(255, 120, 120)
            } else {
                Color32::from_rgb(255, 100, 100)
            };
            let circle_center = Pos2::new(x_start - 4.0, y_position);

            painter.circle_filled(circle_center, 3.0, line_color);
            painter.line_segment(
                [
                    Pos2::new(x_start, y_position),
                    Pos2::new(x_end, y_position),
                ],
                Stroke::new(2.0, line_color),
            );
        }
    }
}

/// Apply one committed interaction to the store: fetch, rewrite, validate,
/// update. Called at most once per release.
fn apply_schedule_change(database: &Database, change: &ScheduleChange) -> Result<Flight> {
    let service = FlightService::new(database.connection());
    let mut flight = service
        .get(change.flight_id)?
        .ok_or_else(|| anyhow!("Flight {} no longer exists", change.flight_id))?;

    change.apply_to(&mut flight);
    flight.validate().map_err(|e| anyhow!(e))?;
    service.update(&flight)?;

    log::info!(
        "Rescheduled flight {} ({})",
        change.flight_id,
        flight.tail_number
    );
    Ok(flight)
}
