// Flightboard egui application
//
// Owns the working set, the filter, the week window and the single
// interaction slot, and orchestrates panels, dialogs and store refreshes.

use chrono::{Duration, Local};
use egui::RichText;

use crate::models::flight::{Flight, FlightStatus, ServiceTag};
use crate::models::settings::BoardSettings;
use crate::services::database::Database;
use crate::services::flight::FlightService;
use crate::services::schedule::{
    project_week, FlightFilter, StatusFilter, TimeGridLayout, WeekWindow,
};
use crate::services::settings::SettingsService;
use crate::utils::date::{format_week_range, start_of_day};

use super::flight_dialog::{render_flight_dialog, FlightDialogResult, FlightDialogState};
use super::interaction::Interaction;
use super::theme::BoardTheme;
use super::views::week_board::WeekBoard;
use super::views::{BoardInteractionResult, DeleteConfirmRequest, SlotHover};

pub struct FlightBoardApp {
    database: &'static Database,
    settings: BoardSettings,
    theme: BoardTheme,
    layout: TimeGridLayout,
    week: WeekWindow,
    filter: FlightFilter,
    interaction: Interaction,
    slot_hover: SlotHover,
    /// Working set for the visible window, refreshed from the store.
    flights: Vec<Flight>,
    needs_refresh: bool,
    flight_dialog: Option<FlightDialogState>,
    delete_confirm: Option<DeleteConfirmRequest>,
    last_error: Option<String>,
}

impl FlightBoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, database: &'static Database) -> Self {
        let settings = load_settings_or_default(&SettingsService::new(database));
        let theme = BoardTheme::from_preference(&settings.theme);
        theme.apply(&cc.egui_ctx);
        let layout = TimeGridLayout::new(settings.day_start_hour, settings.day_end_hour);

        Self {
            database,
            settings,
            theme,
            layout,
            week: WeekWindow::new(),
            filter: FlightFilter::default(),
            interaction: Interaction::default(),
            slot_hover: SlotHover::default(),
            flights: Vec::new(),
            needs_refresh: true,
            flight_dialog: None,
            delete_confirm: None,
            last_error: None,
        }
    }

    fn refresh_flights(&mut self) {
        let today = Local::now().date_naive();
        let dates = self.week.dates(today, self.settings.first_day_of_week);
        let service = FlightService::new(self.database.connection());

        let window = start_of_day(dates[0])
            .zip(start_of_day(dates[6] + Duration::days(1)));
        let result = match window {
            Some((start, end)) => service.find_by_date_range(start, end),
            // A week straddling a nonexistent local midnight; fall back to
            // the full set rather than show an empty board.
            None => service.list_all(),
        };

        match result {
            Ok(flights) => {
                self.flights = flights;
                self.needs_refresh = false;
            }
            Err(err) => {
                log::error!("Failed to load flights: {}", err);
                self.last_error = Some(err.to_string());
                self.needs_refresh = false;
            }
        }
    }

    fn handle_board_result(&mut self, result: BoardInteractionResult) {
        if let Some(flight) = result.flight_to_edit {
            self.flight_dialog = Some(FlightDialogState::edit(&flight));
        }

        if !result.rescheduled.is_empty() {
            self.needs_refresh = true;
        }

        for (flight_id, status) in result.status_changes {
            self.set_flight_status(flight_id, status);
        }

        if let Some(request) = result.delete_confirm_request {
            self.delete_confirm = Some(request);
        }

        if let Some((date, time)) = result.quick_create {
            if self.flight_dialog.is_none() {
                self.flight_dialog = Some(FlightDialogState::new_at(date, time));
            }
        }

        if let Some(error) = result.store_error {
            self.last_error = Some(error);
            self.needs_refresh = true;
        }
    }

    fn set_flight_status(&mut self, flight_id: i64, status: FlightStatus) {
        let service = FlightService::new(self.database.connection());
        let outcome = service.get(flight_id).and_then(|found| match found {
            Some(mut flight) => {
                flight.status = status;
                service.update(&flight)
            }
            None => Ok(()),
        });

        match outcome {
            Ok(()) => self.needs_refresh = true,
            Err(err) => {
                log::error!("Failed to update status of flight {}: {}", flight_id, err);
                self.last_error = Some(err.to_string());
            }
        }
    }

    fn save_dialog_flight(&mut self, flight: Flight) {
        let service = FlightService::new(self.database.connection());
        let outcome = if flight.id.is_some() {
            service.update(&flight)
        } else {
            service.create(flight.clone()).map(|_| ())
        };

        match outcome {
            Ok(()) => {
                self.flight_dialog = None;
                self.needs_refresh = true;
                self.last_error = None;
            }
            Err(err) => {
                log::error!("Failed to save flight: {}", err);
                if let Some(dialog) = self.flight_dialog.as_mut() {
                    dialog.set_error(err.to_string());
                }
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.settings.theme = if self.theme.is_dark {
            "light".to_string()
        } else {
            "dark".to_string()
        };
        self.theme = BoardTheme::from_preference(&self.settings.theme);

        let settings_service = SettingsService::new(self.database);
        if let Err(err) = settings_service.update(&self.settings) {
            log::warn!("Failed to persist theme preference: {}", err);
        }
    }

    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.week.at_first(), egui::Button::new("◀"))
                    .clicked()
                {
                    self.week.previous();
                    self.needs_refresh = true;
                }
                if ui.button("Today").clicked() {
                    self.week.reset();
                    self.needs_refresh = true;
                }
                if ui
                    .add_enabled(!self.week.at_last(), egui::Button::new("▶"))
                    .clicked()
                {
                    self.week.next();
                    self.needs_refresh = true;
                }

                let today = Local::now().date_naive();
                let week_start = self.week.start_date(today, self.settings.first_day_of_week);
                ui.label(RichText::new(format_week_range(week_start)).strong());

                ui.separator();

                if ui.button("✈ New Flight").clicked() && self.flight_dialog.is_none() {
                    let noon = chrono::NaiveTime::from_hms_opt(12, 0, 0)
                        .unwrap_or(chrono::NaiveTime::MIN);
                    self.flight_dialog = Some(FlightDialogState::new_at(week_start, noon));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_icon = if self.theme.is_dark { "☀" } else { "🌙" };
                    if ui.button(theme_icon).clicked() {
                        self.toggle_theme();
                        self.theme.apply(ctx);
                    }
                });
            });

            ui.add_space(4.0);
            self.render_filter_row(ui);
            ui.add_space(4.0);
        });
    }

    fn render_filter_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Search");
            ui.add(
                egui::TextEdit::singleline(&mut self.filter.search)
                    .desired_width(160.0)
                    .hint_text("tail, type, route, contact"),
            );

            ui.separator();

            let status_label = match self.filter.status {
                StatusFilter::All => "All statuses",
                StatusFilter::Only(status) => status.label(),
            };
            egui::ComboBox::from_id_source("status_filter")
                .selected_text(status_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.filter.status, StatusFilter::All, "All statuses");
                    for status in FlightStatus::ALL {
                        ui.selectable_value(
                            &mut self.filter.status,
                            StatusFilter::Only(status),
                            status.label(),
                        );
                    }
                });

            ui.separator();

            for tag in ServiceTag::ALL {
                let mut required = self.filter.services.contains(&tag);
                if ui.toggle_value(&mut required, tag.label()).clicked() {
                    if required {
                        self.filter.services.push(tag);
                    } else {
                        self.filter.services.retain(|t| *t != tag);
                    }
                }
            }

            if !self.filter.is_empty() && ui.button("Clear").clicked() {
                self.filter = FlightFilter::default();
            }
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context, shown: usize) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} of {} flights this week",
                    shown,
                    self.flights.len()
                ));
                if self.interaction.is_active() {
                    ui.separator();
                    ui.label("Rescheduling…");
                }
                if let Some(error) = &self.last_error {
                    ui.separator();
                    ui.colored_label(
                        egui::Color32::from_rgb(200, 80, 80),
                        format!("⚠ {}", error),
                    );
                    if ui.small_button("✖").clicked() {
                        self.last_error = None;
                    }
                }
            });
        });
    }

    fn render_delete_confirm(&mut self, ctx: &egui::Context) {
        let Some(request) = self.delete_confirm.clone() else {
            return;
        };

        let mut open = true;
        let mut decided = false;
        egui::Window::new("Delete Flight")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Delete the {} movement? This cannot be undone.",
                    request.tail_number
                ));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        let service = FlightService::new(self.database.connection());
                        if let Err(err) = service.delete(request.flight_id) {
                            log::error!("Failed to delete flight {}: {}", request.flight_id, err);
                            self.last_error = Some(err.to_string());
                        }
                        self.needs_refresh = true;
                        decided = true;
                    }
                    if ui.button("Cancel").clicked() {
                        decided = true;
                    }
                });
            });

        if decided || !open {
            self.delete_confirm = None;
        }
    }

    fn render_flight_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.flight_dialog.take() else {
            return;
        };

        match render_flight_dialog(ctx, &mut dialog) {
            FlightDialogResult::Open => self.flight_dialog = Some(dialog),
            FlightDialogResult::Cancelled => {}
            FlightDialogResult::Saved(flight) => {
                self.flight_dialog = Some(dialog);
                self.save_dialog_flight(flight);
            }
        }
    }
}

impl eframe::App for FlightBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.needs_refresh {
            self.refresh_flights();
        }

        self.render_top_panel(ctx);

        let today = Local::now().date_naive();
        let dates = self.week.dates(today, self.settings.first_day_of_week);
        let board = project_week(&self.flights, &self.filter, &dates, &self.layout);
        let shown = board.len();

        self.render_status_bar(ctx, shown);

        let mut board_result = BoardInteractionResult::default();
        egui::CentralPanel::default().show(ctx, |ui| {
            board_result = WeekBoard::show(
                ui,
                &dates,
                &board,
                &self.layout,
                &self.theme,
                &self.settings.time_format,
                self.database,
                &mut self.interaction,
                &mut self.slot_hover,
            );
        });
        self.handle_board_result(board_result);

        self.render_delete_confirm(ctx);
        self.render_flight_dialog(ctx);
    }
}

fn load_settings_or_default(settings_service: &SettingsService) -> BoardSettings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {}, using defaults", e);
            BoardSettings::default()
        }
    }
}
