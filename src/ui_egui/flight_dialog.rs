// Flight create/edit dialog
//
// Form state is plain strings plus toggles; parsing and validation happen
// on save, with the failure shown inline instead of closing the window.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use egui::{Color32, RichText};

use crate::models::flight::{Flight, FlightStatus, ServiceTag};

#[derive(Clone)]
pub struct FlightDialogState {
    editing_id: Option<i64>,
    created_at: Option<DateTime<Local>>,
    tail_number: String,
    aircraft_type: String,
    origin: String,
    destination: String,
    contact: String,
    has_arrival: bool,
    arrival_date: NaiveDate,
    arrival_time: String,
    has_departure: bool,
    departure_date: NaiveDate,
    departure_time: String,
    status: FlightStatus,
    services: Vec<ServiceTag>,
    notes: String,
    error: Option<String>,
}

/// Outcome of rendering the dialog for one frame.
pub enum FlightDialogResult {
    Open,
    Saved(Flight),
    Cancelled,
}

impl FlightDialogState {
    /// Blank form for a new departure at the given slot.
    pub fn new_at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            editing_id: None,
            created_at: None,
            tail_number: String::new(),
            aircraft_type: String::new(),
            origin: String::new(),
            destination: String::new(),
            contact: String::new(),
            has_arrival: false,
            arrival_date: date,
            arrival_time: time.format("%H:%M").to_string(),
            has_departure: true,
            departure_date: date,
            departure_time: time.format("%H:%M").to_string(),
            status: FlightStatus::Scheduled,
            services: Vec::new(),
            notes: String::new(),
            error: None,
        }
    }

    /// Form pre-filled from an existing record.
    pub fn edit(flight: &Flight) -> Self {
        let today = Local::now().date_naive();
        let fallback = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        Self {
            editing_id: flight.id,
            created_at: flight.created_at,
            tail_number: flight.tail_number.clone(),
            aircraft_type: flight.aircraft_type.clone().unwrap_or_default(),
            origin: flight.origin.clone().unwrap_or_default(),
            destination: flight.destination.clone().unwrap_or_default(),
            contact: flight.contact.clone().unwrap_or_default(),
            has_arrival: flight.arrival_time.is_some(),
            arrival_date: flight
                .arrival_time
                .map(|dt| dt.date_naive())
                .unwrap_or(today),
            arrival_time: flight
                .arrival_time
                .map(|dt| dt.time())
                .unwrap_or(fallback)
                .format("%H:%M")
                .to_string(),
            has_departure: flight.departure_time.is_some(),
            departure_date: flight
                .departure_time
                .map(|dt| dt.date_naive())
                .unwrap_or(today),
            departure_time: flight
                .departure_time
                .map(|dt| dt.time())
                .unwrap_or(fallback)
                .format("%H:%M")
                .to_string(),
            status: flight.status,
            services: flight.services.clone(),
            notes: flight.notes.clone().unwrap_or_default(),
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Surface a store failure inline instead of closing the form.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Parse the form into a storable record.
    fn to_flight(&self) -> Result<Flight, String> {
        let arrival_time = if self.has_arrival {
            Some(parse_local(self.arrival_date, &self.arrival_time, "arrival")?)
        } else {
            None
        };
        let departure_time = if self.has_departure {
            Some(parse_local(
                self.departure_date,
                &self.departure_time,
                "departure",
            )?)
        } else {
            None
        };

        let mut flight = Flight {
            id: self.editing_id,
            tail_number: self.tail_number.trim().to_string(),
            aircraft_type: non_empty(&self.aircraft_type),
            arrival_time,
            departure_time,
            origin: non_empty(&self.origin),
            destination: non_empty(&self.destination),
            contact: non_empty(&self.contact),
            status: self.status,
            services: self.services.clone(),
            notes: non_empty(&self.notes),
            created_at: self.created_at,
            updated_at: None,
        };
        flight.validate().map_err(|e| e.to_string())?;
        flight.tail_number = flight.tail_number.to_uppercase();
        Ok(flight)
    }

    fn toggle_service(&mut self, tag: ServiceTag) {
        if let Some(pos) = self.services.iter().position(|s| *s == tag) {
            self.services.remove(pos);
        } else {
            self.services.push(tag);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_local(date: NaiveDate, time: &str, which: &str) -> Result<DateTime<Local>, String> {
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| format!("Enter the {} time as HH:MM", which))?;
    Local
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| format!("The {} time is ambiguous on that date", which))
}

/// Render the dialog window. Returns what the app should do with it.
pub fn render_flight_dialog(
    ctx: &egui::Context,
    state: &mut FlightDialogState,
) -> FlightDialogResult {
    let mut result = FlightDialogResult::Open;
    let mut open = true;

    let title = if state.is_editing() {
        "Edit Flight"
    } else {
        "New Flight"
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Grid::new("flight_form")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Tail number");
                    ui.text_edit_singleline(&mut state.tail_number);
                    ui.end_row();

                    ui.label("Aircraft type");
                    ui.text_edit_singleline(&mut state.aircraft_type);
                    ui.end_row();

                    ui.label("Origin");
                    ui.text_edit_singleline(&mut state.origin);
                    ui.end_row();

                    ui.label("Destination");
                    ui.text_edit_singleline(&mut state.destination);
                    ui.end_row();

                    ui.label("Contact");
                    ui.text_edit_singleline(&mut state.contact);
                    ui.end_row();

                    ui.label("Status");
                    egui::ComboBox::from_id_source("flight_status")
                        .selected_text(state.status.label())
                        .show_ui(ui, |ui| {
                            for status in FlightStatus::ALL {
                                ui.selectable_value(&mut state.status, status, status.label());
                            }
                        });
                    ui.end_row();
                });

            ui.separator();

            ui.checkbox(&mut state.has_arrival, "Arrival");
            if state.has_arrival {
                ui.horizontal(|ui| {
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut state.arrival_date)
                            .id_source("arrival_date"),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut state.arrival_time)
                            .desired_width(60.0)
                            .hint_text("HH:MM"),
                    );
                });
            }

            ui.checkbox(&mut state.has_departure, "Departure");
            if state.has_departure {
                ui.horizontal(|ui| {
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut state.departure_date)
                            .id_source("departure_date"),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut state.departure_time)
                            .desired_width(60.0)
                            .hint_text("HH:MM"),
                    );
                });
            }

            ui.separator();

            ui.label("Services");
            ui.horizontal_wrapped(|ui| {
                for tag in ServiceTag::ALL {
                    let mut selected = state.services.contains(&tag);
                    if ui.toggle_value(&mut selected, tag.label()).clicked() {
                        state.toggle_service(tag);
                    }
                }
            });

            ui.label("Notes");
            ui.text_edit_multiline(&mut state.notes);

            if let Some(error) = &state.error {
                ui.colored_label(Color32::from_rgb(200, 80, 80), RichText::new(error));
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    match state.to_flight() {
                        Ok(flight) => result = FlightDialogResult::Saved(flight),
                        Err(message) => state.error = Some(message),
                    }
                }
                if ui.button("Cancel").clicked() {
                    result = FlightDialogResult::Cancelled;
                }
            });
        });

    if !open {
        result = FlightDialogResult::Cancelled;
    }
    result
}
