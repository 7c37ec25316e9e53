use egui::Color32;

use crate::models::flight::FlightStatus;
use crate::services::schedule::LINK_PALETTE_SIZE;
use crate::ui_egui::theme::BoardTheme;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Colors for the time grid cells and lines, derived from the theme.
#[derive(Clone, Copy)]
pub(crate) struct TimeGridPalette {
    pub hour_bg: Color32,
    pub regular_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub divider: Color32,
    pub hover_overlay: Color32,
}

impl TimeGridPalette {
    pub fn from_theme(theme: &BoardTheme) -> Self {
        let divider = with_alpha(theme.day_border, 220);
        Self {
            hour_bg: blend(theme.board_background, theme.day_background, 0.4),
            regular_bg: theme.day_background,
            weekend_bg: theme.weekend_background,
            today_bg: theme.today_background,
            hour_line: theme.day_border,
            slot_line: with_alpha(theme.day_border, 170),
            divider,
            hover_overlay: with_alpha(theme.today_border, if theme.is_dark { 80 } else { 50 }),
        }
    }
}

/// Colors for the week header strip.
#[derive(Clone, Copy)]
pub(crate) struct DayStripPalette {
    pub strip_bg: Color32,
    pub strip_border: Color32,
    pub accent_line: Color32,
    pub cell_bg: Color32,
    pub today_cell_bg: Color32,
    pub text: Color32,
    pub date_text: Color32,
}

impl DayStripPalette {
    pub fn from_theme(theme: &BoardTheme) -> Self {
        Self {
            strip_bg: blend(theme.app_background, theme.board_background, 0.5),
            strip_border: theme.day_border,
            accent_line: theme.today_border,
            cell_bg: theme.day_background,
            today_cell_bg: theme.today_background,
            text: theme.text_primary,
            date_text: theme.text_secondary,
        }
    }
}

/// Card fill color for a status.
pub fn status_color(status: FlightStatus) -> Color32 {
    match status {
        FlightStatus::Scheduled => Color32::from_rgb(100, 150, 200),
        FlightStatus::EnRoute => Color32::from_rgb(90, 130, 220),
        FlightStatus::Arrived => Color32::from_rgb(95, 170, 110),
        FlightStatus::Departed => Color32::from_rgb(130, 130, 140),
        FlightStatus::Delayed => Color32::from_rgb(215, 160, 70),
        FlightStatus::Cancelled => Color32::from_rgb(190, 85, 85),
    }
}

/// Fixed rotating palette for link-group accents.
const LINK_PALETTE: [Color32; LINK_PALETTE_SIZE] = [
    Color32::from_rgb(66, 165, 245),
    Color32::from_rgb(171, 71, 188),
    Color32::from_rgb(38, 166, 154),
    Color32::from_rgb(255, 167, 38),
    Color32::from_rgb(236, 100, 120),
    Color32::from_rgb(141, 110, 199),
    Color32::from_rgb(120, 190, 80),
    Color32::from_rgb(0, 172, 193),
];

/// Accent color for a link-group palette slot.
pub fn link_color(slot: usize) -> Color32 {
    LINK_PALETTE[slot % LINK_PALETTE.len()]
}
