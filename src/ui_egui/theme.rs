//! Theme module for the egui board
//!
//! Defines the BoardTheme structure and the resolution of the persisted
//! theme preference ("system" consults the OS via dark-light).

use egui::Color32;

/// A board theme defining all colors used in the application
#[derive(Debug, Clone)]
pub struct BoardTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Board grid background color
    pub board_background: Color32,

    /// Weekend column background color
    pub weekend_background: Color32,

    /// Today's column background color
    pub today_background: Color32,

    /// Today's column border / accent color
    pub today_border: Color32,

    /// Regular column background color
    pub day_background: Color32,

    /// Grid line color
    pub day_border: Color32,

    /// Primary text color (headings, tail numbers)
    pub text_primary: Color32,

    /// Secondary text color (times, routes)
    pub text_secondary: Color32,
}

impl BoardTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            board_background: Color32::from_rgb(255, 255, 255),
            weekend_background: Color32::from_rgb(250, 250, 252),
            today_background: Color32::from_rgb(230, 240, 255),
            today_border: Color32::from_rgb(100, 150, 255),
            day_background: Color32::from_rgb(255, 255, 255),
            day_border: Color32::from_rgb(220, 220, 220),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            board_background: Color32::from_rgb(40, 40, 40),
            weekend_background: Color32::from_rgb(35, 35, 38),
            today_background: Color32::from_rgb(50, 60, 80),
            today_border: Color32::from_rgb(100, 150, 255),
            day_background: Color32::from_rgb(40, 40, 40),
            day_border: Color32::from_rgb(60, 60, 60),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    /// Resolve the persisted theme preference into a theme.
    pub fn from_preference(preference: &str) -> Self {
        match preference {
            "light" => Self::light(),
            "dark" => Self::dark(),
            _ => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light | dark_light::Mode::Default => Self::light(),
            },
        }
    }

    /// Apply the theme's base visuals to the egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.panel_fill = self.app_background;
        visuals.window_fill = self.board_background;
        ctx.set_visuals(visuals);
    }
}
