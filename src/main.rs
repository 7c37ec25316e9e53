// Flightboard Application
// Main entry point

mod models;
mod services;
mod ui_egui;
mod utils;

use services::database::Database;
use ui_egui::app::FlightBoardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    log::info!("Starting Flightboard");

    let database = initialize_database();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flightboard")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flightboard",
        options,
        Box::new(|cc| Ok(Box::new(FlightBoardApp::new(cc, database)))),
    )
}

fn initialize_database() -> &'static Database {
    #[cfg(debug_assertions)]
    let db_path = "flightboard.db".to_string();

    #[cfg(not(debug_assertions))]
    let db_path = {
        if let Some(proj_dirs) = directories::ProjectDirs::from("org", "Flightboard", "Flightboard") {
            let data_dir = proj_dirs.data_dir();
            std::fs::create_dir_all(data_dir).expect("Failed to create data directory");
            data_dir.join("flightboard.db").to_string_lossy().to_string()
        } else {
            "flightboard_prod.db".to_string()
        }
    };

    let db = Database::new(&db_path).expect("Failed to create database connection");
    db.initialize_schema()
        .expect("Failed to initialize database schema");

    Box::leak(Box::new(db))
}
