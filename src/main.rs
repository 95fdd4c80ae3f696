mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::CricketDashApp;
use eframe::egui;

/// Loaded at startup when present and no path is given on the command line.
const DEFAULT_SOURCE: &str = "cricket_data_2025.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let source = std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        let default = PathBuf::from(DEFAULT_SOURCE);
        default.exists().then_some(default)
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cricket Performance Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CricketDashApp::new(source)))),
    )
}
