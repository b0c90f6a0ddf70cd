mod app;
mod controller;
mod ui;

use app::SmoteApp;
use controller::Controller;
use eframe::egui;
use smote_lab::{logging, DemoConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_logging()?;

    let controller = Controller::initialize(DemoConfig::default())?;
    let app = SmoteApp::new(controller);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SMOTE Neighbors")
            .with_inner_size([820.0, 680.0]),
        ..Default::default()
    };
    eframe::run_native(
        "SMOTE Neighbors",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
