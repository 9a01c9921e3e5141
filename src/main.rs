mod app;
mod catalog;
mod color;
mod config;
mod data;
mod predict;
mod state;
mod ui;

use app::ZettaApp;
use catalog::Catalog;
use config::Settings;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load().unwrap_or_else(|e| {
        log::error!("Ignoring configuration: {e:#}");
        Settings::default()
    });
    log::info!("Data root {}, target {}", settings.root.display(), settings.target_column);
    let catalog = Catalog::new(settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Zetta Lab – Governança de Dados",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the SHAP png from disk.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ZettaApp::new(catalog)))
        }),
    )
}
