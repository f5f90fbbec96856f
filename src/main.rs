// Timetable Planner
// Main entry point

use timetable_planner::models::settings::GridSettings;
use timetable_planner::services::catalog::LectureCatalog;
use timetable_planner::services::settings::SettingsService;
use timetable_planner::ui_egui::TimetableApp;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Timetable Planner");

    let settings: GridSettings = SettingsService::from_default_location()
        .map(|service| service.load_or_default())
        .unwrap_or_default();
    let catalog = LectureCatalog::load_or_built_in(settings.catalog_path.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Timetable Planner")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Timetable Planner",
        options,
        Box::new(move |_cc| Ok(Box::new(TimetableApp::new(&settings, catalog)))),
    )
    .map_err(|err| anyhow::anyhow!("Failed to run the timetable window: {}", err))
}
