// Coach Scheduler Application
// Main entry point

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use coach_scheduler::models::settings::Settings;
use coach_scheduler::services::settings::{default_settings_path, resolve_data_path, SettingsService};
use coach_scheduler::services::store::SqliteStore;
use coach_scheduler::services::worker::StoreWorker;
use coach_scheduler::ui_egui::SchedulerApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Coach Scheduler");

    let settings_service = SettingsService::new(default_settings_path());
    let settings = settings_service.load().unwrap_or_else(|err| {
        log::warn!(
            "Could not load settings from {}: {:#}. Using defaults.",
            settings_service.path().display(),
            err
        );
        Settings::default()
    });

    let database_path = resolve_data_path(&settings.database_path);
    if let Some(parent) = Path::new(&database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    log::info!("Using database at {}", database_path);

    let store = SqliteStore::open(&database_path)?;
    let worker = StoreWorker::spawn(Box::new(store))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Coach Scheduler")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Coach Scheduler",
        options,
        Box::new(move |cc| Ok(Box::new(SchedulerApp::new(cc, settings, worker)))),
    )
    .map_err(|err| anyhow!("Window failed: {}", err))
}
