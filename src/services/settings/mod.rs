// Settings service
// Loads and saves settings.toml

mod service;

pub use service::{default_settings_path, resolve_data_path, SettingsService};
