// Settings service module
// Loads grid settings from the platform config directory

mod service;

pub use service::SettingsService;
