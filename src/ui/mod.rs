pub mod app;
pub mod settings;
pub mod widgets;

pub use settings::SettingsView;
