//! Configuration loaded from `<home>/config.toml`.

pub mod settings;

pub use settings::Settings;
