//! Configuration — `.kvprov.toml`, environment overrides and validation.

pub mod settings;

pub use settings::Settings;
