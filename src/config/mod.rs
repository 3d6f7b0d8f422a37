//! Configuration for the display watcher
//!
//! - **settings**: optional JSON file with paths, polling interval and fallback command

pub mod settings;

pub use settings::Settings;
