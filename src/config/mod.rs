//! Configuration management

mod catalog;
mod settings;

pub use catalog::Catalog;
pub use settings::{AppConfig, CONFIG_VERSION};
