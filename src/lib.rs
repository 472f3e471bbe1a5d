pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::csv_history::CsvHistory;
pub use config::{toml_config::TomlConfig, OutputFormat};
pub use core::engine::{LotoEngine, Outcome};
pub use domain::format::{LotoFormat, LotoKind};
pub use domain::model::Draw;
pub use utils::error::{LotoError, Result};
