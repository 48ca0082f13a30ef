pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::MapConfig;
pub use core::{engine::ExportEngine, pipeline::HtmlMapPipeline};
pub use utils::error::{MapError, Result};
