pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::LocalStorage;

pub use config::json_config::JsonConfig;
pub use core::{engine::BatchEngine, pipeline::UserPipeline};
pub use utils::error::{ProcessorError, Result};
