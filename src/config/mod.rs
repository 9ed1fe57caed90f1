pub mod cli;
pub mod json_config;
