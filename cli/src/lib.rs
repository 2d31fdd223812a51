//! Configuration and output helpers for the corpus preparation tools.

pub mod config;
pub mod output;

pub use config::{ConfigError, Overrides, PrepConfig, load_config, parse_config};
pub use output::{Output, OutputFormat, Summary};
