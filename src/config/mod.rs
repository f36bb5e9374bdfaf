//! Executor configuration and config file loading.
mod loader;
pub mod types;


pub use loader::{CONFIG_FILE_NAMES, find_config, load_config_file};
pub use types::{ExecutorConfig, TransportConfig};
