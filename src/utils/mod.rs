//! Utility modules shared by the loader and its binary

pub mod env;
pub mod logging;

// Re-export commonly used items
pub use env::{env_bool, env_opt};
pub use logging::{build_env_filter, init_logging, init_logging_from_config};
#[cfg(feature = "json-logging")]
pub use logging::init_json_logging;
