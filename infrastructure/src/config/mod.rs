//! Configuration file loading for toolrun
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLRUN_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolrun.toml` or `./.toolrun.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/toolrun/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLogConfig, FileStepConfig, FileToolsConfig,
    placeholders, substitute,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILES};
