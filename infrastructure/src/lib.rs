//! Infrastructure layer for toolrun
//!
//! This crate contains the adapters to the host: the system tool finder,
//! external process tools, configuration file loading and config-defined
//! steps.

pub mod config;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLogConfig, FileStepConfig,
    FileToolsConfig,
};
pub use tools::{ConfigStep, ExternalTool, StepFinder, SystemToolFinder};
