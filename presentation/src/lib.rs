//! Presentation layer for toolrun
//!
//! This crate contains the CLI definition and the console formatting of
//! tool listings, usage help and errors.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::{ConsoleFormatter, ToolEntry, ToolListing};
