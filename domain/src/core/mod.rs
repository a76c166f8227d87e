//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ToolError`]: errors raised by lookup, parsing and execution
//! - [`string`]: small string helpers

pub mod error;
pub mod string;
