//! Domain layer for toolrun
//!
//! This crate contains the tool contracts, the command text parser and the
//! error type. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Tool
//!
//! A named capability that takes an ordered list of string arguments and
//! a pair of output channels and returns a status code.
//!
//! ## Tool Finder
//!
//! A lookup from name to tool. The process-wide finder lives in the
//! infrastructure layer; the runner in the application layer is a finder
//! over its own locally registered tools.

pub mod core;
pub mod tool;

// Re-export commonly used types
pub use core::{
    error::{Result, ToolError, exit_status},
    string::{TRACE_MARKER, trace_line},
};
pub use tool::{
    Captured, Channels, CommandLine, EmptyFinder, FnTool, Sink, Tool, ToolFinder, tokenize,
};
