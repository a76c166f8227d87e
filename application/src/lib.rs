//! Application layer for toolrun
//!
//! This crate contains the tool runner and the composite tool pattern.
//! It depends only on the domain layer.

pub mod composite;
pub mod runner;

// Re-export commonly used types
pub use composite::{Composite, CompositeTool};
pub use runner::ToolRunner;
