//! Tool domain module
//!
//! This module defines the core abstractions of the **tool system**: how
//! named build tools (a compiler, an archiver, a linker) are looked up and
//! invoked with captured output.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolFinder   │───▶│ Tool         │───▶│ status code  │
//! │ (lookup)     │    │ (invocation) │    │ (0 = ok)     │
//! └──────────────┘    └──────┬───────┘    └──────────────┘
//!                            │
//!                            └─ writes to Channels (out / err)
//! ```
//!
//! # Key Types
//!
//! - [`Tool`]: a named capability: `(args, channels) -> status`
//! - [`FnTool`]: a closure-backed [`Tool`]
//! - [`ToolFinder`]: name → tool lookup with a failing `require`
//! - [`Channels`]: output and error sinks shared by a whole call tree
//! - [`CommandLine`]: parsed multi-line command text
//!
//! # Architecture
//!
//! - **Domain** (this module): contracts and parsing, no process spawning
//! - **Application** (`ToolRunner`): registry and execution policy
//! - **Infrastructure** (`SystemToolFinder`): executables on the search path

pub mod channels;
pub mod command;
pub mod finder;
pub mod function;
pub mod traits;

pub use channels::{Captured, Channels, Sink};
pub use command::{CommandLine, tokenize};
pub use finder::{EmptyFinder, ToolFinder};
pub use function::FnTool;
pub use traits::Tool;
