//! Tool finder abstraction
//!
//! A [`ToolFinder`] maps a tool name to a [`Tool`]. It is a capability
//! value, not a container: there is no registration through this trait.
//!
//! ```text
//! ┌─────────────────────┐      ┌─────────────────────┐
//! │ ToolRunner          │      │ SystemToolFinder    │
//! │ (local tools only)  │      │ (search path)       │
//! └──────────┬──────────┘      └──────────┬──────────┘
//!            │ find / require             │ find / require
//!            ▼                            ▼
//!                    ToolFinder
//! ```
//!
//! Any closure `Fn(&str) -> Option<Arc<dyn Tool>>` is a finder, which is
//! how tests substitute a fake for the system-wide lookup:
//!
//! ```
//! use std::sync::Arc;
//! use toolrun_domain::{FnTool, Tool, ToolFinder};
//!
//! let finder = |name: &str| -> Option<Arc<dyn Tool>> {
//!     (name == "true").then(|| Arc::new(FnTool::new("true", |_, _| Ok(0))) as Arc<dyn Tool>)
//! };
//!
//! assert!(finder.find("true").is_some());
//! assert!(finder.require("false").is_err());
//! ```

use std::sync::Arc;

use super::traits::Tool;
use crate::core::error::{Result, ToolError};

/// Lookup capability from tool name to tool
pub trait ToolFinder: Send + Sync {
    /// Find a tool by exact name
    fn find(&self, name: &str) -> Option<Arc<dyn Tool>>;

    /// Find a tool by exact name, failing with [`ToolError::NotFound`]
    fn require(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.find(name).ok_or_else(|| ToolError::not_found(name))
    }
}

impl<F> ToolFinder for F
where
    F: Fn(&str) -> Option<Arc<dyn Tool>> + Send + Sync,
{
    fn find(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self(name)
    }
}

/// A finder that knows no tools
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFinder;

impl ToolFinder for EmptyFinder {
    fn find(&self, _name: &str) -> Option<Arc<dyn Tool>> {
        None
    }
}
