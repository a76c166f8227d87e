//! Closure-backed tools.
//!
//! ```
//! use toolrun_domain::{Channels, FnTool, Tool};
//!
//! let tool = FnTool::new("true", |_args, _channels| Ok(0));
//! let (channels, _captured) = Channels::capture();
//! assert_eq!(tool.run(&[], &channels).unwrap(), 0);
//! ```

use std::fmt;
use std::sync::Arc;

use super::channels::Channels;
use super::traits::Tool;
use crate::core::error::Result;

type ToolHandler = dyn Fn(&[String], &Channels) -> Result<i32> + Send + Sync;

/// A [`Tool`] whose body is a closure
#[derive(Clone)]
pub struct FnTool {
    name: String,
    description: Option<String>,
    handler: Arc<ToolHandler>,
}

impl FnTool {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[String], &Channels) -> Result<i32> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn run(&self, args: &[String], channels: &Channels) -> Result<i32> {
        (self.handler)(args, channels)
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
