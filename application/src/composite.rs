//! Composite tools
//!
//! A composite is a tool whose body is itself an orchestration: it builds a
//! fresh [`ToolRunner`] over the same channels, registers the sub-tools it
//! needs and runs them by name.
//!
//! ```text
//! compile
//! ├── compile-classes ── javac
//! └── compile-modules ── jar (once per module)
//! ```
//!
//! Because [`ToolRunner::run`] fails on the first non-zero status, the
//! first failing sub-step aborts the whole composite and everything above
//! it. A composite that finishes its orchestration always returns 0.

use std::fmt;
use std::sync::Arc;

use toolrun_domain::{Channels, Result, Tool, ToolFinder};

use crate::runner::ToolRunner;

/// The orchestration body of a composite tool
pub trait Composite: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Register the sub-tools this composite needs on a fresh runner
    ///
    /// External tools have to be registered here explicitly (usually via
    /// [`ToolRunner::with_tool_named`]); the runner never falls back to
    /// its finder while running.
    fn compose(&self, runner: ToolRunner) -> Result<ToolRunner>;

    /// Run the sub-tools in order
    fn orchestrate(&self, runner: &ToolRunner, args: &[String]) -> Result<()>;
}

/// Adapts a [`Composite`] to the [`Tool`] contract
pub struct CompositeTool<C> {
    composite: C,
    finder: Arc<dyn ToolFinder>,
}

impl<C: Composite> CompositeTool<C> {
    /// `finder` is the fallback for the composite's own runner
    pub fn new(composite: C, finder: Arc<dyn ToolFinder>) -> Self {
        Self { composite, finder }
    }
}

impl<C: Composite> Tool for CompositeTool<C> {
    fn name(&self) -> &str {
        self.composite.name()
    }

    fn description(&self) -> Option<&str> {
        self.composite.description()
    }

    fn run(&self, args: &[String], channels: &Channels) -> Result<i32> {
        let runner = ToolRunner::new(channels.clone(), Arc::clone(&self.finder));
        let runner = self.composite.compose(runner)?;
        tracing::debug!(
            composite = self.composite.name(),
            tools = ?runner.names().collect::<Vec<_>>(),
            "Composed sub-runner"
        );
        self.composite.orchestrate(&runner, args)?;
        Ok(0)
    }
}

impl<C> fmt::Debug for CompositeTool<C>
where
    C: Composite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTool")
            .field("name", &self.composite.name())
            .finish_non_exhaustive()
    }
}
