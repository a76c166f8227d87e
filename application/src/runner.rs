//! Tool runner
//!
//! A [`ToolRunner`] is an immutable registry of tools plus the channels
//! they write to and a fallback [`ToolFinder`] used at registration time.
//!
//! ```text
//! with_tool_named("jar") ──▶ fallback.require("jar") ──▶ with_tool(jar)
//!
//! run("jar", args) ──▶ local find("jar") ──▶ run_tool(jar, args) ──▶ status
//!                        (no fallback)        │
//!                                             └─ "| jar <args>" on out
//! ```
//!
//! Resolution is two-tier on purpose: the fallback finder is consulted
//! only by [`ToolRunner::with_tool_named`], never while running. A nested
//! runner has to register the external tools it needs itself.

use std::fmt;
use std::sync::Arc;

use toolrun_domain::{Channels, CommandLine, Result, Tool, ToolError, ToolFinder, trace_line};

/// Immutable, append-only tool registry with execution
///
/// Registration never mutates a runner; it returns a new one sharing the
/// same channels and fallback finder. Cloning is cheap.
#[derive(Clone)]
pub struct ToolRunner {
    channels: Channels,
    finder: Arc<dyn ToolFinder>,
    tools: Arc<[Arc<dyn Tool>]>,
}

impl ToolRunner {
    /// Create a runner with no local tools
    pub fn new(channels: Channels, finder: Arc<dyn ToolFinder>) -> Self {
        Self {
            channels,
            finder,
            tools: Arc::from(Vec::new()),
        }
    }

    /// Resolve `name` through the fallback finder and register the result
    pub fn with_tool_named(&self, name: &str) -> Result<Self> {
        let tool = self.finder.require(name)?;
        Ok(self.with_tool_arc(tool))
    }

    /// Register a tool value
    pub fn with_tool(&self, tool: impl Tool + 'static) -> Self {
        self.with_tool_arc(Arc::new(tool))
    }

    /// Register an already shared tool
    ///
    /// The new tool goes after every existing one, so an earlier
    /// registration with the same name keeps shadowing it.
    pub fn with_tool_arc(&self, tool: Arc<dyn Tool>) -> Self {
        tracing::debug!(tool = tool.name(), position = self.tools.len(), "Registering tool");
        let tools: Vec<Arc<dyn Tool>> = self.tools.iter().cloned().chain([tool]).collect();
        Self {
            channels: self.channels.clone(),
            finder: Arc::clone(&self.finder),
            tools: tools.into(),
        }
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// The finder used by [`ToolRunner::with_tool_named`]
    pub fn fallback(&self) -> &Arc<dyn ToolFinder> {
        &self.finder
    }

    /// Locally registered tools in registration order
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Names of the locally registered tools in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|tool| tool.name())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Parse command text and run it by name
    pub fn run_command(&self, text: &str) -> Result<()> {
        let command = CommandLine::parse(text)?;
        self.run(&command.name, command.args)
    }

    /// Run a locally registered tool by name, failing on a non-zero status
    pub fn run<I>(&self, name: &str, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let tool = self.require(name)?;
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match self.run_tool(tool.as_ref(), &args)? {
            0 => Ok(()),
            code => {
                tracing::warn!(tool = name, code, "Tool exited with non-zero status");
                Err(ToolError::non_zero_exit(name, code))
            }
        }
    }

    /// Run `args[0]` with the remaining arguments and return the raw status
    ///
    /// The tool is resolved locally. A non-zero status is returned, not
    /// raised, so callers can map it to a process exit code themselves.
    pub fn run_args(&self, args: &[String]) -> Result<i32> {
        let (name, rest) = args.split_first().ok_or_else(|| {
            ToolError::MalformedCommand("argument list contains no tool name".to_string())
        })?;
        let tool = self.require(name)?;
        self.run_tool(tool.as_ref(), rest)
    }

    /// Run a tool directly, without name resolution
    ///
    /// Writes one trace line to the output channel, then invokes the tool
    /// and returns its status as-is.
    pub fn run_tool(&self, tool: &dyn Tool, args: &[String]) -> Result<i32> {
        tracing::info!(tool = tool.name(), args = args.len(), "Running tool");
        self.channels.println(&trace_line(tool.name(), args))?;
        let code = tool.run(args, &self.channels)?;
        tracing::debug!(tool = tool.name(), code, "Tool finished");
        Ok(code)
    }
}

impl ToolFinder for ToolRunner {
    fn find(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let found = self.tools.iter().find(|tool| tool.name() == name).cloned();
        tracing::debug!(tool = name, found = found.is_some(), "Local tool lookup");
        found
    }
}

impl fmt::Debug for ToolRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRunner")
            .field("tools", &self.names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
