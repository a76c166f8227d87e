//! System tool finder
//!
//! The [`SystemToolFinder`] is the process-wide default [`ToolFinder`]: it
//! resolves a tool name to an executable on the host and wraps it as an
//! [`ExternalTool`].
//!
//! # Resolution
//!
//! 1. The name is mapped through `[tools.aliases]` to a program name
//! 2. Each configured search path is tried in order
//! 3. Otherwise `PATH` is searched
//!
//! # Configuration
//!
//! ```toml
//! [tools]
//! search_paths = ["/opt/jdk-21/bin"]
//!
//! [tools.aliases]
//! cc = "clang"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use toolrun_domain::{Tool, ToolFinder};

use super::external::ExternalTool;
use crate::config::FileToolsConfig;

/// Finds tools among the executables installed on the host
#[derive(Debug, Clone, Default)]
pub struct SystemToolFinder {
    /// Searched before `PATH`
    search_paths: Vec<PathBuf>,
    /// Tool name -> program name
    aliases: BTreeMap<String, String>,
}

impl SystemToolFinder {
    /// Search `PATH` only, without aliases
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder from configuration
    pub fn with_config(config: &FileToolsConfig) -> Self {
        Self {
            search_paths: config.search_paths.clone(),
            aliases: config.aliases.clone(),
        }
    }

    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    pub fn with_alias(mut self, name: impl Into<String>, program: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), program.into());
        self
    }

    /// Program name for a tool, honoring aliases
    pub fn program_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Locate the executable for a tool name
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let program = self.program_for(name);
        self.search_paths
            .iter()
            .find_map(|dir| which::which_in(program, Some(dir), dir).ok())
            .or_else(|| which::which(program).ok())
    }
}

impl ToolFinder for SystemToolFinder {
    fn find(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let found = self.locate(name);
        tracing::debug!(
            tool = name,
            program = self.program_for(name),
            path = ?found,
            "System tool lookup"
        );
        found.map(|path| Arc::new(ExternalTool::new(name, path)) as Arc<dyn Tool>)
    }
}
