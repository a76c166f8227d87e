//! Config-defined composite steps
//!
//! Each `[steps.<name>]` section becomes a composite tool. The step's own
//! runner registers every name in `uses` through a [`StepFinder`], which
//! knows the sibling steps first and the host tools second, so steps can
//! nest to any depth:
//!
//! ```toml
//! [steps.compile]
//! uses = ["compile-classes", "compile-modules"]
//! commands = ["compile-classes", "compile-modules"]
//!
//! [steps.compile-classes]
//! uses = ["javac"]
//! commands = ["javac --module {modules} --module-source-path . -d out/classes"]
//! ```
//!
//! Cycles are rejected by [`FileConfig::validate`] before a finder is
//! built.

use std::collections::BTreeMap;
use std::sync::Arc;

use toolrun_application::{Composite, CompositeTool, ToolRunner};
use toolrun_domain::{Result, Tool, ToolFinder};

use crate::config::{FileConfig, FileStepConfig, substitute};

/// Resolves step names to composite tools, then defers to another finder
#[derive(Clone)]
pub struct StepFinder {
    steps: Arc<BTreeMap<String, FileStepConfig>>,
    vars: Arc<BTreeMap<String, String>>,
    fallback: Arc<dyn ToolFinder>,
}

impl StepFinder {
    pub fn new(
        steps: BTreeMap<String, FileStepConfig>,
        vars: BTreeMap<String, String>,
        fallback: Arc<dyn ToolFinder>,
    ) -> Self {
        Self {
            steps: Arc::new(steps),
            vars: Arc::new(vars),
            fallback,
        }
    }

    /// Steps and variables from a loaded configuration
    pub fn with_config(config: &FileConfig, fallback: Arc<dyn ToolFinder>) -> Self {
        Self::new(config.steps.clone(), config.vars.clone(), fallback)
    }

    /// Names of all configured steps, sorted
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }
}

impl ToolFinder for StepFinder {
    fn find(&self, name: &str) -> Option<Arc<dyn Tool>> {
        match self.steps.get(name) {
            Some(config) => {
                tracing::debug!(step = name, "Resolved config step");
                let step = ConfigStep {
                    name: name.to_string(),
                    config: config.clone(),
                    vars: Arc::clone(&self.vars),
                };
                Some(Arc::new(CompositeTool::new(step, Arc::new(self.clone()))) as Arc<dyn Tool>)
            }
            None => self.fallback.find(name),
        }
    }
}

/// The body of a config-defined step
#[derive(Debug, Clone)]
pub struct ConfigStep {
    name: String,
    config: FileStepConfig,
    vars: Arc<BTreeMap<String, String>>,
}

impl Composite for ConfigStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    fn compose(&self, runner: ToolRunner) -> Result<ToolRunner> {
        self.config
            .uses
            .iter()
            .try_fold(runner, |runner, name| runner.with_tool_named(name))
    }

    fn orchestrate(&self, runner: &ToolRunner, args: &[String]) -> Result<()> {
        if !args.is_empty() {
            tracing::debug!(step = %self.name, ?args, "Config steps ignore arguments");
        }
        for command in &self.config.commands {
            runner.run_command(&substitute(command, &self.vars))?;
        }
        Ok(())
    }
}
