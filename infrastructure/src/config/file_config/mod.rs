//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; [`FileConfig::validate`] checks the
//! cross-references between sections before anything runs.

mod log;
mod steps;
mod tools;

pub use log::FileLogConfig;
pub use steps::{FileStepConfig, placeholders, substitute};
pub use tools::FileToolsConfig;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use toolrun_domain::tokenize;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("step name cannot be empty")]
    EmptyStepName,

    #[error("tool name cannot be empty in {context}")]
    EmptyToolName { context: String },

    #[error("step '{step}' has no commands")]
    NoCommands { step: String },

    #[error("command #{index} of step '{step}' is empty")]
    EmptyCommand { step: String, index: usize },

    #[error("step '{step}' runs '{tool}' which is not listed in its uses")]
    UndeclaredTool { step: String, tool: String },

    #[error("step '{step}' refers to undefined variable '{{{name}}}'")]
    UnknownVariable { step: String, name: String },

    #[error("steps form a cycle: {}", .path.join(" -> "))]
    StepCycle { path: Vec<String> },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Tool resolution settings
    pub tools: FileToolsConfig,
    /// `{name}` placeholders substituted into step commands
    pub vars: BTreeMap<String, String>,
    /// Config-defined composite tools
    pub steps: BTreeMap<String, FileStepConfig>,
    /// Logging settings
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Render the effective configuration as TOML (for --show-config)
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate the configuration
    ///
    /// Checks, in order:
    /// 1. Empty tool names in `[tools]`
    /// 2. Per step: empty names, missing or empty commands, undefined
    ///    variables, and commands whose tool is not in the step's `uses`
    /// 3. Cycles among steps
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.tools.uses.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyToolName {
                context: "tools.uses".to_string(),
            });
        }
        if self
            .tools
            .aliases
            .iter()
            .any(|(name, program)| name.trim().is_empty() || program.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyToolName {
                context: "tools.aliases".to_string(),
            });
        }

        for (name, step) in &self.steps {
            self.validate_step(name, step)?;
        }

        match find_cycle(&self.steps) {
            Some(path) => Err(ConfigValidationError::StepCycle { path }),
            None => Ok(()),
        }
    }

    fn validate_step(&self, name: &str, step: &FileStepConfig) -> Result<(), ConfigValidationError> {
        if name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyStepName);
        }
        if step.uses.iter().any(|tool| tool.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyToolName {
                context: format!("steps.{}.uses", name),
            });
        }
        if step.commands.is_empty() {
            return Err(ConfigValidationError::NoCommands {
                step: name.to_string(),
            });
        }

        for (index, command) in step.commands.iter().enumerate() {
            if let Some(var) = placeholders(command)
                .into_iter()
                .find(|var| !self.vars.contains_key(*var))
            {
                return Err(ConfigValidationError::UnknownVariable {
                    step: name.to_string(),
                    name: var.to_string(),
                });
            }

            let tokens = tokenize(&substitute(command, &self.vars));
            let Some(tool) = tokens.first() else {
                return Err(ConfigValidationError::EmptyCommand {
                    step: name.to_string(),
                    index,
                });
            };
            if !step.uses.contains(tool) {
                return Err(ConfigValidationError::UndeclaredTool {
                    step: name.to_string(),
                    tool: tool.clone(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// First cycle among steps, as a path that starts and ends on the same step
fn find_cycle(steps: &BTreeMap<String, FileStepConfig>) -> Option<Vec<String>> {
    let mut marks = HashMap::new();
    let mut stack = Vec::new();
    steps
        .keys()
        .find_map(|name| visit(name, steps, &mut marks, &mut stack))
}

fn visit<'a>(
    name: &'a str,
    steps: &'a BTreeMap<String, FileStepConfig>,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    match marks.get(name) {
        Some(Mark::Done) => return None,
        Some(Mark::Visiting) => {
            let start = stack.iter().position(|n| *n == name).unwrap_or(0);
            let mut path: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
            path.push(name.to_string());
            return Some(path);
        }
        None => {}
    }

    marks.insert(name, Mark::Visiting);
    stack.push(name);
    if let Some(step) = steps.get(name) {
        for dep in step.uses.iter().filter(|dep| steps.contains_key(dep.as_str())) {
            if let Some(path) = visit(dep, steps, marks, stack) {
                return Some(path);
            }
        }
    }
    stack.pop();
    marks.insert(name, Mark::Done);
    None
}
