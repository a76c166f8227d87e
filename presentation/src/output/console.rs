//! Console output formatter for tool listings and usage help

use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use toolrun_application::ToolRunner;

/// One registered tool as shown by `--list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The tools a runner can run by name, sorted by name
///
/// A name registered twice is listed once, with the tool that wins
/// lookup (the earlier registration).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolListing {
    pub tools: Vec<ToolEntry>,
}

impl ToolListing {
    pub fn from_runner(runner: &ToolRunner) -> Self {
        let mut seen = HashSet::new();
        let mut tools: Vec<ToolEntry> = runner
            .tools()
            .iter()
            .filter(|tool| seen.insert(tool.name().to_string()))
            .map(|tool| ToolEntry {
                name: tool.name().to_string(),
                description: tool.description().map(str::to_string),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        Self { tools }
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Formats listings and usage text for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One line per tool, description aligned in a second column
    pub fn format_listing(listing: &ToolListing, color: bool) -> String {
        let width = listing
            .tools
            .iter()
            .map(|entry| entry.name.len())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for entry in &listing.tools {
            let padded = format!("{:width$}", entry.name, width = width);
            let name = if color {
                padded.green().bold().to_string()
            } else {
                padded
            };
            match &entry.description {
                Some(description) => output.push_str(&format!("{}  {}\n", name, description)),
                None => output.push_str(&format!("{}\n", name.trim_end())),
            }
        }
        output
    }

    /// Format as JSON
    pub fn format_json(listing: &ToolListing) -> String {
        serde_json::to_string_pretty(listing).unwrap_or_else(|_| "[]".to_string())
    }

    /// Usage message followed by the registered tool names
    pub fn format_usage(program: &str, listing: &ToolListing, color: bool) -> String {
        let heading = format!("Usage: {} TOOL-NAME TOOL-ARGS...", program);
        let mut output = if color {
            heading.bold().to_string()
        } else {
            heading
        };
        output.push_str("\n\n");

        if listing.is_empty() {
            output.push_str("No tools registered. Add names to [tools] uses or define [steps].\n");
        } else {
            output.push_str(&Self::format_listing(listing, color));
        }
        output
    }

    /// Final error line shown on stderr
    pub fn format_error(message: &str, color: bool) -> String {
        if color {
            format!("{} {}", "error:".red().bold(), message)
        } else {
            format!("error: {}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use toolrun_domain::{Channels, EmptyFinder, FnTool};

    fn runner() -> ToolRunner {
        let (channels, _captured) = Channels::capture();
        ToolRunner::new(channels, Arc::new(EmptyFinder))
            .with_tool(FnTool::new("jlink", |_, _| Ok(0)))
            .with_tool(FnTool::new("compile", |_, _| Ok(0)).with_description("Compile everything"))
            .with_tool(FnTool::new("jar", |_, _| Ok(0)))
            .with_tool(FnTool::new("compile", |_, _| Ok(0)).with_description("shadowed"))
    }

    #[test]
    fn test_listing_is_sorted_and_deduplicated() {
        let listing = ToolListing::from_runner(&runner());
        let names: Vec<_> = listing.tools.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["compile", "jar", "jlink"]);
        assert_eq!(
            listing.tools[0].description.as_deref(),
            Some("Compile everything")
        );
    }

    #[test]
    fn test_format_listing_plain() {
        let listing = ToolListing::from_runner(&runner());
        assert_eq!(
            ConsoleFormatter::format_listing(&listing, false),
            "compile  Compile everything\njar\njlink\n"
        );
    }

    #[test]
    fn test_format_json() {
        let listing = ToolListing::from_runner(&runner());
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&listing)).unwrap();

        assert_eq!(value[0]["name"], "compile");
        assert_eq!(value[0]["description"], "Compile everything");
        assert_eq!(value[1]["name"], "jar");
        assert!(value[1].get("description").is_none());
    }

    #[test]
    fn test_format_usage() {
        let listing = ToolListing::from_runner(&runner());
        let usage = ConsoleFormatter::format_usage("toolrun", &listing, false);

        assert!(usage.starts_with("Usage: toolrun TOOL-NAME TOOL-ARGS...\n\n"));
        assert!(usage.ends_with("jar\njlink\n"));
    }

    #[test]
    fn test_format_usage_without_tools() {
        let usage = ConsoleFormatter::format_usage("toolrun", &ToolListing::default(), false);
        assert!(usage.contains("No tools registered"));
    }

    #[test]
    fn test_format_error_plain() {
        assert_eq!(
            ConsoleFormatter::format_error("Tool not found: ld", false),
            "error: Tool not found: ld"
        );
    }
}
