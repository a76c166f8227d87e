//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for tool listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One tool per line
    #[default]
    Text,
    /// JSON array of tools
    Json,
}

/// CLI arguments for toolrun
#[derive(Parser, Debug)]
#[command(name = "toolrun")]
#[command(author, version, about = "Run named build tools and composite build steps")]
#[command(long_about = r#"
toolrun registers named tools (compilers, archivers, linkers, or composite
steps defined in configuration) and runs one of them with its arguments.
Every invocation is traced as a line starting with "| " on standard output.

Configuration files are loaded from (in priority order):
1. TOOLRUN_* environment variables
2. --config <path>     Explicit config file
3. ./toolrun.toml      Project-level config
4. ~/.config/toolrun/config.toml   Global config

Example:
  toolrun javac --version
  toolrun -c "jar --create --file out/app.jar -C out/classes ."
  toolrun compile
  toolrun --list --output json
"#)]
pub struct Cli {
    /// Tool name followed by its arguments
    #[arg(
        value_name = "TOOL",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,

    /// Run free-form command text instead of TOOL ARGS
    #[arg(short = 'c', long = "command", value_name = "TEXT", conflicts_with = "command")]
    pub command_text: Option<String>,

    /// List the registered tools and exit
    #[arg(short, long)]
    pub list: bool,

    /// Output format for --list
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The tool name, if one was given
    pub fn tool(&self) -> Option<&str> {
        self.command.first().map(String::as_str)
    }
}
