//! CLI entrypoint for toolrun
//!
//! This is the main binary that wires together all layers using
//! dependency injection.
//!
//! Usage:
//!   toolrun TOOL ARGS...         # Run one tool, exit with its status
//!   toolrun -c "<command text>"  # Run free-form command text
//!   toolrun --list [-o json]     # List registered tools

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use toolrun_application::ToolRunner;
use toolrun_domain::{Channels, CommandLine, ToolError, ToolFinder, exit_status};
use toolrun_infrastructure::{ConfigLoader, FileConfig, FileLogConfig, StepFinder, SystemToolFinder};
use toolrun_presentation::{Cli, ConsoleFormatter, OutputFormat, ToolListing};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Exit status of the usage message, as `exit(-1)` would give
const USAGE_EXIT: u8 = 255;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{}", ConsoleFormatter::format_error(&format!("{:#}", err), color));
            let code = err
                .downcast_ref::<ToolError>()
                .map(ToolError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let _guard = init_logging(cli.verbose, &config.log, cli.log_file.as_deref())?;
    info!("Starting toolrun");

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        println!();
        print!("{}", config.to_toml_string()?);
        return Ok(0);
    }

    config.validate().context("Invalid configuration")?;

    // === Dependency Injection ===
    let system = Arc::new(SystemToolFinder::with_config(&config.tools));
    let runner = build_runner(&config, Channels::stdio(), system)?;

    execute_and_flush(&cli, &runner)
}

/// [`execute`], then flush the runner's channels whatever the outcome
fn execute_and_flush(cli: &Cli, runner: &ToolRunner) -> Result<u8> {
    let result = execute(cli, runner);
    let flushed = runner.channels().flush();
    let code = result?;
    flushed.context("Failed to flush output")?;
    Ok(code)
}

/// Top-level runner: `[tools] uses` first, then every configured step
fn build_runner(
    config: &FileConfig,
    channels: Channels,
    system: Arc<dyn ToolFinder>,
) -> Result<ToolRunner> {
    let finder = StepFinder::with_config(config, system);
    let steps: Vec<String> = finder.step_names().map(str::to_string).collect();
    let mut runner = ToolRunner::new(channels, Arc::new(finder));

    for name in &config.tools.uses {
        runner = runner
            .with_tool_named(name)
            .with_context(|| format!("Cannot register tool '{}'", name))?;
    }
    for name in steps.iter().filter(|name| !config.tools.uses.contains(*name)) {
        runner = runner.with_tool_named(name)?;
    }

    Ok(runner)
}

fn execute(cli: &Cli, runner: &ToolRunner) -> Result<u8> {
    let color = !cli.no_color && std::io::stdout().is_terminal();

    if cli.list {
        let listing = ToolListing::from_runner(runner);
        let output = match cli.output {
            OutputFormat::Text => ConsoleFormatter::format_listing(&listing, color),
            OutputFormat::Json => format!("{}\n", ConsoleFormatter::format_json(&listing)),
        };
        runner.channels().out().write_all(output.as_bytes())?;
        return Ok(0);
    }

    if let Some(text) = &cli.command_text {
        let command = CommandLine::parse(text)?;
        require_registered(runner, &command.name, color)?;
        runner.run(&command.name, command.args)?;
        return Ok(0);
    }

    if cli.command.is_empty() {
        write_usage(runner, color)?;
        return Ok(USAGE_EXIT);
    }

    require_registered(runner, &cli.command[0], color)?;
    let code = runner.run_args(&cli.command)?;
    if code != 0 {
        tracing::warn!(tool = %cli.command[0], code, "Tool exited with non-zero status");
    }
    Ok(exit_status(code))
}

/// Usage help and the registered tools, on the error channel
fn write_usage(runner: &ToolRunner, color: bool) -> Result<()> {
    let listing = ToolListing::from_runner(runner);
    let usage = ConsoleFormatter::format_usage("toolrun", &listing, color);
    runner.channels().err().write_all(usage.as_bytes())?;
    Ok(())
}

/// Show usage and fail with `NotFound` when `name` is not registered
fn require_registered(runner: &ToolRunner, name: &str, color: bool) -> Result<()> {
    if runner.find(name).is_some() {
        return Ok(());
    }
    write_usage(runner, color)?;
    Err(ToolError::not_found(name).into())
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `-v`, which wins over `[log] level`. The returned
/// guard must live until exit so buffered file output is written.
fn init_logging(
    verbose: u8,
    log: &FileLogConfig,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match (verbose, log.level.as_deref()) {
            (0, Some(level)) => EnvFilter::try_new(level)
                .with_context(|| format!("Invalid log level '{}'", level))?,
            (0, None) => EnvFilter::new("warn"),
            (1, _) => EnvFilter::new("info"),
            (2, _) => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        },
    };

    let Some(path) = log_file.or(log.file.as_deref()) else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let (dir, file_name) = split_log_path(path)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&dir)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?
        .to_string_lossy()
        .into_owned();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use toolrun_domain::{Captured, FnTool, Tool};

    fn host() -> Arc<dyn ToolFinder> {
        Arc::new(|name: &str| -> Option<Arc<dyn Tool>> {
            match name {
                "javac" | "jar" | "jlink" => {
                    Some(Arc::new(FnTool::new(name, |_, _| Ok(0))) as Arc<dyn Tool>)
                }
                "fail" => Some(Arc::new(FnTool::new(name, |_, _| Ok(7))) as Arc<dyn Tool>),
                _ => None,
            }
        })
    }

    fn config(toml_str: &str) -> FileConfig {
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();
        config
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("toolrun").chain(args.iter().copied())).unwrap()
    }

    fn runner(toml_str: &str) -> (ToolRunner, Captured) {
        let (channels, captured) = Channels::capture();
        let runner = build_runner(&config(toml_str), channels, host()).unwrap();
        (runner, captured)
    }

    const CONFIG: &str = r#"
[tools]
uses = ["jlink", "fail"]

[steps.package]
description = "Package modules"
uses = ["jar"]
commands = ["jar --create --file out/app.jar"]
"#;

    #[test]
    fn test_build_runner_registers_uses_then_steps() {
        let (runner, _captured) = runner(CONFIG);
        assert_eq!(
            runner.names().collect::<Vec<_>>(),
            vec!["jlink", "fail", "package"]
        );
        // Only registered names are runnable; `javac` is known to the host
        assert!(runner.find("javac").is_none());
    }

    #[test]
    fn test_build_runner_unknown_tool() {
        let (channels, _captured) = Channels::capture();
        let config = config("[tools]\nuses = [\"ld\"]\n");
        let err = build_runner(&config, channels, host()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::NotFound(name)) if name == "ld"
        ));
    }

    #[test]
    fn test_execute_tool_passes_status_through() {
        let (runner, captured) = runner(CONFIG);

        let code = execute(&cli(&["fail", "x"]), &runner).unwrap();

        assert_eq!(code, 7);
        assert_eq!(captured.stdout_lines(), vec!["| fail x"]);
    }

    #[test]
    fn test_execute_step() {
        let (runner, captured) = runner(CONFIG);

        let code = execute(&cli(&["package"]), &runner).unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            captured.stdout_lines(),
            vec!["| package", "| jar --create --file out/app.jar"]
        );
    }

    #[test]
    fn test_execute_command_text_fails_on_non_zero() {
        let (runner, captured) = runner(CONFIG);

        let err = execute(&cli(&["-c", "fail\n  --now"]), &runner).unwrap_err();

        assert_eq!(err.downcast_ref::<ToolError>().map(ToolError::exit_code), Some(7));
        assert_eq!(captured.stdout_lines(), vec!["| fail --now"]);
    }

    #[test]
    fn test_execute_without_tool_prints_usage() {
        let (runner, captured) = runner(CONFIG);

        let code = execute(&cli(&["--no-color"]), &runner).unwrap();

        assert_eq!(code, USAGE_EXIT);
        assert!(captured.stdout().is_empty());
        let usage = captured.stderr();
        assert!(usage.starts_with("Usage: toolrun TOOL-NAME TOOL-ARGS..."));
        assert!(usage.contains("package  Package modules"));
    }

    #[test]
    fn test_execute_unknown_tool_prints_usage() {
        let (runner, captured) = runner(CONFIG);

        let err = execute(&cli(&["--no-color", "ld", "-o", "app"]), &runner).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::NotFound(name)) if name == "ld"
        ));
        assert!(captured.stdout().is_empty());
        let usage = captured.stderr();
        assert!(usage.starts_with("Usage: toolrun TOOL-NAME TOOL-ARGS..."));
        assert!(usage.contains("jlink"));
        assert!(usage.contains("package  Package modules"));
    }

    #[test]
    fn test_execute_unknown_command_text_tool_prints_usage() {
        let (runner, captured) = runner(CONFIG);

        let err = execute(&cli(&["--no-color", "-c", "javac\n  -d out"]), &runner).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::NotFound(name)) if name == "javac"
        ));
        assert!(captured.stdout().is_empty());
        assert!(captured.stderr().contains("Usage: toolrun"));
    }

    /// Counts `flush` calls across both channels
    #[derive(Clone, Default)]
    struct FlushCounter(Arc<AtomicUsize>);

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn counting_runner() -> (ToolRunner, FlushCounter) {
        let counter = FlushCounter::default();
        let channels = Channels::new(counter.clone(), counter.clone());
        let runner = build_runner(&config(CONFIG), channels, host()).unwrap();
        (runner, counter)
    }

    #[test]
    fn test_failed_run_still_flushes() {
        let (runner, flushes) = counting_runner();

        let err = execute_and_flush(&cli(&["-c", "fail --now"]), &runner).unwrap_err();

        assert_eq!(err.downcast_ref::<ToolError>().map(ToolError::exit_code), Some(7));
        assert_eq!(flushes.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_every_outcome_flushes() {
        let cases: [&[&str]; 5] = [&["jlink"], &["fail"], &[], &["ld"], &["--list"]];
        for args in cases {
            let (runner, flushes) = counting_runner();
            let _ = execute_and_flush(&cli(args), &runner);
            assert_eq!(flushes.0.load(Ordering::SeqCst), 2, "args: {:?}", args);
        }
    }

    #[test]
    fn test_execute_list_json() {
        let (runner, captured) = runner(CONFIG);

        execute(&cli(&["--list", "-o", "json"]), &runner).unwrap();

        let value: serde_json::Value = serde_json::from_str(&captured.stdout()).unwrap();
        let names: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["fail", "jlink", "package"]);
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("logs/run.log")).unwrap();
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, "run.log");

        let (dir, name) = split_log_path(Path::new("run.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "run.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }
}
