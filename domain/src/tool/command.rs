//! Command text parsing
//!
//! Command text is written like a shell invocation spread over several
//! indented lines for readability:
//!
//! ```text
//! jar
//!   --create
//!   --file out/modules/org.example.jar
//!   -C out/classes/org.example .
//! ```
//!
//! Each line is trimmed and split on whitespace, and the tokens of all
//! lines are concatenated. The first token names the tool. There is no
//! quoting or escaping: an argument containing whitespace cannot be
//! expressed here and must go through the structured `(name, args)` entry
//! point instead.

use std::fmt;
use std::str::FromStr;

use crate::core::error::{Result, ToolError};

/// A parsed command: tool name plus positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse free-form, possibly multi-line command text
    ///
    /// Fails with [`ToolError::MalformedCommand`] when the text holds no
    /// tokens at all, since there is then no tool name.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = tokenize(text).into_iter();
        let name = tokens.next().ok_or_else(|| {
            ToolError::MalformedCommand("command text contains no tool name".to_string())
        })?;
        Ok(Self {
            name,
            args: tokens.collect(),
        })
    }
}

impl FromStr for CommandLine {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Split command text into its flat token sequence
///
/// Blank lines contribute no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_line() {
        let command = CommandLine::parse("javac --version").unwrap();
        assert_eq!(command.name, "javac");
        assert_eq!(command.args, vec!["--version"]);
    }

    #[test]
    fn test_multi_line_matches_single_line() {
        let multi = CommandLine::parse("foo\n  bar baz  \n").unwrap();
        let single = CommandLine::parse("foo bar baz").unwrap();

        assert_eq!(multi, single);
        assert_eq!(multi.name, "foo");
        assert_eq!(multi.args, vec!["bar", "baz"]);
    }

    #[test]
    fn test_parse_flag_and_value_on_continuation_line() {
        let command = CommandLine::parse("build\n  --flag value\n").unwrap();
        assert_eq!(command.name, "build");
        assert_eq!(command.args, vec!["--flag", "value"]);
    }

    #[test]
    fn test_indented_block_with_blank_lines() {
        let text = r#"
            jlink

              --verbose
              --output out/image
              --module-path   out/modules
            "#;
        let command: CommandLine = text.parse().unwrap();

        assert_eq!(command.name, "jlink");
        assert_eq!(
            command.args,
            vec!["--verbose", "--output", "out/image", "--module-path", "out/modules"]
        );
    }

    #[test]
    fn test_tabs_and_crlf_are_whitespace() {
        let command = CommandLine::parse("ar\trcs\r\n\tlibfoo.a  foo.o\r\n").unwrap();
        assert_eq!(command.name, "ar");
        assert_eq!(command.args, vec!["rcs", "libfoo.a", "foo.o"]);
    }

    #[test]
    fn test_empty_text_is_malformed() {
        assert!(matches!(
            CommandLine::parse(""),
            Err(ToolError::MalformedCommand(_))
        ));
        assert!(matches!(
            CommandLine::parse("  \n\t\n   "),
            Err(ToolError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_display_round_trips_tokens() {
        let command = CommandLine::new("cc", ["-c", "main.c"]);
        assert_eq!(command.to_string(), "cc -c main.c");
    }
}
