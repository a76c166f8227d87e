//! Tool domain traits
//!
//! [`Tool`] is the atomic unit of work. Everything the runner executes,
//! an external executable, an in-process closure or a composite that
//! orchestrates further tools, is reached through this one trait.

use super::channels::Channels;
use crate::core::error::Result;

/// A named capability that runs with arguments and two output channels
///
/// Implementations are immutable values. `run` may have arbitrary side
/// effects (spawning processes, writing files) but never changes the tool
/// itself. The returned status follows process conventions: 0 is success.
///
/// An `Err` is reserved for failures that must abort the surrounding
/// orchestration, such as a composite whose sub-step failed.
pub trait Tool: Send + Sync {
    /// Name the tool is registered and looked up under
    fn name(&self) -> &str;

    /// One-line description for usage listings
    fn description(&self) -> Option<&str> {
        None
    }

    /// Run the tool
    fn run(&self, args: &[String], channels: &Channels) -> Result<i32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct Greeter;

    impl Tool for Greeter {
        fn name(&self) -> &str {
            "greet"
        }

        fn run(&self, args: &[String], channels: &Channels) -> Result<i32> {
            writeln!(channels.out(), "hello {}", args.join(" "))?;
            Ok(0)
        }
    }

    #[test]
    fn test_tool_writes_to_channels() {
        let (channels, captured) = Channels::capture();
        let status = Greeter.run(&["world".to_string()], &channels).unwrap();

        assert_eq!(status, 0);
        assert_eq!(captured.stdout(), "hello world\n");
    }

    #[test]
    fn test_description_defaults_to_none() {
        assert!(Greeter.description().is_none());
    }
}
