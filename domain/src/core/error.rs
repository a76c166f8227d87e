//! Domain error types

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while resolving, parsing or running tools.
///
/// None of these are retried by the runner. They unwind through every
/// nested runner up to the top-level caller.
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool with this name in the scope that was searched
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A tool run by name returned a non-zero status
    #[error("Non-zero exit code {code} from {name}")]
    NonZeroExit { name: String, code: i32 },

    /// Command text produced no tokens, so there is no tool name
    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    /// An external executable could not be started
    #[error("Failed to launch {name}: {source}")]
    Launch {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing to an output or error channel failed
    #[error("Channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        ToolError::NotFound(name.into())
    }

    pub fn non_zero_exit(name: impl Into<String>, code: i32) -> Self {
        ToolError::NonZeroExit {
            name: name.into(),
            code,
        }
    }

    /// Status code a process should exit with when this error is final
    ///
    /// A failing tool's own status is passed through; everything else
    /// maps to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::NonZeroExit { code, .. } => exit_status(*code),
            _ => 1,
        }
    }
}

/// Map a tool status to a process exit status
///
/// Only the low eight bits survive, as with `exit(2)`, so `-1` becomes
/// 255. A non-zero status whose low bits are zero still fails with 1.
pub fn exit_status(code: i32) -> u8 {
    let low = (code & 0xff) as u8;
    if low == 0 && code != 0 { 1 } else { low }
}
