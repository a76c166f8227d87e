//! External process tool
//!
//! Runs an executable with the tool's arguments and copies what it writes
//! into the runner's channels while it runs.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use toolrun_domain::{Channels, Result, Tool, ToolError};

/// A [`Tool`] backed by an executable on disk
///
/// The tool's name is the name it was requested under, which may differ
/// from the program's file name when an alias is configured.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    name: String,
    program: PathBuf,
}

impl ExternalTool {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
        }
    }
}

impl Tool for ExternalTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, args: &[String], channels: &Channels) -> Result<i32> {
        tracing::debug!(program = %self.program.display(), "Spawning process");
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Launch {
                name: self.name.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Both pipes are drained concurrently so neither can fill up and
        // block the child
        let copied = thread::scope(|scope| {
            let errors = scope.spawn(|| forward(stderr, channels.err()));
            let output = forward(stdout, channels.out());
            let errors = errors
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stderr forwarding panicked")));
            output.and(errors)
        });

        if copied.is_err() {
            // Nobody reads the pipes any more
            let _ = child.kill();
        }
        let status = child.wait()?;
        copied?;

        // Killed by a signal: no exit code
        Ok(status.code().unwrap_or(-1))
    }
}

/// Copy a child pipe into a channel chunk by chunk until EOF
fn forward(pipe: Option<impl Read>, mut sink: impl Write) -> io::Result<()> {
    let Some(mut pipe) = pipe else {
        return Ok(());
    };
    let mut buf = [0u8; 8192];
    loop {
        match pipe.read(&mut buf) {
            Ok(0) => return sink.flush(),
            Ok(n) => sink.write_all(&buf[..n])?,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}
