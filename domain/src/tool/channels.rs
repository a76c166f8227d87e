//! Output and error channels shared by a whole call tree.
//!
//! A [`Channels`] value is a pair of append-only sinks. Cloning it clones the
//! handles, not the sinks, so the top-level runner and every nested runner
//! created by a composite tool write to the same underlying streams.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// A sink that can be written from any runner in the call tree
pub type SharedSink = Arc<Mutex<dyn Write + Send>>;

/// Standard output and standard error for tool invocations
#[derive(Clone)]
pub struct Channels {
    out: SharedSink,
    err: SharedSink,
}

impl Channels {
    /// Wrap two writers as channels
    pub fn new(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        let out: SharedSink = Arc::new(Mutex::new(out));
        let err: SharedSink = Arc::new(Mutex::new(err));
        Self { out, err }
    }

    /// Channels bound to the process' stdout and stderr
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    /// In-memory channels, plus a handle to read back what was written
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        let out: SharedSink = captured.out.clone();
        let err: SharedSink = captured.err.clone();
        (Self { out, err }, captured)
    }

    /// Writer for the output channel
    pub fn out(&self) -> Sink {
        Sink {
            inner: Arc::clone(&self.out),
        }
    }

    /// Writer for the error channel
    pub fn err(&self) -> Sink {
        Sink {
            inner: Arc::clone(&self.err),
        }
    }

    /// Write one line to the output channel in a single locked write
    pub fn println(&self, line: &str) -> io::Result<()> {
        let mut sink = lock(&self.out)?;
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")
    }

    /// Write one line to the error channel in a single locked write
    pub fn eprintln(&self, line: &str) -> io::Result<()> {
        let mut sink = lock(&self.err)?;
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")
    }

    /// Flush both channels
    pub fn flush(&self) -> io::Result<()> {
        lock(&self.out)?.flush()?;
        lock(&self.err)?.flush()
    }
}

impl fmt::Debug for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channels").finish_non_exhaustive()
    }
}

/// A [`Write`] handle onto one channel
pub struct Sink {
    inner: SharedSink,
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.inner)?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        lock(&self.inner)?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.inner)?.flush()
    }
}

fn lock(sink: &SharedSink) -> io::Result<MutexGuard<'_, dyn Write + Send + 'static>> {
    sink.lock().map_err(|_| io::Error::other("channel lock poisoned"))
}

/// Read side of [`Channels::capture`]
#[derive(Clone, Default)]
pub struct Captured {
    out: Arc<Mutex<Vec<u8>>>,
    err: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    /// Everything written to the output channel so far
    pub fn stdout(&self) -> String {
        read(&self.out)
    }

    /// Everything written to the error channel so far
    pub fn stderr(&self) -> String {
        read(&self.err)
    }

    /// Output channel contents split into lines
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout().lines().map(str::to_string).collect()
    }
}

fn read(buffer: &Mutex<Vec<u8>>) -> String {
    buffer
        .lock()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_both_channels() {
        let (channels, captured) = Channels::capture();
        channels.println("to out").unwrap();
        channels.eprintln("to err").unwrap();

        assert_eq!(captured.stdout(), "to out\n");
        assert_eq!(captured.stderr(), "to err\n");
    }

    #[test]
    fn test_clones_share_the_same_sinks() {
        let (channels, captured) = Channels::capture();
        let nested = channels.clone();

        channels.println("first").unwrap();
        writeln!(nested.out(), "second").unwrap();
        channels.println("third").unwrap();

        assert_eq!(captured.stdout_lines(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sink_writes_through() {
        let (channels, captured) = Channels::capture();
        let mut err = channels.err();
        err.write_all(b"warning: unused\n").unwrap();
        err.flush().unwrap();

        assert_eq!(captured.stderr(), "warning: unused\n");
        assert!(captured.stdout().is_empty());
    }
}
