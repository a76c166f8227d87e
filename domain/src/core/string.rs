//! String utilities for the domain layer.

/// Marker that starts every trace line written by a runner
pub const TRACE_MARKER: &str = "|";

/// Render a tool invocation as a single trace line.
///
/// The tool name and each argument are joined by single spaces and
/// prefixed with [`TRACE_MARKER`]. No trailing space is emitted when
/// there are no arguments.
pub fn trace_line<S: AsRef<str>>(name: &str, args: &[S]) -> String {
    let mut line = format!("{} {}", TRACE_MARKER, name);
    for arg in args {
        line.push(' ');
        line.push_str(arg.as_ref());
    }
    line
}
