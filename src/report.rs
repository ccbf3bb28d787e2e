//! Human-readable console output.
//!
//! Operators read the result of each command from stdout, one line per step, prefixed with
//! a severity tag such as `[OK]` or `[ERROR]`. Structured diagnostics go through `tracing`
//! instead.

use std::fmt;
use std::io::{self, Write};

/// Severity tag printed in front of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress information.
    Info,
    /// A step completed successfully.
    Ok,
    /// Something unexpected that did not stop the command.
    Warn,
    /// A failed step.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Info => "[INFO]",
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Error => "[ERROR]",
        };
        f.write_str(tag)
    }
}

/// Line-oriented writer for command reports.
///
/// Write failures are ignored; a closed stdout must not change the outcome of a command.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    /// Reporter bound to the process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    /// Wrap an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Emit a tagged line.
    pub fn emit(&mut self, level: Level, message: impl fmt::Display) {
        let _ = writeln!(self.out, "{level} {message}");
    }

    /// Emit an untagged line.
    pub fn line(&mut self, message: impl fmt::Display) {
        let _ = writeln!(self.out, "{message}");
    }

    /// Emit an empty separator line.
    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// Emit an `[INFO]` line.
    pub fn info(&mut self, message: impl fmt::Display) {
        self.emit(Level::Info, message);
    }

    /// Emit an `[OK]` line.
    pub fn ok(&mut self, message: impl fmt::Display) {
        self.emit(Level::Ok, message);
    }

    /// Emit a `[WARN]` line.
    pub fn warn(&mut self, message: impl fmt::Display) {
        self.emit(Level::Warn, message);
    }

    /// Emit an `[ERROR]` line.
    pub fn error(&mut self, message: impl fmt::Display) {
        self.emit(Level::Error, message);
    }

    /// Consume the reporter and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render an optional counter, using `n/a` when the server omitted it.
pub fn format_count(value: Option<u64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |count| count.to_string())
}
