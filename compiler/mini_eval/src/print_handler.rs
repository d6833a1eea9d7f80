//! Output sink for the `print` builtin.
//!
//! The CLI writes to stdout; tests capture into a buffer; embedders that
//! only want the result can discard output. Enum dispatch keeps the hot
//! path free of vtable calls.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Where printed lines go.
pub enum PrintHandler {
    /// Write each line to stdout.
    Stdout,
    /// Append each line to an in-memory buffer.
    Buffer(Mutex<String>),
    /// Drop all output.
    Silent,
}

impl PrintHandler {
    /// Write `line` followed by a newline.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Self::Buffer(buffer) => {
                let mut buf = buffer.lock();
                buf.push_str(line);
                buf.push('\n');
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    /// Captured output so far. Empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }
}

/// Handler shared between an interpreter and whoever reads its output.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_captures_lines() {
        let handler = buffer_handler();
        handler.write_line("1 2").unwrap();
        handler.write_line("[3]").unwrap();
        assert_eq!(handler.output(), "1 2\n[3]\n");
    }

    #[test]
    fn silent_discards() {
        let handler = silent_handler();
        handler.write_line("ignored").unwrap();
        assert_eq!(handler.output(), "");
    }
}
