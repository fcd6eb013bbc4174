//! Where the spinner line is written.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, TryLockError};

use console::Term;

/// Destination for spinner frames.
///
/// Stdout and stderr are looked up on every write so the sink stays cheap to
/// clone into the render thread. `Writer` wraps any shared sink, which is how
/// tests capture rendered bytes.
#[derive(Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl Output {
    /// Wrap an arbitrary writer.
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Output::Writer(Arc::new(Mutex::new(writer)))
    }

    /// Whether the sink is an interactive terminal.
    /// Custom writers are never treated as terminals.
    pub fn is_terminal(&self) -> bool {
        match self {
            Output::Stdout => Term::stdout().is_term(),
            Output::Stderr => Term::stderr().is_term(),
            Output::Writer(_) => false,
        }
    }

    /// Write `text` and flush immediately; frames must never sit in a buffer.
    pub fn write_flush(&self, text: &str) -> io::Result<()> {
        match self {
            Output::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Output::Stderr => {
                let mut out = io::stderr().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Output::Writer(writer) => {
                // A poisoned lock still holds a usable writer
                let mut out = writer.lock().unwrap_or_else(|e| e.into_inner());
                out.write_all(text.as_bytes())?;
                out.flush()
            }
        }
    }

    /// Like `write_flush`, but never waits on the sink.
    ///
    /// Returns `Ok(false)` without writing when a shared writer is locked
    /// elsewhere. Stdout and stderr have no non-blocking lock, so they are
    /// always skipped.
    pub fn try_write_flush(&self, text: &str) -> io::Result<bool> {
        match self {
            Output::Stdout | Output::Stderr => Ok(false),
            Output::Writer(writer) => {
                let mut out = match writer.try_lock() {
                    Ok(out) => out,
                    Err(TryLockError::Poisoned(e)) => e.into_inner(),
                    Err(TryLockError::WouldBlock) => return Ok(false),
                };
                out.write_all(text.as_bytes())?;
                out.flush()?;
                Ok(true)
            }
        }
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Stdout => f.write_str("Stdout"),
            Output::Stderr => f.write_str("Stderr"),
            Output::Writer(_) => f.write_str("Writer"),
        }
    }
}

/// In-memory sink shared between a test and the render thread.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl Capture {
    pub(crate) fn output(&self) -> Output {
        Output::writer(self.clone())
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_receives_text() {
        let capture = Capture::default();
        let output = capture.output();
        output.write_flush("\rhello").unwrap();
        output.write_flush(" world").unwrap();
        assert_eq!(capture.contents(), "\rhello world");
    }

    #[test]
    fn test_try_write_skips_locked_writer() {
        let capture = Capture::default();
        let output = capture.output();
        let Output::Writer(writer) = &output else {
            unreachable!()
        };

        let held = writer.lock().unwrap();
        assert!(!output.try_write_flush("\rblocked").unwrap());
        drop(held);

        assert!(output.try_write_flush("\rfree").unwrap());
        assert_eq!(capture.contents(), "\rfree");
    }

    #[test]
    fn test_try_write_skips_std_streams() {
        assert!(!Output::Stdout.try_write_flush("").unwrap());
        assert!(!Output::Stderr.try_write_flush("").unwrap());
    }

    #[test]
    fn test_custom_writer_is_not_a_terminal() {
        assert!(!Capture::default().output().is_terminal());
    }
}
