//! Console output shared by the formatting workers.
//!
//! Each write takes the stream's lock for one whole message, so output of
//! files formatted in parallel never interleaves within a message.

use std::io::Write;

use parking_lot::Mutex;

/// Standard output and error streams behind locks.
pub struct Printer<O, E> {
    out: Mutex<O>,
    err: Mutex<E>,
}

impl<O: Write, E: Write> Printer<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Printer {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// Write `text` to standard output as is.
    pub fn out(&self, text: &str) {
        let mut out = self.out.lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    /// Write `message` and a newline to standard error.
    pub fn err(&self, message: &str) {
        let mut err = self.err.lock();
        let _ = writeln!(err, "{message}");
    }

    /// Write `text` to standard error as is.
    pub fn err_raw(&self, text: &str) {
        let mut err = self.err.lock();
        let _ = err.write_all(text.as_bytes());
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

#[cfg(test)]
mod tests;
