//! Ready-made error types for block sources.

use core::{error, fmt};

/// The error of block sources drawing from an exhaustible reserve.
///
/// Sources with richer failure modes are free to declare their own error type instead; the arena propagates
/// whichever error type its source declares, unmodified.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutOfMemory {
    /// Number of bytes the failed request asked of the underlying source.
    pub requested: usize,
}

impl fmt::Display for OutOfMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block source exhausted: requested {} bytes", self.requested)
    }
}

impl error::Error for OutOfMemory {}

#[cfg(test)]
mod tests {

use super::*;

#[test]
fn out_of_memory_display() {
    let error = OutOfMemory { requested: 4096 };

    let mut buffer = [0u8; 64];
    let mut writer = Writer { buffer: &mut buffer, written: 0 };

    fmt::write(&mut writer, format_args!("{}", error)).unwrap();

    assert_eq!(&b"block source exhausted: requested 4096 bytes"[..], writer.bytes());
}

struct Writer<'a> {
    buffer: &'a mut [u8],
    written: usize,
}

impl Writer<'_> {
    fn bytes(&self) -> &[u8] { &self.buffer[..self.written] }
}

impl fmt::Write for Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();

        if self.written + bytes.len() > self.buffer.len() {
            return Err(fmt::Error);
        }

        self.buffer[self.written..self.written + bytes.len()].copy_from_slice(bytes);
        self.written += bytes.len();

        Ok(())
    }
}

} // mod tests
