//! Stream view handed out by [`super::Payload::input`].

use std::fmt;
use std::io::{self, Read};

/// Reader over payload content. Borrows the payload, so the payload stays
/// open for as long as the stream is in use.
///
/// Errors from the underlying source are returned unchanged.
pub struct PayloadInput<'a> {
    reader: &'a mut (dyn Read + Send),
    bytes_read: u64,
}

impl<'a> PayloadInput<'a> {
    pub(super) fn new(reader: &'a mut (dyn Read + Send)) -> Self {
        Self {
            reader,
            bytes_read: 0,
        }
    }

    /// Number of bytes read through this stream so far.
    #[must_use]
    pub const fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl Read for PayloadInput<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.reader.read(buf)?;
        self.bytes_read = self
            .bytes_read
            .saturating_add(u64::try_from(read).unwrap_or(u64::MAX));
        Ok(read)
    }
}

impl fmt::Debug for PayloadInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadInput")
            .field("bytes_read", &self.bytes_read)
            .finish_non_exhaustive()
    }
}
