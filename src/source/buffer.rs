//! In-memory buffer source.

use std::any::Any;
use std::io::{self, Cursor, Read};

use bytes::Bytes;

use super::{ContentSource, RawContent};
use crate::error::PayloadError;

/// Repeatable source over an in-memory buffer. Each open starts a fresh
/// cursor at offset zero; the buffer itself is shared, never copied.
#[derive(Clone, Debug)]
pub struct ByteSource {
    bytes: Bytes,
    cursor: Option<Cursor<Bytes>>,
}

impl ByteSource {
    /// Wraps the given buffer.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            cursor: None,
        }
    }

    /// Returns the wrapped buffer.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

impl ContentSource for ByteSource {
    fn open(&mut self) -> Result<&mut (dyn Read + Send), PayloadError> {
        Ok(self.cursor.insert(Cursor::new(self.bytes.clone())))
    }

    fn is_repeatable(&self) -> bool {
        true
    }

    fn release(&mut self) -> io::Result<()> {
        self.cursor = None;
        Ok(())
    }

    fn raw_content(&self) -> RawContent<'_> {
        RawContent::Bytes(&self.bytes)
    }

    fn raw_object(&self) -> Option<&(dyn Any + Send)> {
        Some(&self.bytes)
    }

    fn known_length(&self) -> io::Result<Option<u64>> {
        Ok(u64::try_from(self.bytes.len()).ok())
    }
}
