//! Content sources that back a [`crate::Payload`].
//!
//! A source is anything that can produce a byte stream, report whether it can
//! do so more than once, and free whatever it opened while doing so. The
//! payload drives every source through [`ContentSource`], so buffers, files,
//! one-shot readers and reader factories are interchangeable.

mod buffer;
mod file;
mod stream;
mod supplier;

use std::any::Any;
use std::fmt;
use std::io::{self, Read};

use bytes::Bytes;
use camino::Utf8Path;

use crate::error::PayloadError;

pub use buffer::ByteSource;
pub use file::FileSource;
pub use stream::StreamSource;
pub use supplier::{ReaderSupplier, SupplierSource};

/// Capability set implemented by every payload backing source.
pub trait ContentSource: fmt::Debug + Send {
    /// Opens a stream over the content and returns a reader owned by the
    /// source. The reader stays valid until the next call to `open` or
    /// [`ContentSource::release`].
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::AlreadyConsumed`] when a non-repeatable source
    /// has already been opened, and [`PayloadError::Io`] when the underlying
    /// resource cannot be opened.
    fn open(&mut self) -> Result<&mut (dyn Read + Send), PayloadError>;

    /// Reports whether [`ContentSource::open`] can be called repeatedly and
    /// yield the same bytes each time.
    fn is_repeatable(&self) -> bool;

    /// Frees every handle the source opened. Must tolerate being called when
    /// nothing was opened.
    ///
    /// # Errors
    ///
    /// Returns the close failure, which the payload logs and discards.
    fn release(&mut self) -> io::Result<()>;

    /// Returns the content in its original form.
    fn raw_content(&self) -> RawContent<'_> {
        RawContent::Opaque
    }

    /// Returns the object the source was built from, for callers that know
    /// its concrete type and downcast it. `None` when the source no longer
    /// holds it or has nothing meaningful to expose.
    fn raw_object(&self) -> Option<&(dyn Any + Send)> {
        None
    }

    /// Returns the length of the content when the source knows it without
    /// reading.
    ///
    /// # Errors
    ///
    /// Returns an error when looking the length up requires I/O that fails.
    fn known_length(&self) -> io::Result<Option<u64>> {
        Ok(None)
    }
}

/// View of the object a payload was built from, for callers that can take a
/// source-specific shortcut (for example uploading a file directly).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum RawContent<'a> {
    /// In-memory buffer.
    Bytes(&'a Bytes),
    /// File on the local filesystem.
    File(&'a Utf8Path),
    /// One-shot reader supplied by the caller.
    Stream,
    /// Factory producing a fresh reader per request.
    Supplier,
    /// Caller-defined source with no shortcut.
    Opaque,
}
