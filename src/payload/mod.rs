//! The [`Payload`] wrapper: content source, metadata and lifecycle.
//!
//! A payload is open until [`Payload::release`] runs, either explicitly or
//! when the payload is dropped. Streams borrow the payload mutably, so a
//! payload cannot be released, or read twice at once, while a stream handed
//! out by it is still alive. Payloads are not meant to be shared between
//! threads for concurrent consumption.

mod builder;
mod input;

use std::any::Any;
use std::io::{self, Read, Write};

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::error::PayloadError;
use crate::metadata::{ContentMetadata, MD5_DIGEST_LEN};
use crate::source::{
    ByteSource, ContentSource, FileSource, RawContent, StreamSource, SupplierSource,
};

pub use builder::PayloadBuilder;
pub use input::PayloadInput;

/// Chunk size used by [`Payload::write_to`] and [`Payload::write_to_async`]
/// unless configured otherwise.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Largest chunk size a payload accepts for its copy buffer.
pub const MAX_COPY_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Content plus descriptive metadata, scoped to an explicit lifecycle.
#[derive(Debug)]
pub struct Payload {
    source: Box<dyn ContentSource>,
    metadata: ContentMetadata,
    copy_buffer_size: usize,
    consumed: bool,
    released: bool,
}

impl Payload {
    /// Wraps any [`ContentSource`] with empty metadata.
    #[must_use]
    pub fn new(source: impl ContentSource + 'static) -> Self {
        Self::from_parts(Box::new(source), ContentMetadata::new(), DEFAULT_COPY_BUFFER_SIZE)
    }

    /// Wraps an in-memory buffer. The payload is repeatable.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::new(ByteSource::new(bytes))
    }

    /// Wraps a file path. The payload is repeatable and the file is opened
    /// lazily.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Precondition`] when the path is blank.
    pub fn from_file(path: impl AsRef<str>) -> Result<Self, PayloadError> {
        Ok(Self::new(FileSource::new(path)?))
    }

    /// Wraps a one-shot reader. The payload is not repeatable.
    #[must_use]
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self::new(StreamSource::new(reader))
    }

    /// Wraps a reader factory. The payload is repeatable.
    #[must_use]
    pub fn from_supplier<F, R>(supplier: F) -> Self
    where
        F: FnMut() -> io::Result<R> + Send + 'static,
        R: Read + Send + 'static,
    {
        Self::new(SupplierSource::new(supplier))
    }

    /// Starts a [`PayloadBuilder`].
    #[must_use]
    pub fn builder() -> PayloadBuilder {
        PayloadBuilder::new()
    }

    pub(crate) fn from_parts(
        source: Box<dyn ContentSource>,
        metadata: ContentMetadata,
        copy_buffer_size: usize,
    ) -> Self {
        Self {
            source,
            metadata,
            copy_buffer_size,
            consumed: false,
            released: false,
        }
    }

    /// Opens a stream over the content.
    ///
    /// Repeatable payloads start a fresh stream from the beginning on each
    /// call. Non-repeatable payloads hand out exactly one stream; every later
    /// call fails with [`PayloadError::AlreadyConsumed`], however much of the
    /// first stream was read.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Released`] after release,
    /// [`PayloadError::AlreadyConsumed`] on a second call against a
    /// non-repeatable payload, and [`PayloadError::Io`] when the source
    /// cannot be opened.
    pub fn input(&mut self) -> Result<PayloadInput<'_>, PayloadError> {
        self.ensure_readable()?;
        debug!(repeatable = self.source.is_repeatable(), "opening payload stream");
        let reader = self.source.open()?;
        self.consumed = true;
        Ok(PayloadInput::new(reader))
    }

    /// Opens a stream and also hands back the metadata so it can be updated
    /// while the stream is read.
    ///
    /// # Errors
    ///
    /// Fails exactly as [`Payload::input`] does.
    pub fn input_with_metadata(
        &mut self,
    ) -> Result<(PayloadInput<'_>, &mut ContentMetadata), PayloadError> {
        self.ensure_readable()?;
        debug!(repeatable = self.source.is_repeatable(), "opening payload stream");
        let reader = self.source.open()?;
        self.consumed = true;
        Ok((PayloadInput::new(reader), &mut self.metadata))
    }

    /// Pushes the full content into `sink`, flushes it, and returns the
    /// number of bytes written. Consumes the source exactly as
    /// [`Payload::input`] does.
    ///
    /// # Errors
    ///
    /// Fails as [`Payload::input`] does, and with [`PayloadError::Io`] when
    /// reading the source or writing the sink fails.
    pub fn write_to<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<u64, PayloadError> {
        let buffer_size = self.copy_buffer_size;
        let mut input = self.input()?;
        let written = copy_chunks(&mut input, sink, buffer_size)?;
        debug!(bytes = written, "payload written to sink");
        Ok(written)
    }

    /// Async counterpart of [`Payload::write_to`] for non-blocking sinks.
    ///
    /// Reads from the source still block; only the sink is driven
    /// asynchronously.
    ///
    /// # Errors
    ///
    /// Fails as [`Payload::write_to`] does.
    pub async fn write_to_async<W>(&mut self, sink: &mut W) -> Result<u64, PayloadError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut buffer = vec![0_u8; self.copy_buffer_size.max(1)];
        let mut input = self.input()?;
        let mut written: u64 = 0;
        loop {
            let read = match input.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            sink.write_all(buffer.get(..read).unwrap_or_default()).await?;
            written = written.saturating_add(to_u64(read));
        }
        sink.flush().await?;
        debug!(bytes = written, "payload written to async sink");
        Ok(written)
    }

    /// Returns the content in the form it was supplied.
    #[must_use]
    pub fn raw_content(&self) -> RawContent<'_> {
        self.source.raw_content()
    }

    /// Returns the object the payload was built from, ready to downcast:
    /// the [`Bytes`] buffer, the file path as a `camino::Utf8PathBuf`, the
    /// reader handed to [`Payload::from_reader`] until release, or whatever a
    /// custom source exposes.
    #[must_use]
    pub fn raw_object(&self) -> Option<&(dyn Any + Send)> {
        self.source.raw_object()
    }

    /// Reports whether the content can be read more than once.
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        self.source.is_repeatable()
    }

    /// Reports whether a stream has been handed out at least once.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Reports whether [`Payload::release`] has run.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Chunk size used when pushing content into a sink.
    #[must_use]
    pub const fn copy_buffer_size(&self) -> usize {
        self.copy_buffer_size
    }

    /// Returns the metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ContentMetadata {
        &self.metadata
    }

    /// Returns the metadata for in-place updates.
    pub const fn metadata_mut(&mut self) -> &mut ContentMetadata {
        &mut self.metadata
    }

    /// Replaces all metadata at once.
    pub fn set_metadata(&mut self, metadata: ContentMetadata) {
        self.metadata = metadata;
    }

    /// Returns the declared length in bytes.
    #[must_use]
    pub const fn content_length(&self) -> Option<u64> {
        self.metadata.content_length()
    }

    /// Declares the length in bytes. Not verified against the content.
    pub const fn set_content_length(&mut self, value: Option<u64>) {
        self.metadata.set_content_length(value);
    }

    /// Returns the MD5 digest supplied by the caller.
    #[must_use]
    pub const fn content_md5(&self) -> Option<[u8; MD5_DIGEST_LEN]> {
        self.metadata.content_md5()
    }

    /// Stores an MD5 digest. Nothing is computed.
    pub const fn set_content_md5(&mut self, value: Option<[u8; MD5_DIGEST_LEN]>) {
        self.metadata.set_content_md5(value);
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.metadata.content_type()
    }

    /// Sets the MIME type.
    pub fn set_content_type(&mut self, value: Option<String>) {
        self.metadata.set_content_type(value);
    }

    /// Returns the content disposition.
    #[must_use]
    pub fn content_disposition(&self) -> Option<&str> {
        self.metadata.content_disposition()
    }

    /// Sets the content disposition.
    pub fn set_content_disposition(&mut self, value: Option<String>) {
        self.metadata.set_content_disposition(value);
    }

    /// Returns the content language.
    #[must_use]
    pub fn content_language(&self) -> Option<&str> {
        self.metadata.content_language()
    }

    /// Sets the content language.
    pub fn set_content_language(&mut self, value: Option<String>) {
        self.metadata.set_content_language(value);
    }

    /// Returns the content encoding.
    #[must_use]
    pub fn content_encoding(&self) -> Option<&str> {
        self.metadata.content_encoding()
    }

    /// Sets the content encoding.
    pub fn set_content_encoding(&mut self, value: Option<String>) {
        self.metadata.set_content_encoding(value);
    }

    /// Copies the length the source already knows into the declared content
    /// length and returns it. Leaves the metadata alone when the source
    /// cannot tell.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Released`] after release and
    /// [`PayloadError::Io`] when the length lookup fails.
    pub fn declare_source_length(&mut self) -> Result<Option<u64>, PayloadError> {
        self.ensure_open()?;
        let length = self.source.known_length()?;
        if length.is_some() {
            self.metadata.set_content_length(length);
        }
        Ok(length)
    }

    /// Frees every handle opened on behalf of this payload.
    ///
    /// Safe to call any number of times and from cleanup paths; close
    /// failures are logged and discarded.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = self.source.release() {
            warn!(error = %err, "failed to release payload source");
        }
        debug!("payload released");
    }

    const fn ensure_open(&self) -> Result<(), PayloadError> {
        if self.released {
            return Err(PayloadError::Released);
        }
        Ok(())
    }

    fn ensure_readable(&self) -> Result<(), PayloadError> {
        self.ensure_open()?;
        if self.consumed && !self.source.is_repeatable() {
            return Err(PayloadError::AlreadyConsumed);
        }
        Ok(())
    }
}

impl Drop for Payload {
    fn drop(&mut self) {
        self.release();
    }
}

fn copy_chunks<R, W>(reader: &mut R, sink: &mut W, buffer_size: usize) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0_u8; buffer_size.max(1)];
    let mut written: u64 = 0;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        sink.write_all(buffer.get(..read).unwrap_or_default())?;
        written = written.saturating_add(to_u64(read));
    }
    sink.flush()?;
    Ok(written)
}

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
