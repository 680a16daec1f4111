//! Builder for [`super::Payload`].

use std::io::{self, Read};

use bytes::Bytes;

use super::{DEFAULT_COPY_BUFFER_SIZE, MAX_COPY_BUFFER_SIZE, Payload};
use crate::config::PayloadConfig;
use crate::error::PayloadError;
use crate::metadata::{ContentMetadata, MD5_DIGEST_LEN};
use crate::source::{ByteSource, ContentSource, FileSource, StreamSource, SupplierSource};

/// Builder that collects a source and initial metadata, validating on
/// [`PayloadBuilder::build`].
#[derive(Debug, Default)]
pub struct PayloadBuilder {
    source: Option<Box<dyn ContentSource>>,
    metadata: ContentMetadata,
    copy_buffer_size: Option<usize>,
}

impl PayloadBuilder {
    /// Creates a builder with no source and empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a caller-defined source.
    #[must_use]
    pub fn source(mut self, source: impl ContentSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Uses an in-memory buffer.
    #[must_use]
    pub fn bytes(self, bytes: impl Into<Bytes>) -> Self {
        self.source(ByteSource::new(bytes))
    }

    /// Uses a file path.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Precondition`] when the path is blank.
    pub fn file(self, path: impl AsRef<str>) -> Result<Self, PayloadError> {
        Ok(self.source(FileSource::new(path)?))
    }

    /// Uses a one-shot reader.
    #[must_use]
    pub fn reader(self, reader: impl Read + Send + 'static) -> Self {
        self.source(StreamSource::new(reader))
    }

    /// Uses a reader factory.
    #[must_use]
    pub fn supplier<F, R>(self, supplier: F) -> Self
    where
        F: FnMut() -> io::Result<R> + Send + 'static,
        R: Read + Send + 'static,
    {
        self.source(SupplierSource::new(supplier))
    }

    /// Replaces the initial metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: ContentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Declares the content length.
    #[must_use]
    pub const fn content_length(mut self, value: u64) -> Self {
        self.metadata.set_content_length(Some(value));
        self
    }

    /// Stores an MD5 digest.
    #[must_use]
    pub const fn content_md5(mut self, value: [u8; MD5_DIGEST_LEN]) -> Self {
        self.metadata.set_content_md5(Some(value));
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.metadata.set_content_type(Some(value.into()));
        self
    }

    /// Sets the content disposition.
    #[must_use]
    pub fn content_disposition(mut self, value: impl Into<String>) -> Self {
        self.metadata.set_content_disposition(Some(value.into()));
        self
    }

    /// Sets the content language.
    #[must_use]
    pub fn content_language(mut self, value: impl Into<String>) -> Self {
        self.metadata.set_content_language(Some(value.into()));
        self
    }

    /// Sets the content encoding.
    #[must_use]
    pub fn content_encoding(mut self, value: impl Into<String>) -> Self {
        self.metadata.set_content_encoding(Some(value.into()));
        self
    }

    /// Sets the chunk size used when pushing content into a sink.
    #[must_use]
    pub const fn copy_buffer_size(mut self, value: usize) -> Self {
        self.copy_buffer_size = Some(value);
        self
    }

    /// Applies settings from a loaded [`PayloadConfig`].
    #[must_use]
    pub const fn config(self, config: &PayloadConfig) -> Self {
        self.copy_buffer_size(config.copy_buffer_size)
    }

    /// Builds the payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Precondition`] when no source was supplied or
    /// the copy buffer size is zero or above [`MAX_COPY_BUFFER_SIZE`].
    pub fn build(self) -> Result<Payload, PayloadError> {
        let source = self
            .source
            .ok_or_else(|| PayloadError::Precondition(String::from("source")))?;
        let copy_buffer_size = self.copy_buffer_size.unwrap_or(DEFAULT_COPY_BUFFER_SIZE);
        if copy_buffer_size == 0 || copy_buffer_size > MAX_COPY_BUFFER_SIZE {
            return Err(PayloadError::Precondition(String::from("copy_buffer_size")));
        }
        Ok(Payload::from_parts(source, self.metadata, copy_buffer_size))
    }
}
