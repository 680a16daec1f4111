//! Core library for content payloads exchanged with cloud providers.
//!
//! A [`Payload`] wraps a byte source (buffer, file, reader, or reader
//! factory) together with the content metadata a transport needs to set its
//! headers, and scopes every handle it opens to an explicit, idempotent
//! release. Provider clients build payloads for uploads and hand them back
//! for downloads; [`TransportHeaders`] turns the metadata into wire headers.

pub mod config;
pub mod error;
pub mod headers;
pub mod metadata;
pub mod payload;
pub mod source;
#[cfg(test)]
pub mod test_helpers;
pub mod test_support;

pub use config::{ConfigError, PayloadConfig};
pub use error::PayloadError;
pub use headers::{HeaderName, HeaderSupport, TransportHeaders};
pub use metadata::{ContentMetadata, MD5_DIGEST_LEN};
pub use payload::{
    DEFAULT_COPY_BUFFER_SIZE, MAX_COPY_BUFFER_SIZE, Payload, PayloadBuilder, PayloadInput,
};
pub use source::{
    ByteSource, ContentSource, FileSource, RawContent, ReaderSupplier, StreamSource,
    SupplierSource,
};
