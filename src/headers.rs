//! Wire headers derived from payload metadata.
//!
//! Transport code uses [`TransportHeaders`] to turn [`ContentMetadata`] into
//! request or response headers. Unset fields and fields the target provider
//! does not accept are dropped silently.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::Payload;
use crate::config::PayloadConfig;
use crate::metadata::ContentMetadata;

/// Content headers a payload can populate.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum HeaderName {
    /// `Content-Length`.
    ContentLength,
    /// `Content-MD5`.
    ContentMd5,
    /// `Content-Type`.
    ContentType,
    /// `Content-Disposition`.
    ContentDisposition,
    /// `Content-Language`.
    ContentLanguage,
    /// `Content-Encoding`.
    ContentEncoding,
}

impl HeaderName {
    /// Returns the canonical header name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentLength => "Content-Length",
            Self::ContentMd5 => "Content-MD5",
            Self::ContentType => "Content-Type",
            Self::ContentDisposition => "Content-Disposition",
            Self::ContentLanguage => "Content-Language",
            Self::ContentEncoding => "Content-Encoding",
        }
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional headers a provider accepts. `Content-Length` and `Content-Type`
/// are always emitted when known.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per optional header keeps provider capability tables readable"
)]
pub struct HeaderSupport {
    /// Emit `Content-MD5`.
    pub content_md5: bool,
    /// Emit `Content-Disposition`.
    pub content_disposition: bool,
    /// Emit `Content-Language`.
    pub content_language: bool,
    /// Emit `Content-Encoding`.
    pub content_encoding: bool,
}

impl HeaderSupport {
    /// Provider that accepts every optional header.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            content_md5: true,
            content_disposition: true,
            content_language: true,
            content_encoding: true,
        }
    }

    /// Provider that accepts none of the optional headers.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            content_md5: false,
            content_disposition: false,
            content_language: false,
            content_encoding: false,
        }
    }
}

impl Default for HeaderSupport {
    fn default() -> Self {
        Self::all()
    }
}

/// Ordered set of content headers ready to be written to the wire.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TransportHeaders {
    entries: Vec<(HeaderName, String)>,
}

impl TransportHeaders {
    /// Derives headers from metadata. `default_content_type` fills
    /// `Content-Type` when the metadata leaves it unset.
    #[must_use]
    pub fn from_metadata(
        metadata: &ContentMetadata,
        support: HeaderSupport,
        default_content_type: Option<&str>,
    ) -> Self {
        let mut entries = Vec::new();

        if let Some(length) = metadata.content_length() {
            entries.push((HeaderName::ContentLength, length.to_string()));
        }
        if support.content_md5
            && let Some(digest) = metadata.content_md5()
        {
            entries.push((HeaderName::ContentMd5, STANDARD.encode(digest)));
        }
        if let Some(content_type) = metadata.content_type().or(default_content_type) {
            entries.push((HeaderName::ContentType, content_type.to_owned()));
        }

        let optional = [
            (
                support.content_disposition,
                HeaderName::ContentDisposition,
                metadata.content_disposition(),
            ),
            (
                support.content_language,
                HeaderName::ContentLanguage,
                metadata.content_language(),
            ),
            (
                support.content_encoding,
                HeaderName::ContentEncoding,
                metadata.content_encoding(),
            ),
        ];
        for (enabled, name, value) in optional {
            if let (true, Some(value)) = (enabled, value) {
                entries.push((name, value.to_owned()));
            }
        }

        Self { entries }
    }

    /// Derives headers for a payload using configured defaults and provider
    /// support.
    #[must_use]
    pub fn for_payload(payload: &Payload, config: &PayloadConfig) -> Self {
        Self::from_metadata(
            payload.metadata(),
            config.header_support(),
            Some(config.default_content_type.as_str()),
        )
    }

    /// Returns the value of `name`, if emitted.
    #[must_use]
    pub fn get(&self, name: HeaderName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates headers in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    /// Number of headers emitted.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no header was emitted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns headers keyed by canonical name, suitable for serialisation.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect()
    }
}
