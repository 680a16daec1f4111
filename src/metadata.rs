//! Descriptive content metadata carried alongside a payload.
//!
//! Every field is optional; absence means "unspecified", never "empty". The
//! values are stored as declared by the caller and are not checked against
//! the actual content.

/// Length of an MD5 digest in bytes.
pub const MD5_DIGEST_LEN: usize = 16;

/// Content metadata used by transports to populate wire headers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContentMetadata {
    content_length: Option<u64>,
    content_md5: Option<[u8; MD5_DIGEST_LEN]>,
    content_type: Option<String>,
    content_disposition: Option<String>,
    content_language: Option<String>,
    content_encoding: Option<String>,
}

impl ContentMetadata {
    /// Creates metadata with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declared length in bytes.
    #[must_use]
    pub const fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Declares the length in bytes. The value is not verified.
    pub const fn set_content_length(&mut self, value: Option<u64>) {
        self.content_length = value;
    }

    /// Returns the MD5 digest, if the caller supplied one.
    #[must_use]
    pub const fn content_md5(&self) -> Option<[u8; MD5_DIGEST_LEN]> {
        self.content_md5
    }

    /// Stores an MD5 digest. Nothing is computed here.
    pub const fn set_content_md5(&mut self, value: Option<[u8; MD5_DIGEST_LEN]>) {
        self.content_md5 = value;
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Sets the MIME type. The syntax is not validated.
    pub fn set_content_type(&mut self, value: Option<String>) {
        self.content_type = value;
    }

    /// Returns the content disposition.
    #[must_use]
    pub fn content_disposition(&self) -> Option<&str> {
        self.content_disposition.as_deref()
    }

    /// Sets the content disposition. Not all providers honour it.
    pub fn set_content_disposition(&mut self, value: Option<String>) {
        self.content_disposition = value;
    }

    /// Returns the content language.
    #[must_use]
    pub fn content_language(&self) -> Option<&str> {
        self.content_language.as_deref()
    }

    /// Sets the content language. Not all providers honour it.
    pub fn set_content_language(&mut self, value: Option<String>) {
        self.content_language = value;
    }

    /// Returns the content encoding.
    #[must_use]
    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Sets the content encoding. Not all providers honour it.
    pub fn set_content_encoding(&mut self, value: Option<String>) {
        self.content_encoding = value;
    }

    /// Returns `true` when no field has been set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content_length.is_none()
            && self.content_md5.is_none()
            && self.content_type.is_none()
            && self.content_disposition.is_none()
            && self.content_language.is_none()
            && self.content_encoding.is_none()
    }
}
