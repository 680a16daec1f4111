//! One-shot reader source.

use std::any::Any;
use std::fmt;
use std::io::{self, Read};

use super::{ContentSource, RawContent};
use crate::error::PayloadError;

/// Non-repeatable source over a caller-supplied reader.
///
/// The payload takes ownership of the reader and drops it on release. Only
/// the first open succeeds; later opens fail with
/// [`PayloadError::AlreadyConsumed`] whether or not the first stream was
/// read to the end. Until release the reader stays reachable through
/// [`ContentSource::raw_object`].
pub struct StreamSource<R> {
    reader: Option<R>,
    opened: bool,
}

impl<R> StreamSource<R> {
    /// Wraps the given reader.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            opened: false,
        }
    }

    /// Returns `true` once the stream has been handed out.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        self.opened
    }
}

impl<R> fmt::Debug for StreamSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSource")
            .field("held", &self.reader.is_some())
            .field("opened", &self.opened)
            .finish()
    }
}

impl<R> ContentSource for StreamSource<R>
where
    R: Read + Send + 'static,
{
    fn open(&mut self) -> Result<&mut (dyn Read + Send), PayloadError> {
        if self.opened {
            return Err(PayloadError::AlreadyConsumed);
        }
        let reader = self.reader.as_mut().ok_or(PayloadError::Released)?;
        self.opened = true;
        Ok(reader)
    }

    fn is_repeatable(&self) -> bool {
        false
    }

    fn release(&mut self) -> io::Result<()> {
        self.reader = None;
        Ok(())
    }

    fn raw_content(&self) -> RawContent<'_> {
        RawContent::Stream
    }

    fn raw_object(&self) -> Option<&(dyn Any + Send)> {
        self.reader.as_ref().map(|reader| reader as &(dyn Any + Send))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn second_open_is_rejected_even_after_partial_read() {
        let mut source = StreamSource::new(Cursor::new(b"payload".to_vec()));
        let mut first = [0_u8; 3];
        source
            .open()
            .unwrap_or_else(|err| panic!("first open: {err}"))
            .read_exact(&mut first)
            .unwrap_or_else(|err| panic!("partial read: {err}"));

        let Err(err) = source.open() else {
            panic!("second open should fail");
        };
        assert!(matches!(err, PayloadError::AlreadyConsumed), "got {err}");
        assert!(source.is_consumed());
    }

    #[test]
    fn release_before_open_prevents_reading() {
        let mut source = StreamSource::new(io::empty());
        source.release().unwrap_or_else(|err| panic!("release: {err}"));

        let Err(err) = source.open() else {
            panic!("released stream cannot open");
        };
        assert!(matches!(err, PayloadError::Released), "got {err}");
    }

    #[test]
    fn raw_object_exposes_the_reader_until_release() {
        let mut source = StreamSource::new(Cursor::new(b"raw".to_vec()));
        let reader = source
            .raw_object()
            .and_then(|object| object.downcast_ref::<Cursor<Vec<u8>>>())
            .unwrap_or_else(|| panic!("reader should downcast"));
        assert_eq!(reader.get_ref(), b"raw");

        source.release().unwrap_or_else(|err| panic!("release: {err}"));
        assert!(source.raw_object().is_none());
    }

    #[test]
    fn is_not_repeatable() {
        let source = StreamSource::new(io::empty());
        assert!(!source.is_repeatable());
        assert_eq!(source.raw_content(), RawContent::Stream);
    }
}
