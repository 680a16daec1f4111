//! Reader-factory source.

use std::fmt;
use std::io::{self, Read};

use super::{ContentSource, RawContent};
use crate::error::PayloadError;

/// Factory that produces a fresh reader over the same content on each call.
pub type ReaderSupplier = Box<dyn FnMut() -> io::Result<Box<dyn Read + Send>> + Send>;

/// Repeatable source that asks a [`ReaderSupplier`] for a new reader on every
/// open. The previous reader is dropped first. The factory is not exposed
/// through [`ContentSource::raw_object`].
pub struct SupplierSource {
    supplier: ReaderSupplier,
    current: Option<Box<dyn Read + Send>>,
}

impl SupplierSource {
    /// Wraps the given reader factory.
    #[must_use]
    pub fn new<F, R>(mut supplier: F) -> Self
    where
        F: FnMut() -> io::Result<R> + Send + 'static,
        R: Read + Send + 'static,
    {
        Self {
            supplier: Box::new(move || {
                supplier().map(|reader| Box::new(reader) as Box<dyn Read + Send>)
            }),
            current: None,
        }
    }
}

impl fmt::Debug for SupplierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplierSource")
            .field("open", &self.current.is_some())
            .finish_non_exhaustive()
    }
}

impl ContentSource for SupplierSource {
    fn open(&mut self) -> Result<&mut (dyn Read + Send), PayloadError> {
        self.current = None;
        let reader = (self.supplier)()?;
        Ok(&mut **self.current.insert(reader))
    }

    fn is_repeatable(&self) -> bool {
        true
    }

    fn release(&mut self) -> io::Result<()> {
        self.current = None;
        Ok(())
    }

    fn raw_content(&self) -> RawContent<'_> {
        RawContent::Supplier
    }
}
