//! File-backed source opened through `cap-std`.

use std::any::Any;
use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::File};

use super::{ContentSource, RawContent};
use crate::error::PayloadError;

/// Repeatable source over a file on the local filesystem.
///
/// The path is resolved with ambient authority, so relative paths with `..`
/// and symlinks pointing anywhere are followed. The payload owns only the
/// handles it opens; the file itself is left untouched on release.
#[derive(Debug)]
pub struct FileSource {
    path: Utf8PathBuf,
    handle: Option<File>,
}

impl FileSource {
    /// Wraps the file at `path`, expanding a leading `~/` against `HOME`.
    /// The file is not opened until a stream is requested.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Precondition`] when the path is empty or only
    /// whitespace.
    pub fn new(path: impl AsRef<str>) -> Result<Self, PayloadError> {
        let raw = path.as_ref();
        if raw.trim().is_empty() {
            return Err(PayloadError::Precondition(String::from("path")));
        }
        Ok(Self {
            path: Utf8PathBuf::from(expand_tilde(raw)),
            handle: None,
        })
    }

    /// Returns the expanded path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl ContentSource for FileSource {
    fn open(&mut self) -> Result<&mut (dyn Read + Send), PayloadError> {
        self.handle = None;
        let file = File::open_ambient(&self.path, ambient_authority())?;
        Ok(self.handle.insert(file))
    }

    fn is_repeatable(&self) -> bool {
        true
    }

    fn release(&mut self) -> io::Result<()> {
        self.handle = None;
        Ok(())
    }

    fn raw_content(&self) -> RawContent<'_> {
        RawContent::File(&self.path)
    }

    fn raw_object(&self) -> Option<&(dyn Any + Send)> {
        Some(&self.path)
    }

    fn known_length(&self) -> io::Result<Option<u64>> {
        let file = File::open_ambient(&self.path, ambient_authority())?;
        Ok(Some(file.metadata()?.len()))
    }
}

fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return format!("{}/{rest}", home.to_string_lossy());
    }
    path.to_owned()
}
