//! Test doubles shared across unit and integration tests.

use std::any::Any;
use std::io::{self, Cursor, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::PayloadError;
use crate::source::ContentSource;

/// Message carried by errors produced by the doubles in this module.
pub const SIMULATED_FAULT: &str = "simulated source fault";

/// Reader that yields a fixed prefix and then fails, mimicking a connection
/// dropped mid-transfer.
#[derive(Debug)]
pub struct FailingReader {
    prefix: Cursor<Vec<u8>>,
}

impl FailingReader {
    /// Yields `prefix` before failing with [`io::ErrorKind::ConnectionReset`].
    #[must_use]
    pub fn after(prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            prefix: Cursor::new(prefix.into()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.prefix.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, SIMULATED_FAULT)),
            read => Ok(read),
        }
    }
}

/// Sink that accepts up to `limit` bytes and then fails.
#[derive(Debug, Default)]
pub struct FailingWriter {
    /// Bytes accepted before the failure.
    pub accepted: Vec<u8>,
    limit: usize,
}

impl FailingWriter {
    /// Accepts `limit` bytes before failing with
    /// [`io::ErrorKind::BrokenPipe`].
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            accepted: Vec::new(),
            limit,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit.saturating_sub(self.accepted.len());
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, SIMULATED_FAULT));
        }
        let take = room.min(buf.len());
        self.accepted.extend_from_slice(buf.get(..take).unwrap_or_default());
        Ok(take)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Counters observed by a [`TrackedSource`], shared with the test body.
#[derive(Clone, Debug, Default)]
pub struct SourceProbe {
    opens: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl SourceProbe {
    /// Number of times the source was opened.
    #[must_use]
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Number of times the source was asked to release.
    #[must_use]
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

/// Source over a fixed buffer that records opens and releases and can be
/// told to fail on release or to behave as non-repeatable.
#[derive(Debug)]
pub struct TrackedSource {
    content: Vec<u8>,
    reader: Option<Cursor<Vec<u8>>>,
    repeatable: bool,
    fail_release: bool,
    probe: SourceProbe,
}

impl TrackedSource {
    /// Creates a repeatable tracked source and the probe observing it.
    #[must_use]
    pub fn new(content: impl Into<Vec<u8>>) -> (Self, SourceProbe) {
        let probe = SourceProbe::default();
        let source = Self {
            content: content.into(),
            reader: None,
            repeatable: true,
            fail_release: false,
            probe: probe.clone(),
        };
        (source, probe)
    }

    /// Marks the source as non-repeatable. It still reopens on demand,
    /// which lets tests observe that the payload does not rely on the flag.
    #[must_use]
    pub const fn non_repeatable(mut self) -> Self {
        self.repeatable = false;
        self
    }

    /// Makes every release report a close failure.
    #[must_use]
    pub const fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }
}

impl ContentSource for TrackedSource {
    fn open(&mut self) -> Result<&mut (dyn Read + Send), PayloadError> {
        self.probe.opens.fetch_add(1, Ordering::SeqCst);
        Ok(self.reader.insert(Cursor::new(self.content.clone())))
    }

    fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    fn release(&mut self) -> io::Result<()> {
        self.probe.releases.fetch_add(1, Ordering::SeqCst);
        self.reader = None;
        if self.fail_release {
            return Err(io::Error::other(SIMULATED_FAULT));
        }
        Ok(())
    }

    fn raw_object(&self) -> Option<&(dyn Any + Send)> {
        Some(&self.content)
    }
}
