//! Shared fixtures for payload BDD scenarios.
//!
//! Payloads are not `Clone`, so the scenario context keeps the payload and
//! the recorded read outcomes behind a shared cell that every step borrows.

use std::cell::RefCell;
use std::io::{self, Read};
use std::rc::Rc;

use cloudpayload::{Payload, PayloadError};
use rstest::fixture;
use thiserror::Error;

/// Result of one attempt to read the whole payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadOutcome {
    Content(Vec<u8>),
    Released,
    AlreadyConsumed,
    Io { kind: io::ErrorKind, message: String },
    Other(String),
}

impl From<PayloadError> for ReadOutcome {
    fn from(value: PayloadError) -> Self {
        match value {
            PayloadError::Released => Self::Released,
            PayloadError::AlreadyConsumed => Self::AlreadyConsumed,
            PayloadError::Io(err) => Self::from(err),
            PayloadError::Precondition(_) => Self::Other(value.to_string()),
        }
    }
}

impl From<io::Error> for ReadOutcome {
    fn from(value: io::Error) -> Self {
        Self::Io {
            kind: value.kind(),
            message: value.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error("no payload installed; add a Given step that builds one")]
    MissingPayload,
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[derive(Debug, Default)]
struct PayloadState {
    payload: Option<Payload>,
    reads: Vec<ReadOutcome>,
}

#[derive(Clone, Debug, Default)]
pub struct PayloadContext {
    state: Rc<RefCell<PayloadState>>,
}

impl PayloadContext {
    pub fn install(&self, payload: Payload) {
        self.state.borrow_mut().payload = Some(payload);
    }

    pub fn with_payload<T>(&self, f: impl FnOnce(&mut Payload) -> T) -> Result<T, StepError> {
        let mut state = self.state.borrow_mut();
        let payload = state.payload.as_mut().ok_or(StepError::MissingPayload)?;
        Ok(f(payload))
    }

    /// Reads the whole payload and records what happened.
    pub fn read_once(&self) -> Result<(), StepError> {
        let outcome = self.with_payload(|payload| {
            let mut content = Vec::new();
            match payload.input() {
                Ok(mut input) => match input.read_to_end(&mut content) {
                    Ok(_) => ReadOutcome::Content(content),
                    Err(err) => ReadOutcome::from(err),
                },
                Err(err) => ReadOutcome::from(err),
            }
        })?;
        self.state.borrow_mut().reads.push(outcome);
        Ok(())
    }

    pub fn reads(&self) -> Vec<ReadOutcome> {
        self.state.borrow().reads.clone()
    }

    pub fn last_read(&self) -> Result<ReadOutcome, StepError> {
        self.state
            .borrow()
            .reads
            .last()
            .cloned()
            .ok_or_else(|| StepError::Assertion(String::from("no read was attempted")))
    }
}

#[fixture]
pub fn payload_context() -> PayloadContext {
    PayloadContext::default()
}
