//! BDD step definitions for payload reads, release, and header derivation.

use std::io::{Cursor, ErrorKind};

use cloudpayload::test_support::{FailingReader, SIMULATED_FAULT};
use cloudpayload::{HeaderSupport, Payload, TransportHeaders};
use rstest_bdd_macros::{given, then, when};

use super::test_helpers::{PayloadContext, ReadOutcome, StepError};

#[given("a buffer payload containing \"{content}\"")]
fn buffer_payload(payload_context: &PayloadContext, content: String) {
    payload_context.install(Payload::from_bytes(content));
}

#[given("a one-shot stream payload containing \"{content}\"")]
fn one_shot_payload(payload_context: &PayloadContext, content: String) {
    payload_context.install(Payload::from_reader(Cursor::new(content.into_bytes())));
}

#[given("a stream payload that fails after \"{prefix}\"")]
fn failing_payload(payload_context: &PayloadContext, prefix: String) {
    payload_context.install(Payload::from_reader(FailingReader::after(prefix)));
}

#[given("the content type is \"{content_type}\"")]
fn content_type_is(payload_context: &PayloadContext, content_type: String) -> Result<(), StepError> {
    payload_context.with_payload(|payload| payload.set_content_type(Some(content_type)))
}

#[given("the declared content length is {length}")]
fn declared_length(payload_context: &PayloadContext, length: u64) -> Result<(), StepError> {
    payload_context.with_payload(|payload| payload.set_content_length(Some(length)))
}

#[when("I read the payload")]
fn read_payload(payload_context: &PayloadContext) -> Result<(), StepError> {
    payload_context.read_once()
}

#[when("I read the payload again")]
fn read_payload_again(payload_context: &PayloadContext) -> Result<(), StepError> {
    payload_context.read_once()
}

#[when("I release the payload")]
fn release_payload(payload_context: &PayloadContext) -> Result<(), StepError> {
    payload_context.with_payload(Payload::release)
}

#[when("I release the payload again")]
fn release_payload_again(payload_context: &PayloadContext) -> Result<(), StepError> {
    payload_context.with_payload(Payload::release)
}

#[then("every read yields \"{content}\"")]
fn every_read_yields(payload_context: &PayloadContext, content: String) -> Result<(), StepError> {
    let reads = payload_context.reads();
    if reads.is_empty() {
        return Err(StepError::Assertion(String::from("no read was attempted")));
    }
    let expected = ReadOutcome::Content(content.into_bytes());
    match reads.iter().find(|outcome| **outcome != expected) {
        Some(outcome) => Err(StepError::Assertion(format!(
            "expected {expected:?}, got {outcome:?}"
        ))),
        None => Ok(()),
    }
}

#[then("the first read yields \"{content}\"")]
fn first_read_yields(payload_context: &PayloadContext, content: String) -> Result<(), StepError> {
    let expected = ReadOutcome::Content(content.into_bytes());
    match payload_context.reads().first() {
        Some(outcome) if *outcome == expected => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected {expected:?}, got {other:?}"
        ))),
    }
}

#[then("the read fails because the payload was released")]
fn read_fails_released(payload_context: &PayloadContext) -> Result<(), StepError> {
    expect_last_read(payload_context, &ReadOutcome::Released)
}

#[then("the read fails because the content was already consumed")]
fn read_fails_consumed(payload_context: &PayloadContext) -> Result<(), StepError> {
    expect_last_read(payload_context, &ReadOutcome::AlreadyConsumed)
}

#[then("the read fails with a simulated source fault")]
fn read_fails_with_fault(payload_context: &PayloadContext) -> Result<(), StepError> {
    expect_last_read(
        payload_context,
        &ReadOutcome::Io {
            kind: ErrorKind::ConnectionReset,
            message: String::from(SIMULATED_FAULT),
        },
    )
}

#[then("the payload is released")]
fn payload_is_released(payload_context: &PayloadContext) -> Result<(), StepError> {
    if payload_context.with_payload(|payload| payload.is_released())? {
        Ok(())
    } else {
        Err(StepError::Assertion(String::from(
            "payload should report released",
        )))
    }
}

#[then("the content type is still \"{content_type}\"")]
fn content_type_is_still(
    payload_context: &PayloadContext,
    content_type: String,
) -> Result<(), StepError> {
    let actual =
        payload_context.with_payload(|payload| payload.content_type().map(str::to_owned))?;
    if actual.as_deref() == Some(content_type.as_str()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected content type {content_type}, got {actual:?}"
        )))
    }
}

#[then("the transport headers contain \"{name}\" set to \"{value}\"")]
fn transport_header(
    payload_context: &PayloadContext,
    name: String,
    value: String,
) -> Result<(), StepError> {
    let headers = payload_context.with_payload(|payload| {
        TransportHeaders::from_metadata(payload.metadata(), HeaderSupport::all(), None).to_map()
    })?;
    match headers.get(name.as_str()) {
        Some(actual) if *actual == value => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected {name}: {value}, got {other:?}"
        ))),
    }
}

fn expect_last_read(
    payload_context: &PayloadContext,
    expected: &ReadOutcome,
) -> Result<(), StepError> {
    let outcome = payload_context.last_read()?;
    if outcome == *expected {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {expected:?}, got {outcome:?}"
        )))
    }
}
