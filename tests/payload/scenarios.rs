//! BDD scenarios for the payload lifecycle.

use rstest_bdd_macros::scenario;

use super::test_helpers::{PayloadContext, payload_context};

#[scenario(
    path = "tests/features/payload.feature",
    name = "Read a buffer payload twice"
)]
fn scenario_repeatable_reads(payload_context: PayloadContext) {
    drop(payload_context);
}

#[scenario(
    path = "tests/features/payload.feature",
    name = "Release a payload twice"
)]
fn scenario_idempotent_release(payload_context: PayloadContext) {
    drop(payload_context);
}

#[scenario(
    path = "tests/features/payload.feature",
    name = "Reject a second read of a one-shot stream"
)]
fn scenario_one_shot_stream(payload_context: PayloadContext) {
    drop(payload_context);
}

#[scenario(
    path = "tests/features/payload.feature",
    name = "Surface a fault in the middle of a read"
)]
fn scenario_mid_read_fault(payload_context: PayloadContext) {
    drop(payload_context);
}

#[scenario(
    path = "tests/features/payload.feature",
    name = "Derive transport headers from declared metadata"
)]
fn scenario_transport_headers(payload_context: PayloadContext) {
    drop(payload_context);
}
