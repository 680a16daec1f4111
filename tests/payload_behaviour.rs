//! Behavioural scenarios for payload reads, release, and header derivation.

mod payload;
