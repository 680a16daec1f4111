//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Content used by most fixtures.
pub const HELLO: &str = "hello";

/// MD5 digest of [`HELLO`], base64 encoded as sent in `Content-MD5`.
pub const HELLO_MD5_BASE64: &str = "XUFAKrxLKna5cZ2REBfFkg==";
