//! Integration tests for the uniform response formatter
//!
//! All tests live under `tests/`; this library target is empty.
