//! Collection Data Integration Tests
//!
//! Cross-layer behavior of the collection stack: key uniqueness, version
//! counting, fail-fast enumeration, copy-on-write isolation, notification
//! ordering and the read-only guard.

#[path = "../common/mod.rs"]
mod common;

mod read_only_guard;
mod uniqueness;
