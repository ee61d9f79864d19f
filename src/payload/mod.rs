// src/payload/mod.rs

//! Read-only, name-addressed sources of helper binary bytes.
//!
//! In embedded mode the supervisor pulls each binary's contents out of a
//! [`PayloadSource`] and extracts them to the cache directory before
//! launching. Entries are addressed as `bin/<name>`, matching the layout the
//! payload is packed with at build time.
//!
//! - [`StaticPayload`] is the production implementation: a compile-time table
//!   a host binary fills with `include_bytes!`.
//! - [`mock::MockPayload`] is an in-memory implementation for tests.

pub mod mock;
pub mod static_source;

pub use static_source::StaticPayload;

use crate::errors::Result;

/// Abstract payload interface.
pub trait PayloadSource: Send + Sync {
    /// Return the raw bytes for the named binary.
    ///
    /// Fails with `PayloadNotFound` when there is no entry for `name`.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Whether an entry for the named binary exists.
    fn contains(&self, name: &str) -> bool;
}

/// Logical key a binary name is stored under.
pub(crate) fn entry_key(name: &str) -> String {
    format!("bin/{name}")
}
