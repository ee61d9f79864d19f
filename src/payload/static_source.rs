// src/payload/static_source.rs

use crate::errors::{BinherdError, Result};
use crate::payload::{PayloadSource, entry_key};

/// Payload backed by a compile-time table of `(key, bytes)` pairs.
///
/// Keys are `bin/<name>` paths. A host application embeds its helper binaries
/// like this:
///
/// ```ignore
/// static BINARIES: StaticPayload = StaticPayload::new(&[
///     ("bin/broker", include_bytes!("../bin/broker")),
///     ("bin/indexer", include_bytes!("../bin/indexer")),
/// ]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaticPayload {
    entries: &'static [(&'static str, &'static [u8])],
}

impl StaticPayload {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// A payload with no entries; every lookup fails with `PayloadNotFound`.
    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    fn lookup(&self, key: &str) -> Option<&'static [u8]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, data)| *data)
    }
}

impl PayloadSource for StaticPayload {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.lookup(&entry_key(name))
            .map(|data| data.to_vec())
            .ok_or_else(|| BinherdError::PayloadNotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.lookup(&entry_key(name)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: StaticPayload =
        StaticPayload::new(&[("bin/a", b"contents of a"), ("bin/b", b"bb")]);

    #[test]
    fn read_returns_entry_bytes() {
        assert_eq!(TABLE.read("a").unwrap(), b"contents of a");
        assert!(TABLE.contains("b"));
    }

    #[test]
    fn missing_entry_is_payload_not_found() {
        match TABLE.read("c") {
            Err(BinherdError::PayloadNotFound(name)) => assert_eq!(name, "c"),
            other => panic!("expected PayloadNotFound, got: {other:?}"),
        }
        assert!(!StaticPayload::empty().contains("a"));
    }
}
