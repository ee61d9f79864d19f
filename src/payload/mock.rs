// src/payload/mock.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::{BinherdError, Result};
use crate::payload::{PayloadSource, entry_key};

/// In-memory payload for tests.
#[derive(Debug, Clone, Default)]
pub struct MockPayload {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for a binary name (stored under `bin/<name>`).
    pub fn add(&self, name: impl AsRef<str>, content: impl Into<Vec<u8>>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(entry_key(name.as_ref()), content.into());
    }
}

impl PayloadSource for MockPayload {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&entry_key(name))
            .cloned()
            .ok_or_else(|| BinherdError::PayloadNotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        let entries = self.entries.lock().unwrap();
        entries.contains_key(&entry_key(name))
    }
}
