//! Key-value backends for the persisted history.

use std::collections::HashMap;

use crate::error::Result;

/// Durable key-value storage holding serialized history.
pub trait HistoryBackend {
    /// Read the raw value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>>;
    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<B: HistoryBackend + ?Sized> HistoryBackend for Box<B> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

/// In-process backend. Nothing outlives the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with one raw entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
