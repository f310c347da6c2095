//! The JSON question store.
//!
//! The store is read in full, appended to in memory, and written back in full
//! through a temporary file that replaces the original only once the new
//! contents are on disk.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::model::StoredQuestion;
use crate::text::duplicate_key;

const INDENT: &[u8] = b"    ";

/// An ordered, append-only collection of stored questions.
///
/// Entries loaded from disk remember their key order and are written back in
/// it; appended entries use the field order of [`StoredQuestion`].
#[derive(Debug, Clone, Default)]
pub struct Store {
    entries: Vec<StoredQuestion>,
    /// Parallel to `entries`; empty for entries created in memory.
    key_orders: Vec<Vec<String>>,
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |source: serde_json::Error| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let raw: Vec<Map<String, Value>> = serde_json::from_str(&content).map_err(parse_err)?;

        let mut store = Store::new();
        for object in raw {
            let order: Vec<String> = object.keys().cloned().collect();
            let entry: StoredQuestion =
                serde_json::from_value(Value::Object(object)).map_err(parse_err)?;
            store.entries.push(entry);
            store.key_orders.push(order);
        }
        tracing::debug!(path = %path.display(), entries = store.len(), "loaded store");
        Ok(store)
    }

    /// Write the store to `path`, replacing any existing file atomically.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json_bytes()?;
        let write_err = |source: std::io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&json).map_err(write_err)?;
        if let Ok(meta) = std::fs::metadata(path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %path.display(), entries = self.len(), "saved store");
        Ok(())
    }

    /// Serialize as a JSON array indented by four spaces.
    ///
    /// Non-ASCII text is written as UTF-8, never `\u`-escaped.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let values = self
            .entries
            .iter()
            .zip(&self.key_orders)
            .map(|(entry, order)| Ok(with_key_order(serde_json::to_value(entry)?, order)))
            .collect::<Result<Vec<Value>, serde_json::Error>>()
            .map_err(StoreError::Serialize)?;

        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        values.serialize(&mut ser).map_err(StoreError::Serialize)?;
        Ok(buf)
    }

    pub fn entries(&self) -> &[StoredQuestion] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest identifier in the store, or 0 when it is empty.
    pub fn max_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0)
    }

    /// Duplicate keys of every question already stored.
    pub fn question_keys(&self) -> HashSet<String> {
        self.entries
            .iter()
            .map(|e| duplicate_key(&e.question))
            .collect()
    }

    pub fn push(&mut self, question: StoredQuestion) {
        self.entries.push(question);
        self.key_orders.push(Vec::new());
    }
}

impl From<Vec<StoredQuestion>> for Store {
    fn from(entries: Vec<StoredQuestion>) -> Self {
        let key_orders = vec![Vec::new(); entries.len()];
        Self {
            entries,
            key_orders,
        }
    }
}

/// Reorder an object's keys to `order`; keys missing from `order` go last.
fn with_key_order(value: Value, order: &[String]) -> Value {
    let Value::Object(mut object) = value else {
        return value;
    };
    if order.is_empty() {
        return Value::Object(object);
    }
    let mut ordered = Map::new();
    for key in order {
        if let Some(v) = object.remove(key) {
            ordered.insert(key.clone(), v);
        }
    }
    ordered.extend(object);
    Value::Object(ordered)
}
