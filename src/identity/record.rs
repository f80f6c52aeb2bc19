//! Item persistence substrate
//!
//! A typed, string-keyed tag record attached to a single item instance.
//! Reads are absence-safe: a missing key (or a key holding a value of a
//! different type) reads as `None`, never as an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single typed tag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagValue {
    /// 32-bit signed integer tag
    Int(i32),
    /// UTF-8 string tag
    String(String),
}

/// String-keyed record of typed tags persisted with an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    tags: BTreeMap<String, TagValue>,
}

impl ItemRecord {
    /// Create an empty record
    pub fn new() -> Self {
        ItemRecord::default()
    }

    /// Store an integer tag, replacing any previous value under `key`
    pub fn put_int(&mut self, key: &str, value: i32) {
        self.tags.insert(key.to_string(), TagValue::Int(value));
    }

    /// Store a string tag, replacing any previous value under `key`
    pub fn put_string(&mut self, key: &str, value: impl Into<String>) {
        self.tags
            .insert(key.to_string(), TagValue::String(value.into()));
    }

    /// Read an integer tag; `None` if absent or not an integer
    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.tags.get(key) {
            Some(TagValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Read a string tag; `None` if absent or not a string
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.tags.get(key) {
            Some(TagValue::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Check whether any tag is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Remove the tag under `key`, returning it if present
    pub fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.tags.remove(key)
    }

    /// Number of stored tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if no tags are stored
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
