//! Session stores: the exportable tag store and the session-only image store.
//!
//! The tag store keeps insertion order so the gallery and the exported file
//! list items in the order they were first added. Neither store ever shrinks.

use crate::error::ImportError;
use crate::types::{ItemId, TagRecord, UploadedImage};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from item id to tag record; the unit of export/import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagStore {
    items: IndexMap<ItemId, TagRecord>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&TagRecord> {
        self.items.get(id)
    }

    /// Insert or overwrite. An overwritten item keeps its original position.
    pub fn insert(&mut self, id: ItemId, record: TagRecord) -> Option<TagRecord> {
        self.items.insert(id, record)
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &TagRecord)> {
        self.items.iter()
    }

    /// Pretty-printed JSON (2-space indent), as written to the export file.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Single-line JSON, as embedded in the question prompt.
    pub fn to_compact_json(&self) -> String {
        // A map of plain strings cannot fail to serialize
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse an uploaded wardrobe file and merge it in.
    ///
    /// Every entry is validated before anything is merged; on error the
    /// store is left untouched. Overlapping ids are overwritten, new ids are
    /// appended in file order. Returns the number of entries merged.
    pub fn import(&mut self, bytes: &[u8]) -> Result<usize, ImportError> {
        let incoming = parse_wardrobe(bytes)?;
        let count = incoming.len();
        self.items.extend(incoming);
        Ok(count)
    }
}

/// Decode and validate a wardrobe file without touching any store.
pub fn parse_wardrobe(bytes: &[u8]) -> Result<IndexMap<ItemId, TagRecord>, ImportError> {
    let text = std::str::from_utf8(bytes)?;

    // Deserialize straight into an ordered map so file order survives
    let raw: IndexMap<String, serde_json::Value> = match serde_json::from_str(text) {
        Ok(map) => map,
        Err(e) => {
            return Err(match serde_json::from_str::<serde_json::Value>(text) {
                Ok(other) => ImportError::NotAnObject(json_kind(&other)),
                Err(_) => ImportError::Json(e),
            })
        }
    };

    raw.into_iter()
        .map(|(key, value)| {
            if key.is_empty() {
                return Err(ImportError::InvalidEntry {
                    item: key,
                    message: "empty item name".to_string(),
                });
            }
            let record = serde_json::from_value::<TagRecord>(value).map_err(|e| {
                ImportError::InvalidEntry {
                    item: key.clone(),
                    message: e.to_string(),
                }
            })?;
            Ok((ItemId::new(key), record))
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Session-only mapping from item id to uploaded bytes. Never exported.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: HashMap<ItemId, UploadedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&UploadedImage> {
        self.images.get(id)
    }

    /// Insert or overwrite (last upload wins).
    pub fn insert(&mut self, id: ItemId, image: UploadedImage) -> Option<UploadedImage> {
        self.images.insert(id, image)
    }
}
