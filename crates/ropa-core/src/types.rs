//! Core data types for the wardrobe session.
//!
//! An uploaded photo is keyed by an [`ItemId`] derived from its file name;
//! the model's answer about it is a [`TagRecord`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Unique key linking an uploaded image to its tag record.
///
/// Derived from the base file name with the final extension stripped. Two
/// uploads sharing a base name map to the same id (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an already-derived identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the identifier from an uploaded file name or path.
    ///
    /// Directory components are dropped and only the last extension is
    /// removed: `fotos/red_jacket.jpg` → `red_jacket`, `a.b.jpeg` → `a.b`.
    /// Returns `None` for names with no usable stem (empty, `..`, `/`).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = Path::new(name).file_stem()?.to_str()?;
        if stem.is_empty() {
            return None;
        }
        Some(Self(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The five fashion attributes the model assigns to a clothing item.
///
/// Field names on the wire are the Spanish keys the model is asked to use.
/// Every field is required; unknown extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Style category (e.g. "Casual", "Formal", "Deportiva")
    #[serde(rename = "categoria")]
    pub category: String,

    /// Garment type (e.g. "Campera", "Pantalón")
    #[serde(rename = "tipo")]
    pub kind: String,

    /// Dominant color
    pub color: String,

    /// Recommended temperature range (e.g. "5°C a 15°C")
    #[serde(rename = "temperatura")]
    pub temperature: String,

    /// Recommended weather (e.g. "Frío", "lluvioso")
    #[serde(rename = "clima")]
    pub weather: String,
}

impl TagRecord {
    /// Attribute values in display order.
    pub fn values(&self) -> [&str; 5] {
        [
            &self.category,
            &self.kind,
            &self.color,
            &self.temperature,
            &self.weather,
        ]
    }
}

/// Raw bytes of an uploaded photo, kept only for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Original file name as uploaded
    pub file_name: String,

    /// Unmodified file contents
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_strips_extension() {
        assert_eq!(
            ItemId::from_file_name("red_jacket.jpg"),
            Some(ItemId::from("red_jacket"))
        );
    }

    #[test]
    fn test_item_id_strips_only_last_extension() {
        assert_eq!(ItemId::from_file_name("a.b.jpeg"), Some(ItemId::from("a.b")));
    }

    #[test]
    fn test_item_id_drops_directories() {
        assert_eq!(
            ItemId::from_file_name("fotos/invierno/red_jacket.JPG"),
            Some(ItemId::from("red_jacket"))
        );
    }

    #[test]
    fn test_item_id_without_extension_is_whole_name() {
        assert_eq!(ItemId::from_file_name("gorro"), Some(ItemId::from("gorro")));
    }

    #[test]
    fn test_item_id_rejects_empty() {
        assert_eq!(ItemId::from_file_name(""), None);
        assert_eq!(ItemId::from_file_name(".."), None);
    }

    #[test]
    fn test_different_paths_same_base_name_collide() {
        let a = ItemId::from_file_name("verano/remera.jpg");
        let b = ItemId::from_file_name("invierno/remera.jpeg");
        assert_eq!(a, b);
    }

    #[test]
    fn test_tag_record_uses_spanish_keys() {
        let json = r#"{"categoria":"Casual","tipo":"Campera","color":"Rojo","temperatura":"5°C a 15°C","clima":"Frío"}"#;
        let record: TagRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, "Campera");
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn test_tag_record_requires_all_fields() {
        let json = r#"{"categoria":"Casual","tipo":"Campera","color":"Rojo"}"#;
        assert!(serde_json::from_str::<TagRecord>(json).is_err());
    }

    #[test]
    fn test_tag_record_ignores_extra_fields() {
        let json = r#"{"categoria":"A","tipo":"B","color":"C","temperatura":"D","clima":"E","marca":"X"}"#;
        let record: TagRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.values(), ["A", "B", "C", "D", "E"]);
    }
}
