use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for an item, unique across the whole board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    const PREFIX: &'static str = "item";

    /// Generates a fresh identifier (e.g., item-3f2b...)
    pub fn generate() -> Self {
        Self(format!("{}-{}", Self::PREFIX, Uuid::new_v4()))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub const DEFAULT_TITLE: &'static str = "New Item";

    /// Creates a new item with a fresh id and the default title
    pub fn new() -> Self {
        Self::with_id(ItemId::generate(), Self::DEFAULT_TITLE.to_string())
    }

    pub fn with_id(id: ItemId, title: String) -> Self {
        Self {
            id,
            title,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Merges an update into the item. Returns true if any field changed.
    ///
    /// Titles are trimmed and a blank title is ignored, keeping the previous
    /// one. Descriptions are trimmed and may become empty.
    pub fn apply(&mut self, update: ItemUpdate) -> bool {
        let mut changed = false;

        if let Some(title) = update.title {
            let title = title.trim();
            if !title.is_empty() && title != self.title {
                self.title = title.to_string();
                changed = true;
            }
        }

        if let Some(description) = update.description {
            let description = description.trim();
            if description != self.description {
                self.description = description.to_string();
                changed = true;
            }
        }

        changed
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// Editable subset of an item's fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ItemUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_defaults() {
        let item = Item::new();
        assert_eq!(item.title, "New Item");
        assert!(item.description.is_empty());
        assert!(item.id.as_str().starts_with("item-"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_apply_title_is_trimmed() {
        let mut item = Item::new();
        assert!(item.apply(ItemUpdate::title("  Write docs  ")));
        assert_eq!(item.title, "Write docs");
    }

    #[test]
    fn test_apply_blank_title_keeps_previous() {
        let mut item = Item::new();
        assert!(!item.apply(ItemUpdate::title("   ")));
        assert_eq!(item.title, "New Item");
    }

    #[test]
    fn test_apply_description_can_be_cleared() {
        let mut item = Item::new();
        item.apply(ItemUpdate::description("details"));
        assert_eq!(item.description, "details");

        assert!(item.apply(ItemUpdate::description("  ")));
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_apply_leaves_id_and_created_at() {
        let mut item = Item::new();
        let id = item.id.clone();
        let created_at = item.created_at;

        item.apply(ItemUpdate::title("Renamed").with_description("Body"));

        assert_eq!(item.id, id);
        assert_eq!(item.created_at, created_at);
        assert_eq!(item.title, "Renamed");
        assert_eq!(item.description, "Body");
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut item = Item::new();
        let before = item.clone();
        assert!(!item.apply(ItemUpdate::default()));
        assert_eq!(item, before);
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::with_id(ItemId::from("item-1"), "Card".to_string());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "item-1");
        assert_eq!(json["title"], "Card");
        assert_eq!(json["description"], "");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_item_deserializes_browser_timestamp() {
        let json = r#"{
            "id": "item-1712345678901",
            "title": "Old card",
            "description": "",
            "createdAt": "2024-04-05T19:34:38.901Z"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "item-1712345678901");
        assert_eq!(item.created_at.to_rfc3339(), "2024-04-05T19:34:38.901+00:00");
    }
}
