use crate::domain::item::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a bucket (e.g., todo, bucket-3f2b...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketId(String);

impl BucketId {
    const PREFIX: &'static str = "bucket";

    /// Generates a fresh identifier
    pub fn generate() -> Self {
        Self(format!("{}-{}", Self::PREFIX, Uuid::new_v4()))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BucketId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BucketId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named column holding an ordered sequence of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: BucketId,
    pub name: String,
    pub items: Vec<Item>,
}

impl Bucket {
    pub const DEFAULT_NAME: &'static str = "New Bucket";

    /// Creates an empty bucket with a fresh id and the default name
    pub fn new() -> Self {
        Self::with_id(BucketId::generate(), Self::DEFAULT_NAME)
    }

    pub fn with_id(id: impl Into<BucketId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id.as_str() == item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.position_of(item_id).is_some()
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == item_id)
    }

    /// Removes an item, returning it if it was present
    pub fn remove(&mut self, item_id: &ItemId) -> Option<Item> {
        let index = self.position_of(item_id.as_str())?;
        Some(self.items.remove(index))
    }
}

impl Default for Bucket {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_defaults() {
        let bucket = Bucket::new();
        assert_eq!(bucket.name, "New Bucket");
        assert!(bucket.items.is_empty());
        assert!(bucket.id.as_str().starts_with("bucket-"));
    }

    #[test]
    fn test_remove_returns_item() {
        let mut bucket = Bucket::with_id("todo", "TODO");
        let item = Item::new();
        let id = item.id.clone();
        bucket.items.push(item);

        let removed = bucket.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(bucket.items.is_empty());
        assert!(bucket.remove(&id).is_none());
    }
}
