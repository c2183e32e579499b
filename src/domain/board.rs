use crate::domain::bucket::{Bucket, BucketId};
use crate::domain::item::{Item, ItemId, ItemUpdate};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kanban board state: buckets in left-to-right display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub buckets: Vec<Bucket>,
}

impl Board {
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    /// Gets a bucket by id
    pub fn bucket(&self, id: &BucketId) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| &bucket.id == id)
    }

    fn bucket_mut(&mut self, id: &BucketId) -> Option<&mut Bucket> {
        self.buckets.iter_mut().find(|bucket| &bucket.id == id)
    }

    pub(crate) fn bucket_index(&self, id: &str) -> Option<usize> {
        self.buckets.iter().position(|bucket| bucket.id.as_str() == id)
    }

    /// Index of the bucket holding the given item
    pub(crate) fn bucket_index_of_item(&self, item_id: &str) -> Option<usize> {
        self.buckets.iter().position(|bucket| bucket.contains(item_id))
    }

    /// Finds an item anywhere on the board, along with the bucket that owns it
    pub fn find_item(&self, item_id: &ItemId) -> Option<(&Bucket, &Item)> {
        self.buckets
            .iter()
            .find_map(|bucket| bucket.item(item_id).map(|item| (bucket, item)))
    }

    /// Total number of items across all buckets
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.items.len()).sum()
    }

    /// Checks that bucket ids and item ids are unique board-wide
    pub fn validate(&self) -> Result<()> {
        let mut bucket_ids = HashSet::new();
        let mut item_ids = HashSet::new();

        for bucket in &self.buckets {
            if !bucket_ids.insert(bucket.id.as_str()) {
                return Err(BoardError::DuplicateBucketId(bucket.id.to_string()));
            }
            for item in &bucket.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(BoardError::DuplicateItemId(item.id.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Appends a new empty bucket and returns its id
    pub fn add_bucket(&mut self) -> BucketId {
        let bucket = Bucket::new();
        let id = bucket.id.clone();
        self.buckets.push(bucket);
        id
    }

    /// Renames a bucket. The name is trimmed; blank names keep the previous one.
    ///
    /// Returns true if the name changed.
    pub fn rename_bucket(&mut self, id: &BucketId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        match self.bucket_mut(id) {
            Some(bucket) if bucket.name != name => {
                bucket.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    /// Removes a bucket together with its items
    pub fn delete_bucket(&mut self, id: &BucketId) -> Option<Bucket> {
        let index = self.bucket_index(id.as_str())?;
        Some(self.buckets.remove(index))
    }

    /// Appends a new item to the end of a bucket and returns its id
    pub fn add_item(&mut self, bucket_id: &BucketId) -> Option<ItemId> {
        let bucket = self.bucket_mut(bucket_id)?;
        let item = Item::new();
        let id = item.id.clone();
        bucket.items.push(item);
        Some(id)
    }

    /// Merges editable fields into an item. Returns true if anything changed.
    pub fn update_item(&mut self, bucket_id: &BucketId, item_id: &ItemId, update: ItemUpdate) -> bool {
        self.bucket_mut(bucket_id)
            .and_then(|bucket| bucket.item_mut(item_id))
            .map(|item| item.apply(update))
            .unwrap_or(false)
    }

    /// Removes an item from a bucket
    pub fn delete_item(&mut self, bucket_id: &BucketId, item_id: &ItemId) -> Option<Item> {
        self.bucket_mut(bucket_id)?.remove(item_id)
    }
}

impl Default for Board {
    /// The four-lane board created on first start
    fn default() -> Self {
        Self::new(vec![
            Bucket::with_id("todo", "TODO"),
            Bucket::with_id("in-progress", "In Progress"),
            Bucket::with_id("blocked", "Blocked"),
            Bucket::with_id("done", "Done"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_ids(board: &Board) -> Vec<String> {
        board
            .buckets
            .iter()
            .flat_map(|bucket| bucket.items.iter().map(|item| item.id.to_string()))
            .collect()
    }

    #[test]
    fn test_default_board() {
        let board = Board::default();
        let ids: Vec<&str> = board.buckets.iter().map(|b| b.id.as_str()).collect();

        assert_eq!(ids, vec!["todo", "in-progress", "blocked", "done"]);
        assert_eq!(board.item_count(), 0);
        assert_eq!(board.buckets[1].name, "In Progress");
    }

    #[test]
    fn test_add_bucket_appends() {
        let mut board = Board::default();
        let id = board.add_bucket();

        assert_eq!(board.buckets.len(), 5);
        assert_eq!(board.buckets[4].id, id);
        assert_eq!(board.buckets[4].name, "New Bucket");
    }

    #[test]
    fn test_rename_bucket_trims() {
        let mut board = Board::default();
        let todo = BucketId::from("todo");

        assert!(board.rename_bucket(&todo, "  Todo  "));
        assert_eq!(board.bucket(&todo).unwrap().name, "Todo");
        assert_eq!(board.buckets[0].id, todo);
    }

    #[test]
    fn test_rename_bucket_rejects_blank() {
        let mut board = Board::default();
        let todo = BucketId::from("todo");

        assert!(!board.rename_bucket(&todo, ""));
        assert!(!board.rename_bucket(&todo, "   \t"));
        assert_eq!(board.bucket(&todo).unwrap().name, "TODO");
    }

    #[test]
    fn test_rename_unknown_bucket() {
        let mut board = Board::default();
        assert!(!board.rename_bucket(&BucketId::from("missing"), "Name"));
    }

    #[test]
    fn test_delete_bucket_cascades_only_its_items() {
        let mut board = Board::default();
        let todo = BucketId::from("todo");
        let done = BucketId::from("done");
        board.add_item(&todo).unwrap();
        board.add_item(&todo).unwrap();
        let kept = board.add_item(&done).unwrap();

        let removed = board.delete_bucket(&todo).unwrap();

        assert_eq!(removed.items.len(), 2);
        assert_eq!(board.item_count(), 1);
        assert!(board.find_item(&kept).is_some());
        assert!(board.delete_bucket(&todo).is_none());
    }

    #[test]
    fn test_add_item_to_unknown_bucket() {
        let mut board = Board::default();
        assert!(board.add_item(&BucketId::from("missing")).is_none());
        assert_eq!(board.item_count(), 0);
    }

    #[test]
    fn test_update_item_requires_matching_bucket() {
        let mut board = Board::default();
        let todo = BucketId::from("todo");
        let id = board.add_item(&todo).unwrap();

        assert!(!board.update_item(&BucketId::from("done"), &id, ItemUpdate::title("x")));
        assert!(board.update_item(&todo, &id, ItemUpdate::title("x")));
        assert_eq!(board.find_item(&id).unwrap().1.title, "x");
    }

    #[test]
    fn test_delete_item_is_idempotent() {
        let mut board = Board::default();
        let todo = BucketId::from("todo");
        let id = board.add_item(&todo).unwrap();

        assert!(board.delete_item(&todo, &id).is_some());
        let after_first = board.clone();
        assert!(board.delete_item(&todo, &id).is_none());
        assert_eq!(board, after_first);
    }

    #[test]
    fn test_item_ids_stay_unique() {
        let mut board = Board::default();
        for bucket in ["todo", "in-progress", "todo", "done"] {
            board.add_item(&BucketId::from(bucket)).unwrap();
        }

        let ids = item_ids(&board);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut board = Board::default();
        board.buckets.push(Bucket::with_id("todo", "Again"));
        assert!(matches!(board.validate(), Err(BoardError::DuplicateBucketId(id)) if id == "todo"));

        let mut board = Board::default();
        let item = Item::with_id(ItemId::from("item-1"), "A".to_string());
        board.buckets[0].items.push(item.clone());
        board.buckets[3].items.push(item);
        assert!(matches!(board.validate(), Err(BoardError::DuplicateItemId(id)) if id == "item-1"));
    }
}
