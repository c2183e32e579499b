//! Board state store: the single owner of the board.
//!
//! Every operation either changes the board and then overwrites the saved
//! copy, or leaves both untouched. Unknown ids never fail an operation; they
//! turn it into a no-op with a warning in the log.

use crate::{
    config::{SaveErrorPolicy, StoreConfig},
    domain::{Board, BucketId, ItemId, ItemUpdate, MovePlan, MoveSkip},
    error::Result,
    storage::Storage,
};

/// Events delivered by the drag-and-drop input source.
///
/// `over` is the id under the pointer: a bucket id, an item id, or `None`
/// when the pointer is over nothing that accepts drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { active: ItemId },
    Over { active: ItemId, over: Option<String> },
    End { active: ItemId, over: Option<String> },
}

pub struct BoardStore<S: Storage> {
    board: Board,
    storage: S,
    on_save_error: SaveErrorPolicy,
    active_item: Option<ItemId>,
}

impl<S: Storage> BoardStore<S> {
    /// Loads the saved board, or creates and saves the default board if none exists
    pub async fn open(storage: S, config: &StoreConfig) -> Result<Self> {
        let loaded = storage.load_board().await?;
        let fresh = loaded.is_none();

        let board = match loaded {
            Some(board) => {
                tracing::debug!(
                    buckets = board.buckets.len(),
                    items = board.item_count(),
                    "Loaded saved board"
                );
                board
            }
            None => {
                tracing::info!("No saved board found, creating default board");
                Board::default()
            }
        };

        let store = Self {
            board,
            storage,
            on_save_error: config.on_save_error,
            active_item: None,
        };

        if fresh {
            store.persist().await?;
        }

        Ok(store)
    }

    /// Current board, for rendering
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Item currently being dragged, if any
    pub fn active_item(&self) -> Option<&ItemId> {
        self.active_item.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub async fn add_bucket(&mut self) -> Result<BucketId> {
        let id = self.board.add_bucket();
        tracing::debug!(bucket = %id, "Added bucket");
        self.persist().await?;
        Ok(id)
    }

    /// Renames a bucket; blank names are ignored and the old name is kept
    pub async fn rename_bucket(&mut self, bucket_id: &BucketId, name: &str) -> Result<bool> {
        if self.board.bucket(bucket_id).is_none() {
            tracing::warn!(bucket = %bucket_id, "Rename ignored: unknown bucket");
            return Ok(false);
        }

        if !self.board.rename_bucket(bucket_id, name) {
            tracing::debug!(bucket = %bucket_id, "Rename ignored: blank or unchanged name");
            return Ok(false);
        }

        self.commit().await
    }

    pub async fn delete_bucket(&mut self, bucket_id: &BucketId) -> Result<bool> {
        match self.board.delete_bucket(bucket_id) {
            Some(bucket) => {
                tracing::debug!(
                    bucket = %bucket_id,
                    items = bucket.items.len(),
                    "Deleted bucket"
                );
                self.commit().await
            }
            None => {
                tracing::warn!(bucket = %bucket_id, "Delete ignored: unknown bucket");
                Ok(false)
            }
        }
    }

    /// Appends a new item to a bucket, returning its id
    pub async fn add_item(&mut self, bucket_id: &BucketId) -> Result<Option<ItemId>> {
        let Some(id) = self.board.add_item(bucket_id) else {
            tracing::warn!(bucket = %bucket_id, "Add item ignored: unknown bucket");
            return Ok(None);
        };

        tracing::debug!(bucket = %bucket_id, item = %id, "Added item");
        self.persist().await?;
        Ok(Some(id))
    }

    pub async fn update_item(
        &mut self,
        bucket_id: &BucketId,
        item_id: &ItemId,
        update: ItemUpdate,
    ) -> Result<bool> {
        let known = self
            .board
            .bucket(bucket_id)
            .is_some_and(|bucket| bucket.item(item_id).is_some());
        if !known {
            tracing::warn!(bucket = %bucket_id, item = %item_id, "Update ignored: unknown item");
            return Ok(false);
        }

        if !self.board.update_item(bucket_id, item_id, update) {
            return Ok(false);
        }

        self.commit().await
    }

    pub async fn delete_item(&mut self, bucket_id: &BucketId, item_id: &ItemId) -> Result<bool> {
        if self.board.delete_item(bucket_id, item_id).is_none() {
            tracing::warn!(bucket = %bucket_id, item = %item_id, "Delete ignored: unknown item");
            return Ok(false);
        }

        tracing::debug!(bucket = %bucket_id, item = %item_id, "Deleted item");
        self.commit().await
    }

    /// Places a dropped item: onto a bucket (append), or onto an item (take its slot)
    pub async fn move_item(&mut self, active: &ItemId, over: &str) -> Result<bool> {
        let outcome = self.board.move_item(active.as_str(), over);
        self.finish_move(active, over, outcome).await
    }

    /// Hover-time move: only bucket targets rearrange the board
    pub async fn preview_move(&mut self, active: &ItemId, over: &str) -> Result<bool> {
        let outcome = self.board.preview_move(active.as_str(), over);
        self.finish_move(active, over, outcome).await
    }

    /// Feeds one drag-and-drop event into the store
    pub async fn handle_drag(&mut self, event: DragEvent) -> Result<bool> {
        match event {
            DragEvent::Start { active } => {
                self.active_item = Some(active);
                Ok(false)
            }
            DragEvent::Over { active, over } => match over {
                Some(over) => self.preview_move(&active, &over).await,
                None => Ok(false),
            },
            DragEvent::End { active, over } => {
                self.active_item = None;
                match over {
                    Some(over) => self.move_item(&active, &over).await,
                    None => {
                        tracing::debug!(item = %active, "Drag released over no target");
                        Ok(false)
                    }
                }
            }
        }
    }

    async fn finish_move(
        &mut self,
        active: &ItemId,
        over: &str,
        outcome: std::result::Result<MovePlan, MoveSkip>,
    ) -> Result<bool> {
        match outcome {
            Ok(plan) => {
                tracing::debug!(item = %active, over, ?plan, "Moved item");
                self.commit().await
            }
            Err(skip @ (MoveSkip::SourceNotFound | MoveSkip::TargetNotFound)) => {
                tracing::warn!(item = %active, over, "Move ignored: {}", skip);
                Ok(false)
            }
            Err(skip) => {
                tracing::trace!(item = %active, over, "Move skipped: {}", skip);
                Ok(false)
            }
        }
    }

    async fn commit(&self) -> Result<bool> {
        self.persist().await?;
        Ok(true)
    }

    async fn persist(&self) -> Result<()> {
        match self.storage.save_board(&self.board).await {
            Ok(()) => Ok(()),
            Err(err) => match self.on_save_error {
                SaveErrorPolicy::Surface => Err(err),
                SaveErrorPolicy::Ignore => {
                    tracing::error!("Failed to save board: {}", err);
                    Ok(())
                }
            },
        }
    }
}
