//! # Bucket Board
//!
//! Board state store for a drag-and-drop kanban board.
//!
//! Items live in named buckets; the store applies edits and drag-and-drop
//! moves to the board and saves the whole board after every change. Rendering
//! and gesture detection are left to the caller.

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::{SaveErrorPolicy, StoreConfig};
pub use domain::{Board, Bucket, BucketId, Item, ItemId, ItemUpdate, MovePlan, MoveSkip};
pub use error::{BoardError, Result};
#[cfg(feature = "file-storage")]
pub use storage::file_storage::FileStorage;
pub use storage::{memory_storage::MemoryStorage, Storage};
pub use store::{BoardStore, DragEvent};
