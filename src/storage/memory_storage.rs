use crate::{
    config::StoreConfig,
    domain::Board,
    error::{BoardError, Result},
    storage::{decode_board, encode_board, Storage},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-process key-value blob store, shaped like browser local storage.
///
/// Clones share the same underlying map, so a caller can keep a handle to
/// inspect what a store has written.
#[derive(Clone)]
pub struct MemoryStorage {
    key: String,
    pretty: bool,
    blobs: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            key: config.storage_key.clone(),
            pretty: config.pretty,
            blobs: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn blobs(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| BoardError::StorageError("memory storage lock poisoned".to_string()))
    }

    /// Raw blob stored under a key
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.blobs().ok()?.get(key).cloned()
    }

    /// Stores a raw blob under a key, bypassing board encoding
    pub fn set_item(&self, key: &str, value: impl Into<String>) -> Result<()> {
        self.blobs()?.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Number of successful board saves so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load_board(&self) -> Result<Option<Board>> {
        match self.get_item(&self.key) {
            Some(contents) => decode_board(&contents).map(Some),
            None => Ok(None),
        }
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        let json = encode_board(board, self.pretty)?;
        self.set_item(&self.key, json)?;

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.get_item(&self.key).is_some()
    }
}
