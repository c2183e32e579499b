use crate::{
    config::StoreConfig,
    domain::Board,
    error::Result,
    storage::{decode_board, encode_board, Storage},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one JSON file per storage key under a data directory
pub struct FileStorage {
    root_path: PathBuf,
    key: String,
    pretty: bool,
}

impl FileStorage {
    const DATA_DIR: &'static str = ".kanban";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a FileStorage for the given project root with default settings
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self::with_config(project_root, &StoreConfig::default())
    }

    pub fn with_config(project_root: impl AsRef<Path>, config: &StoreConfig) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::DATA_DIR),
            key: config.storage_key.clone(),
            pretty: config.pretty,
        }
    }

    /// Path of the optional `config.toml` inside the data directory
    pub fn config_path(project_root: impl AsRef<Path>) -> PathBuf {
        project_root
            .as_ref()
            .join(Self::DATA_DIR)
            .join(Self::CONFIG_FILE)
    }

    pub fn board_file(&self) -> PathBuf {
        self.root_path.join(format!("{}.json", self.key))
    }

    /// Creates the data directory if needed
    pub async fn initialize(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load_board(&self) -> Result<Option<Board>> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&board_file).await?;
        decode_board(&contents).map(Some)
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.initialize().await?;

        let json = encode_board(board, self.pretty)?;
        // Atomic replace: write a sibling temp file, then rename over the board
        let tmp_file = self.board_file().with_extension("json.tmp");
        fs::write(&tmp_file, json).await?;
        fs::rename(&tmp_file, self.board_file()).await?;

        tracing::debug!(path = ?self.board_file(), "Saved board");
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.board_file().exists()
    }
}
