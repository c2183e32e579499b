use crate::{
    domain::{Board, Bucket},
    error::Result,
};
use async_trait::async_trait;
use serde::Deserialize;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

/// Storage trait for persisting the board as a single named blob
#[async_trait]
pub trait Storage: Send + Sync {
    /// Loads the board, or `None` if nothing has been saved yet
    async fn load_board(&self) -> Result<Option<Board>>;

    /// Overwrites the saved board with the given one
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Checks whether a board has been saved
    async fn is_initialized(&self) -> bool;
}

/// Shapes a saved board may take on disk
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Board(Board),
    /// Bare bucket array, as written by the browser version of the board
    Buckets(Vec<Bucket>),
}

/// Serializes a board to its persisted JSON form
pub fn encode_board(board: &Board, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(board)?
    } else {
        serde_json::to_string(board)?
    };
    Ok(json)
}

/// Parses a persisted board and checks id uniqueness
pub fn decode_board(contents: &str) -> Result<Board> {
    let board = match serde_json::from_str::<Snapshot>(contents)? {
        Snapshot::Board(board) => board,
        Snapshot::Buckets(buckets) => Board::new(buckets),
    };
    board.validate()?;
    Ok(board)
}
