use crate::{domain::Board, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;

/// Storage trait for persisting board snapshots.
///
/// The board is saved as a whole snapshot after every mutation and
/// rehydrated at startup. Implementations must tolerate arbitrary prior
/// snapshots, including invariant-violating ones; [`load_board`]
/// implementations are expected to run [`Board::repair`] before handing the
/// state back.
///
/// [`load_board`]: Storage::load_board
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves the board snapshot
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads the board snapshot
    async fn load_board(&self) -> Result<Board>;

    /// Checks if a snapshot exists
    async fn is_initialized(&self) -> bool;
}
