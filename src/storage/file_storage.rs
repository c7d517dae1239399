use crate::{
    domain::Board,
    error::{Result, VijeroError},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// File-based snapshot storage: the whole board as pretty JSON under a fixed
/// namespace directory.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    /// Namespace directory, mirroring the persistence key the board has
    /// always been stored under.
    const VIJERO_DIR: &'static str = ".vijero";
    const BOARD_FILE: &'static str = "board.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::VIJERO_DIR),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.board_file().exists() {
            self.save_board(&Board::new()).await?;
        }

        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(), json).await?;

        Ok(())
    }

    /// Loads the snapshot and repairs any invariant violations before
    /// returning it, so downstream code never sees corrupt state.
    async fn load_board(&self) -> Result<Board> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Err(VijeroError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&board_file).await?;
        let mut board: Board = serde_json::from_str(&contents)?;

        if board.repair() {
            warn!("persisted board snapshot violated invariants and was repaired");
        }

        Ok(board)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.board_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, CardId};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_storage_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(!storage.is_initialized().await);
        storage.initialize().await.unwrap();
        assert!(storage.is_initialized().await);

        let board = storage.load_board().await.unwrap();
        assert!(board.column_order.is_empty());
    }

    #[tokio::test]
    async fn test_load_board_uninitialized() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        let result = storage.load_board().await;
        assert!(matches!(result, Err(VijeroError::BoardNotInitialized)));
    }

    #[tokio::test]
    async fn test_board_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let mut board = Board::new();
        let todo = board.add_column("Por hacer");
        let doing = board.add_column("En progreso");
        let card = board.add_card(&todo, "Configurar proyecto").unwrap();

        storage.save_board(&board).await.unwrap();
        let loaded = storage.load_board().await.unwrap();

        loaded.check_invariants().unwrap();
        assert_eq!(loaded.column_order, vec![todo.clone(), doing]);
        assert_eq!(loaded.owning_column(&card), Some(&todo));
        assert_eq!(loaded.cards[&card].title, "Configurar proyecto");
    }

    #[tokio::test]
    async fn test_load_repairs_corrupt_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let mut board = Board::new();
        let a = board.add_column("A");
        let b = board.add_column("B");
        let card = board.add_card(&a, "x").unwrap();

        // Corrupt: the card listed in both columns, plus an orphan card.
        if let Some(col) = board.columns.get_mut(&b) {
            col.card_ids.push(card.clone());
        }
        board
            .cards
            .insert(CardId::from("orphan"), Card::new("orphan".to_string()));
        assert!(board.check_invariants().is_err());
        storage.save_board(&board).await.unwrap();

        let loaded = storage.load_board().await.unwrap();

        loaded.check_invariants().unwrap();
        assert_eq!(loaded.owning_column(&card), Some(&a));
        assert!(!loaded.cards.contains_key(&CardId::from("orphan")));
    }

    #[tokio::test]
    async fn test_load_tolerates_minimal_legacy_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        // Snapshot shape written by an earlier implementation: short opaque
        // ids, cards without timestamps or descriptions.
        let legacy = r#"{
            "columns": {
                "col_a1": { "id": "col_a1", "title": "Por hacer", "card_ids": ["k3J9xQ2a"] },
                "col_b2": { "id": "col_b2", "title": "Hecho", "card_ids": [] }
            },
            "cards": {
                "k3J9xQ2a": { "id": "k3J9xQ2a", "title": "Configurar proyecto" }
            },
            "column_order": ["col_a1", "col_b2"]
        }"#;
        fs::write(storage.board_file(), legacy).await.unwrap();

        let loaded = storage.load_board().await.unwrap();

        loaded.check_invariants().unwrap();
        assert_eq!(loaded.column_order.len(), 2);
        assert_eq!(
            loaded.cards[&CardId::from("k3J9xQ2a")].title,
            "Configurar proyecto"
        );
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let mut board = Board::new();
        let col = board.add_column("A");
        storage.save_board(&board).await.unwrap();

        board.rename_column(&col, "Renamed");
        storage.save_board(&board).await.unwrap();

        let loaded = storage.load_board().await.unwrap();
        assert_eq!(loaded.columns[&col].title, "Renamed");
    }
}
