use crate::domain::card::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a column. Independent namespace from [`CardId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Generates a fresh unique column id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An ordered, named bucket of card ids.
///
/// The column owns its cards' ordered membership; card content lives in the
/// board's card map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub card_ids: Vec<CardId>,
}

impl Column {
    /// Creates a new empty column with a generated id
    pub fn new(title: String) -> Self {
        Self {
            id: ColumnId::generate(),
            title,
            card_ids: Vec::new(),
        }
    }

    /// Position of a card within this column, if it is a member
    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.card_ids.iter().position(|id| id == card_id)
    }

    /// Whether this column owns the given card
    pub fn owns(&self, card_id: &CardId) -> bool {
        self.card_ids.contains(card_id)
    }
}
