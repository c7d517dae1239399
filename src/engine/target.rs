use crate::domain::{CardId, ColumnId, Placement};
use crate::engine::geometry::Rect;

/// The entity being dragged: its kind and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Card(CardId),
    Column(ColumnId),
}

/// A drop target intersecting the pointer, as reported by the host's
/// collision detection. One variant per target kind, each carrying exactly
/// the fields that kind needs.
///
/// `rect` is the target's bounding box when the host could measure it;
/// resolution steps that need geometry and don't have it simply make no
/// decision for that event.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    /// An actual card surface.
    Card {
        id: CardId,
        column_id: ColumnId,
        rect: Option<Rect>,
    },
    /// A column surface (typically its empty area below the cards).
    Column { id: ColumnId, rect: Option<Rect> },
    /// A thin index marker at a boundary between columns. For N columns
    /// there are N markers plus one trailing marker with index N.
    Marker { index: usize, rect: Option<Rect> },
}

impl DropTarget {
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Card { rect, .. } | Self::Column { rect, .. } | Self::Marker { rect, .. } => {
                *rect
            }
        }
    }
}

/// A structural move the engine committed in response to a drag event.
/// Returned to the caller so the host can react (and so tests can count
/// emitted mutations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CardMoved {
        card_id: CardId,
        to_column: ColumnId,
        index: usize,
    },
    ColumnMoved {
        column_id: ColumnId,
        over: ColumnId,
        placement: Placement,
    },
}
