//! Reorder resolution: turns a live drag gesture into discrete board moves.
//!
//! [`ReorderEngine`] is a stateful processor consuming gesture lifecycle
//! events (`start`, `pointer_moved`, `hover`, `end`, `cancel`) plus the drop
//! target under the pointer, and deciding whether and where a structural move
//! should happen. The hard part is converting noisy continuous geometry into
//! discrete moves without flicker:
//!
//! - **Half-threshold hysteresis** for columns: a reorder only commits once
//!   the pointer crosses the midpoint of the target marker in the direction
//!   of travel. Without it, swapping two adjacent columns immediately
//!   re-triggers the reverse swap on the next event, because the moved
//!   column's new position makes the previous slot the candidate target.
//! - **Dedup memory** for cards: the engine remembers the last
//!   `(card, column, index)` move it committed during the gesture and skips
//!   re-emitting an identical one while the pointer sits still.
//!
//! Moves are applied as the pointer travels (live preview); `end` runs one
//! final resolution and `cancel` never rolls anything back. A resolution that
//! cannot map to a known column or card is a no-op, not a fault, so the drag
//! stays responsive even if the board changed mid-gesture.

use crate::domain::{Board, CardId, ColumnId, Placement};
use crate::engine::geometry::Point;
use crate::engine::target::{DragItem, DropTarget, Mutation};
use tracing::{debug, trace};

/// The last committed card move within the current gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CommittedMove {
    card_id: CardId,
    to_column: ColumnId,
    index: usize,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Dragging {
        item: DragItem,
        last_committed: Option<CommittedMove>,
    },
}

/// Per-gesture drag state machine. Idle until `start`, Dragging until
/// `end` or `cancel`.
///
/// The engine's bookkeeping (active drag identity, dedup memory) is private
/// and never part of the board's state; the board is only touched through
/// its documented move operations.
#[derive(Debug, Clone, Default)]
pub struct ReorderEngine {
    state: State,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in flight
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Begins a gesture for the given entity. A `start` while already
    /// dragging abandons the previous gesture (its applied moves remain).
    pub fn start(&mut self, item: DragItem) {
        debug!(?item, "drag start");
        self.state = State::Dragging {
            item,
            last_committed: None,
        };
    }

    /// Raw pointer movement during a gesture. Recomputes the resolution
    /// against the current target, possibly committing a move.
    pub fn pointer_moved(
        &mut self,
        board: &mut Board,
        target: Option<&DropTarget>,
        pointer: Point,
    ) -> Option<Mutation> {
        self.resolve(board, target, pointer)
    }

    /// Hover over a specific drop target. Same resolution as
    /// [`pointer_moved`](Self::pointer_moved); hosts that distinguish
    /// move/over events feed both through the engine.
    pub fn hover(
        &mut self,
        board: &mut Board,
        target: &DropTarget,
        pointer: Point,
    ) -> Option<Mutation> {
        self.resolve(board, Some(target), pointer)
    }

    /// Ends the gesture, running the resolution once more with the
    /// end-of-gesture data so the final resting position matches the last
    /// preview even if no hover event fired for that exact frame.
    pub fn end(
        &mut self,
        board: &mut Board,
        target: Option<&DropTarget>,
        pointer: Point,
    ) -> Option<Mutation> {
        let mutation = self.resolve(board, target, pointer);
        debug!("drag end");
        self.state = State::Idle;
        mutation
    }

    /// Cancels the gesture. Safe at any point, including immediately after
    /// `start`. Moves already applied during the gesture stay applied.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("drag cancel");
        }
        self.state = State::Idle;
    }

    fn resolve(
        &mut self,
        board: &mut Board,
        target: Option<&DropTarget>,
        pointer: Point,
    ) -> Option<Mutation> {
        let State::Dragging {
            item,
            last_committed,
        } = &mut self.state
        else {
            return None;
        };
        let target = target?;
        match item.clone() {
            DragItem::Column(drag_id) => resolve_column(board, &drag_id, target, pointer),
            DragItem::Card(card_id) => resolve_card(board, &card_id, target, last_committed),
        }
    }
}

/// Column reordering with half-threshold hysteresis. Only index markers
/// participate; resolving against other columns' content rectangles is
/// unstable once the dragged column visually shrinks.
fn resolve_column(
    board: &mut Board,
    drag_id: &ColumnId,
    target: &DropTarget,
    pointer: Point,
) -> Option<Mutation> {
    let DropTarget::Marker { index, .. } = target else {
        return None;
    };
    let current = board.column_index(drag_id)?;
    let half = target.rect()?.mid_x();
    let count = board.column_order.len();

    // Trailing marker: move to the end once the pointer passes its midpoint.
    if *index >= count {
        if current == count - 1 || pointer.x <= half {
            return None;
        }
        let last = board.column_order.last()?.clone();
        return commit_column(board, drag_id, &last, Placement::After);
    }

    let target_id = board.column_order.get(*index)?.clone();
    if current < *index && pointer.x > half {
        commit_column(board, drag_id, &target_id, Placement::After)
    } else if current > *index && pointer.x < half {
        commit_column(board, drag_id, &target_id, Placement::Before)
    } else {
        trace!(current, target = *index, pointer_x = pointer.x, "threshold not crossed");
        None
    }
}

fn commit_column(
    board: &mut Board,
    drag_id: &ColumnId,
    over: &ColumnId,
    placement: Placement,
) -> Option<Mutation> {
    if !board.move_column(drag_id, over, placement) {
        return None;
    }
    debug!(%drag_id, %over, %placement, "column moved");
    Some(Mutation::ColumnMoved {
        column_id: drag_id.clone(),
        over: over.clone(),
        placement,
    })
}

/// Card placement: derive a destination column and insertion index from the
/// hovered target, then move unless the identical move was already committed
/// this gesture.
fn resolve_card(
    board: &mut Board,
    card_id: &CardId,
    target: &DropTarget,
    last_committed: &mut Option<CommittedMove>,
) -> Option<Mutation> {
    let (to_column, index) = match target {
        DropTarget::Card {
            id: target_card,
            column_id,
            ..
        } => {
            let column = board.columns.get(column_id)?;
            let mut insert_at = column
                .position_of(target_card)
                .unwrap_or(column.card_ids.len());
            // Within the same column, removing the dragged card shifts
            // everything after it left by one.
            if board.owning_column(card_id) == Some(column_id) {
                if let Some(current) = board.columns.get(column_id)?.position_of(card_id) {
                    if insert_at > current {
                        insert_at -= 1;
                    }
                }
            }
            (column_id.clone(), insert_at)
        }
        DropTarget::Column { id, .. } => (id.clone(), Board::APPEND),
        DropTarget::Marker { index, .. } => {
            if board.column_order.is_empty() {
                return None;
            }
            let idx = (*index).min(board.column_order.len() - 1);
            (board.column_order[idx].clone(), Board::APPEND)
        }
    };

    let candidate = CommittedMove {
        card_id: card_id.clone(),
        to_column: to_column.clone(),
        index,
    };
    if last_committed.as_ref() == Some(&candidate) {
        trace!(%card_id, %to_column, index, "duplicate move suppressed");
        return None;
    }
    if !board.move_card(card_id, &to_column, index) {
        return None;
    }
    debug!(%card_id, %to_column, index, "card moved");
    *last_committed = Some(candidate);
    Some(Mutation::CardMoved {
        card_id: card_id.clone(),
        to_column,
        index,
    })
}
