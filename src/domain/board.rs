use crate::domain::card::{Card, CardId, CardPatch};
use crate::domain::column::{Column, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Where to place a dragged column relative to the column it was dropped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Before,
    After,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// Full board state: columns, cards, and column ordering.
///
/// The board is the single owner of all structural state. Columns and cards
/// are addressed only by id. Invariants after every operation:
///
/// 1. `column_order` is a permutation of exactly the keys of `columns`.
/// 2. Every id in any column's `card_ids` is a key of `cards`.
/// 3. Every card id appears in the `card_ids` of exactly one column.
/// 4. Ids are unique within their namespace.
///
/// Every operation is atomic: it either fully applies or leaves the board
/// untouched. Operations referencing unknown ids are silent no-ops; callers
/// that need to know can inspect the returned value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    pub columns: HashMap<ColumnId, Column>,
    pub cards: HashMap<CardId, Card>,
    pub column_order: Vec<ColumnId>,
}

impl Board {
    /// Sentinel insertion index meaning "append at the end". Any index past
    /// the destination length clamps the same way.
    pub const APPEND: usize = usize::MAX;

    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a column with an empty card list, appended to the order.
    /// Returns the new column's id.
    pub fn add_column(&mut self, title: impl Into<String>) -> ColumnId {
        let column = Column::new(title.into());
        let id = column.id.clone();
        self.columns.insert(id.clone(), column);
        self.column_order.push(id.clone());
        id
    }

    /// Replaces a column's title. No-op if the id is unknown.
    pub fn rename_column(&mut self, id: &ColumnId, title: impl Into<String>) {
        if let Some(column) = self.columns.get_mut(id) {
            column.title = title.into();
        }
    }

    /// Deletes a column and every card it owned. No-op if the id is unknown.
    pub fn remove_column(&mut self, id: &ColumnId) {
        let Some(column) = self.columns.remove(id) else {
            return;
        };
        for card_id in &column.card_ids {
            self.cards.remove(card_id);
        }
        self.column_order.retain(|c| c != id);
    }

    /// Creates a card and appends it to the given column. Returns the new
    /// card's id, or `None` if the column is unknown.
    pub fn add_card(&mut self, column_id: &ColumnId, title: impl Into<String>) -> Option<CardId> {
        let column = self.columns.get_mut(column_id)?;
        let card = Card::new(title.into());
        let id = card.id.clone();
        column.card_ids.push(id.clone());
        self.cards.insert(id.clone(), card);
        Some(id)
    }

    /// Merges a partial update into an existing card. No-op if unknown.
    pub fn update_card(&mut self, id: &CardId, patch: CardPatch) {
        if let Some(card) = self.cards.get_mut(id) {
            card.apply_patch(patch);
        }
    }

    /// Deletes a card and strips it from whichever column owns it.
    /// No-op if the id is unknown.
    pub fn remove_card(&mut self, id: &CardId) {
        if self.cards.remove(id).is_none() {
            return;
        }
        for column in self.columns.values_mut() {
            column.card_ids.retain(|c| c != id);
        }
    }

    /// Moves a card into `to_column` at `index`, detaching it from its
    /// current owner. `index` is clamped into the destination's post-removal
    /// length, so [`Board::APPEND`] (or any oversized index) appends at the
    /// end. Returns whether a move was applied; unknown card or destination
    /// ids leave the board untouched.
    pub fn move_card(&mut self, card_id: &CardId, to_column: &ColumnId, index: usize) -> bool {
        if !self.columns.contains_key(to_column) {
            return false;
        }
        let Some(from_id) = self.owning_column(card_id).cloned() else {
            return false;
        };

        // Detach first so a same-column move clamps against the post-removal
        // length, avoiding an off-by-one shift.
        if let Some(from) = self.columns.get_mut(&from_id) {
            from.card_ids.retain(|c| c != card_id);
        }
        if let Some(to) = self.columns.get_mut(to_column) {
            let clamped = index.min(to.card_ids.len());
            to.card_ids.insert(clamped, card_id.clone());
        }
        true
    }

    /// Moves `drag_id` immediately before or after `over_id` within the
    /// column order. Returns whether a move was applied; equal ids or an
    /// unknown id leave the order untouched.
    pub fn move_column(&mut self, drag_id: &ColumnId, over_id: &ColumnId, placement: Placement) -> bool {
        if drag_id == over_id {
            return false;
        }
        let Some(drag_pos) = self.column_order.iter().position(|c| c == drag_id) else {
            return false;
        };
        let dragged = self.column_order.remove(drag_pos);
        let Some(over_pos) = self.column_order.iter().position(|c| c == over_id) else {
            // Unknown target: restore the original order
            self.column_order.insert(drag_pos, dragged);
            return false;
        };
        let insert_at = match placement {
            Placement::Before => over_pos,
            Placement::After => over_pos + 1,
        };
        self.column_order.insert(insert_at, dragged);
        true
    }

    /// The column currently owning `card_id`, if any.
    ///
    /// Linear scan over columns; at board scale this is cheap. Should boards
    /// grow large, a card-to-column reverse index maintained alongside the
    /// membership mutations would replace this.
    pub fn owning_column(&self, card_id: &CardId) -> Option<&ColumnId> {
        self.column_order
            .iter()
            .find(|id| self.columns.get(*id).is_some_and(|c| c.owns(card_id)))
    }

    /// Index of a column within the order, if present
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.column_order.iter().position(|c| c == id)
    }

    /// Columns in display order
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    /// Validates the structural invariants, returning the first violation
    /// found. Mutation operations preserve these; this exists for tests and
    /// for vetting rehydrated snapshots.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let mut seen_order = HashSet::new();
        for id in &self.column_order {
            if !self.columns.contains_key(id) {
                return Err(format!("column_order references unknown column {id}"));
            }
            if !seen_order.insert(id) {
                return Err(format!("column_order contains {id} more than once"));
            }
        }
        if seen_order.len() != self.columns.len() {
            return Err("column_order does not cover every column".to_string());
        }

        let mut owners: HashMap<&CardId, &ColumnId> = HashMap::new();
        for column in self.columns.values() {
            for card_id in &column.card_ids {
                if !self.cards.contains_key(card_id) {
                    return Err(format!(
                        "column {} references unknown card {card_id}",
                        column.id
                    ));
                }
                if let Some(other) = owners.insert(card_id, &column.id) {
                    return Err(format!(
                        "card {card_id} owned by both {other} and {}",
                        column.id
                    ));
                }
            }
        }
        for card_id in self.cards.keys() {
            if !owners.contains_key(card_id) {
                return Err(format!("card {card_id} is owned by no column"));
            }
        }
        Ok(())
    }

    /// Repairs a snapshot that may violate the invariants (e.g. one
    /// rehydrated from untrusted persisted state): drops order entries for
    /// unknown columns, appends columns missing from the order, removes
    /// dangling card references, keeps only the first owner of a duplicated
    /// card, and deletes cards no column owns. Returns whether anything
    /// changed.
    pub fn repair(&mut self) -> bool {
        let mut changed = false;

        let before = self.column_order.len();
        let mut seen_cols = HashSet::new();
        let columns = &self.columns;
        self.column_order
            .retain(|id| columns.contains_key(id) && seen_cols.insert(id.clone()));
        changed |= self.column_order.len() != before;

        let mut missing: Vec<ColumnId> = self
            .columns
            .keys()
            .filter(|id| !seen_cols.contains(*id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            missing.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            self.column_order.extend(missing);
            changed = true;
        }

        // First owner in display order wins a duplicated card.
        let mut owned = HashSet::new();
        for col_id in self.column_order.clone() {
            let cards = &self.cards;
            if let Some(column) = self.columns.get_mut(&col_id) {
                let before = column.card_ids.len();
                column
                    .card_ids
                    .retain(|id| cards.contains_key(id) && owned.insert(id.clone()));
                changed |= column.card_ids.len() != before;
            }
        }

        let before = self.cards.len();
        self.cards.retain(|id, _| owned.contains(id));
        changed |= self.cards.len() != before;

        changed
    }
}
