//! # Vijero Core
//!
//! Core board model and reorder-resolution engine for Vijero kanban boards.
//!
//! This crate provides the fundamental types and operations for managing
//! a board of ordered columns and cards, plus the engine that turns a live
//! pointer-drag gesture into discrete card/column moves, without any
//! dependency on specific UI implementations or storage backends.

pub mod domain;
pub mod engine;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, Placement},
    card::{Card, CardId, CardPatch},
    column::{Column, ColumnId},
};
pub use engine::{
    geometry::{Point, Rect},
    resolver::ReorderEngine,
    target::{DragItem, DropTarget, Mutation},
};
pub use error::{Result, VijeroError};
pub use storage::Storage;
