pub mod geometry;
pub mod resolver;
pub mod target;

pub use geometry::{Point, Rect};
pub use resolver::ReorderEngine;
pub use target::{DragItem, DropTarget, Mutation};
