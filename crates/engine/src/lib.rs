pub mod cell;
pub mod error;
pub mod grid;
pub mod ops;
pub mod selection;

pub use cell::{Alignment, Cell, MergeIntent, VerticalAlignment};
pub use error::GridError;
pub use grid::Grid;
pub use selection::{Range, Selection};
