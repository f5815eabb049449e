//! Spatial partition: layer -> chunk -> cell.

pub mod cell;
pub mod chunk;
pub mod layer;

pub use cell::{CellRef, TileCell, AIR_CELL};
pub use chunk::{BoundaryFetch, Chunk, SweepCursor, SweepProgress};
pub use layer::{Layer, LayerType};
