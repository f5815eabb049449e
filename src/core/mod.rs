//! Core - error taxonomy and tile-space coordinates shared by every layer
//! of the engine.

pub mod coords;
pub mod error;

pub use coords::{Direction, TilePos};
pub use error::{Result, TileError};
