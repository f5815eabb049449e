//! Chunk - fixed-size square block of cells
//!
//! Unit of dirty tracking (geometry rebuild) and of update amortization
//! (resumable sweep). Cells are allocated once and mutated in place.

use std::sync::atomic::AtomicBool;

use crate::core::TilePos;
use crate::domain::tiles::TileId;

use super::cell::{CellRef, TileCell};
use super::layer::LayerType;

mod fetch;
mod sweep;

pub use fetch::BoundaryFetch;
pub use sweep::{SweepCursor, SweepProgress};

pub struct Chunk {
    layer: LayerType,
    index: u32,
    /// World coordinate of local (0, 0).
    origin: TilePos,
    side: u32,
    cells: Vec<TileCell>,
    dirty: bool,
    sweep: SweepCursor,
    /// Set while a boundary fetch issued by this chunk is outstanding.
    fetch_in_flight: AtomicBool,
}

impl Chunk {
    /// Allocate `side * side` cells occupied by `fill`, row-major.
    pub fn new(layer: LayerType, index: u32, origin: TilePos, side: u32, fill: TileId) -> Self {
        let count = (side * side) as usize;
        let mut cells = Vec::with_capacity(count);
        for y in 0..side {
            for x in 0..side {
                let handle = CellRef {
                    layer,
                    chunk: index,
                    index: x + side * y,
                };
                let position = origin + TilePos::new(x as i32, y as i32);
                cells.push(TileCell::new(handle, fill, position));
            }
        }

        Self {
            layer,
            index,
            origin,
            side,
            cells,
            dirty: true,
            sweep: SweepCursor::default(),
            fetch_in_flight: AtomicBool::new(false),
        }
    }

    // === Identity ===

    #[inline]
    pub fn layer(&self) -> LayerType { self.layer }

    #[inline]
    pub fn index(&self) -> u32 { self.index }

    #[inline]
    pub fn origin(&self) -> TilePos { self.origin }

    #[inline]
    pub fn side(&self) -> u32 { self.side }

    #[inline]
    pub fn len(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    // === Index conversion ===

    /// `x + side * y`; only meaningful for `0 <= x, y < side`.
    #[inline]
    pub fn local_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.side && y < self.side,
            "local_index: ({}, {}) outside {}x{} chunk",
            x,
            y,
            self.side,
            self.side
        );
        (x + self.side * y) as usize
    }

    #[inline]
    pub fn checked_index(&self, local: TilePos) -> Option<usize> {
        if local.in_square(self.side) {
            Some(self.local_index(local.x as u32, local.y as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn local_pos(&self, index: usize) -> TilePos {
        let i = index as u32;
        TilePos::new((i % self.side) as i32, (i / self.side) as i32)
    }

    #[inline]
    pub fn to_world(&self, local: TilePos) -> TilePos {
        self.origin + local
    }

    // === Cell access ===

    #[inline]
    pub fn cell(&self, index: usize) -> &TileCell {
        &self.cells[index]
    }

    #[inline]
    pub fn cell_mut(&mut self, index: usize) -> &mut TileCell {
        &mut self.cells[index]
    }

    pub fn cells(&self) -> &[TileCell] {
        &self.cells
    }

    /// Replace the occupant of an in-bounds cell and flag the chunk for a
    /// rebuild. Returns the previous occupant.
    pub(crate) fn swap_occupant(&mut self, index: usize, tile: TileId) -> TileId {
        self.dirty = true;
        self.cells[index].replace_occupant(tile)
    }

    // === Dirty flag ===

    #[inline]
    pub fn is_dirty(&self) -> bool { self.dirty }

    #[inline]
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}
