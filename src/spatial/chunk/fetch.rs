//! Boundary fetch - reads that leave the chunk are resolved by the owner.

use std::sync::atomic::Ordering;

use crate::core::TilePos;
use crate::spatial::cell::{TileCell, AIR_CELL};

use super::Chunk;

/// Resolves world coordinates to cells on behalf of a chunk whose lookup
/// left its own bounds. Must be total: off-map positions yield `AIR_CELL`.
pub trait BoundaryFetch {
    fn fetch(&self, world: TilePos) -> &TileCell;
}

impl Chunk {
    /// In-bounds: direct array access. Out-of-bounds: resolved through
    /// `owner`, which may land in another chunk or off the map.
    pub fn tile_at<'a>(&'a self, local: TilePos, owner: &'a dyn BoundaryFetch) -> &'a TileCell {
        match self.checked_index(local) {
            Some(index) => &self.cells[index],
            None => self.fetch_across_boundary(local, owner),
        }
    }

    /// Guarded cross-chunk read. A second boundary fetch that re-enters this
    /// chunk while one is outstanding gets air instead of recursing.
    fn fetch_across_boundary<'a>(&'a self, local: TilePos, owner: &'a dyn BoundaryFetch) -> &'a TileCell {
        if self.fetch_in_flight.swap(true, Ordering::Acquire) {
            tracing::trace!(chunk = self.index, ?local, "re-entrant boundary fetch, returning air");
            self.fetch_in_flight.store(false, Ordering::Release);
            return &AIR_CELL;
        }

        let cell = owner.fetch(self.to_world(local));
        self.fetch_in_flight.store(false, Ordering::Release);
        cell
    }

    #[inline]
    pub fn fetch_in_flight(&self) -> bool {
        self.fetch_in_flight.load(Ordering::Acquire)
    }
}
