//! Layer - full-map grid of chunks for one draw-order band.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, TilePos};
use crate::domain::tiles::TileId;

use super::cell::{CellRef, TileCell, AIR_CELL};
use super::chunk::{BoundaryFetch, Chunk};

/// Draw order, ascending. Only the renderer cares about the ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerType {
    Floor = 0,
    Decal = 1,
    Foreground = 2,
}

impl LayerType {
    pub const ALL: [LayerType; 3] = [LayerType::Floor, LayerType::Decal, LayerType::Foreground];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<LayerType> {
        Self::ALL.get(index).copied()
    }
}

pub struct Layer {
    kind: LayerType,
    map_side: u32,
    chunk_side: u32,
    chunks_per_side: u32,
    chunks: Vec<Chunk>,
}

impl Layer {
    /// Allocate every chunk, filled with `fill`. Sides are validated by the
    /// caller (`map_side % chunk_side == 0`). Links are not wired yet; call
    /// `relink_all` once the layer is populated.
    pub fn new(kind: LayerType, map_side: u32, chunk_side: u32, fill: TileId) -> Self {
        let chunks_per_side = map_side / chunk_side;
        let mut chunks = Vec::with_capacity((chunks_per_side * chunks_per_side) as usize);
        for cy in 0..chunks_per_side {
            for cx in 0..chunks_per_side {
                let index = cx + cy * chunks_per_side;
                let origin = TilePos::new((cx * chunk_side) as i32, (cy * chunk_side) as i32);
                chunks.push(Chunk::new(kind, index, origin, chunk_side, fill));
            }
        }

        Self {
            kind,
            map_side,
            chunk_side,
            chunks_per_side,
            chunks,
        }
    }

    #[inline]
    pub fn kind(&self) -> LayerType { self.kind }

    #[inline]
    pub fn chunks_per_side(&self) -> u32 { self.chunks_per_side }

    #[inline]
    pub fn chunks(&self) -> &[Chunk] { &self.chunks }

    #[inline]
    pub fn chunk(&self, index: usize) -> &Chunk { &self.chunks[index] }

    #[inline]
    pub fn chunk_mut(&mut self, index: usize) -> &mut Chunk { &mut self.chunks[index] }

    #[inline]
    pub fn chunks_mut(&mut self) -> &mut [Chunk] { &mut self.chunks }

    // === Coordinate routing ===

    /// World position -> (chunk index, local position). `None` off the map.
    pub fn locate(&self, world: TilePos) -> Option<(usize, TilePos)> {
        if !world.in_square(self.map_side) {
            return None;
        }
        let side = self.chunk_side as i32;
        let cx = world.x / side;
        let cy = world.y / side;
        let chunk = (cx + cy * self.chunks_per_side as i32) as usize;
        Some((chunk, TilePos::new(world.x - cx * side, world.y - cy * side)))
    }

    pub fn cell_ref_at(&self, world: TilePos) -> Option<CellRef> {
        let (chunk, local) = self.locate(world)?;
        let index = self.chunks[chunk].checked_index(local)?;
        Some(CellRef {
            layer: self.kind,
            chunk: chunk as u32,
            index: index as u32,
        })
    }

    /// Total read; off-map positions give `AIR_CELL`.
    pub fn tile_at(&self, world: TilePos) -> &TileCell {
        self.fetch(world)
    }

    /// Handle lookup. Handles for another layer or out of range give air.
    pub fn cell(&self, at: CellRef) -> &TileCell {
        if at.layer != self.kind {
            return &AIR_CELL;
        }
        self.chunks
            .get(at.chunk as usize)
            .and_then(|c| c.cells().get(at.index as usize))
            .unwrap_or(&AIR_CELL)
    }

    pub fn cell_mut(&mut self, at: CellRef) -> Option<&mut TileCell> {
        if at.layer != self.kind {
            return None;
        }
        let chunk = self.chunks.get_mut(at.chunk as usize)?;
        if (at.index as usize) < chunk.len() {
            Some(chunk.cell_mut(at.index as usize))
        } else {
            None
        }
    }

    // === Adjacency ===

    /// Recompute the four links of one cell and write the matching back-link
    /// on each neighbour in the same call. Lookups go through
    /// `Chunk::tile_at`, so neighbours in other chunks resolve transparently
    /// and off-map neighbours resolve to unlinked air.
    ///
    /// Returns the indices of other chunks whose cells received a back-link;
    /// their edge geometry may need a rebuild.
    pub fn relink_neighbors(&mut self, chunk: usize, local: TilePos) -> Vec<usize> {
        let (here, found) = {
            let this: &Layer = self;
            let owner = &this.chunks[chunk];
            let Some(here) = owner.tile_at(local, this).handle() else {
                return Vec::new();
            };

            let mut found = [None; 4];
            for dir in Direction::ALL {
                found[dir.index()] = owner.tile_at(local.step(dir), this).handle();
            }
            (here, found)
        };

        if let Some(cell) = self.cell_mut(here) {
            cell.set_links(found);
        }

        let mut touched = Vec::new();
        for dir in Direction::ALL {
            let Some(n) = found[dir.index()] else { continue };
            if let Some(cell) = self.cell_mut(n) {
                cell.set_link(dir.opposite(), Some(here));
            }
            if n.chunk != here.chunk && !touched.contains(&(n.chunk as usize)) {
                touched.push(n.chunk as usize);
            }
        }
        touched
    }

    /// Relink every cell of one chunk.
    pub fn relink_chunk(&mut self, chunk: usize) {
        let side = self.chunk_side as i32;
        for y in 0..side {
            for x in 0..side {
                self.relink_neighbors(chunk, TilePos::new(x, y));
            }
        }
    }

    /// Relink the whole layer. Run once after population.
    pub fn relink_all(&mut self) {
        for chunk in 0..self.chunks.len() {
            self.relink_chunk(chunk);
        }
    }
}

impl BoundaryFetch for Layer {
    fn fetch(&self, world: TilePos) -> &TileCell {
        match self.locate(world) {
            Some((chunk, local)) => self.chunks[chunk].tile_at(local, self),
            None => &AIR_CELL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> Layer {
        let mut layer = Layer::new(LayerType::Floor, 8, 4, TileId(0));
        layer.relink_all();
        layer
    }

    #[test]
    fn locate_routes_to_chunk_and_local() {
        let layer = layer();
        assert_eq!(layer.locate(TilePos::new(5, 2)), Some((1, TilePos::new(1, 2))));
        assert_eq!(layer.locate(TilePos::new(3, 7)), Some((2, TilePos::new(3, 3))));
        assert_eq!(layer.locate(TilePos::new(8, 0)), None);
        assert_eq!(layer.locate(TilePos::new(-1, 0)), None);
    }

    #[test]
    fn links_cross_chunk_edges() {
        let layer = layer();
        let a = layer.cell_ref_at(TilePos::new(3, 1)).unwrap();
        let b = layer.cell_ref_at(TilePos::new(4, 1)).unwrap();
        assert_ne!(a.chunk, b.chunk);
        assert_eq!(layer.cell(a).neighbor_ref(Direction::Right), Some(b));
        assert_eq!(layer.cell(b).neighbor_ref(Direction::Left), Some(a));

        let top = layer.cell_ref_at(TilePos::new(2, 3)).unwrap();
        let above = layer.cell_ref_at(TilePos::new(2, 4)).unwrap();
        assert_eq!(layer.cell(top).neighbor_ref(Direction::Up), Some(above));
        assert_eq!(layer.cell(above).neighbor_ref(Direction::Down), Some(top));
    }

    #[test]
    fn map_edges_link_to_nothing() {
        let layer = layer();
        let corner = layer.cell(layer.cell_ref_at(TilePos::new(0, 0)).unwrap());
        assert_eq!(corner.neighbor_ref(Direction::Left), None);
        assert_eq!(corner.neighbor_ref(Direction::Down), None);
        assert!(corner.neighbor_ref(Direction::Up).is_some());
    }

    #[test]
    fn relink_reports_foreign_chunks() {
        let mut layer = layer();
        // (3, 3) borders chunk 1 on the right and chunk 2 above.
        let mut touched = layer.relink_neighbors(0, TilePos::new(3, 3));
        touched.sort_unstable();
        assert_eq!(touched, vec![1, 2]);
        assert!(layer.relink_neighbors(0, TilePos::new(1, 1)).is_empty());
    }
}
