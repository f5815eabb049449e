//! Occupant replacement - teardown, swap, relink, init, dirty.

use tracing::warn;

use super::*;
use crate::core::TileError;

/// Lifecycle hook selector for `run_hooks`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Hook {
    Init,
    Destroy,
}

impl TileMap {
    /// Write an occupant at world coordinates on the floor layer.
    ///
    /// Off-map positions are a no-op (`Ok`), never a panic: an invalid write
    /// must not leave adjacency half-updated. Unknown IDs fail before anything
    /// is touched.
    pub fn set_tile(&mut self, x: f32, y: f32, id: TileId) -> Result<()> {
        self.set_tile_on(LayerType::Floor, x, y, id)
    }

    /// `set_tile` for an explicit layer.
    pub fn set_tile_on(&mut self, layer: LayerType, x: f32, y: f32, id: TileId) -> Result<()> {
        self.tiles.get(id)?;
        let pos = TilePos::from_world(x, y);
        match self.layer(layer).locate(pos) {
            Some((chunk, local)) => self.set_tile_in_chunk(layer, chunk, local, id),
            None => {
                warn!(x = pos.x, y = pos.y, ?layer, "set_tile outside the map ignored");
                Ok(())
            }
        }
    }

    /// Chunk-local write. A local position outside the chunk is translated
    /// to world space and forwarded once to the layer-level write; that write
    /// never forwards again.
    pub fn set_tile_in_chunk(&mut self, layer: LayerType, chunk: usize, local: TilePos, id: TileId) -> Result<()> {
        let target = self.layer(layer).chunk(chunk);
        match target.checked_index(local) {
            Some(index) => self.replace_occupant(layer, chunk, index, id),
            None => {
                let world = target.to_world(local);
                self.write_world(layer, world, id)
            }
        }
    }

    /// Replace the occupant behind a handle. Behaviors use this to rewrite
    /// their own cell.
    pub fn set_cell(&mut self, at: CellRef, id: TileId) -> Result<()> {
        if self.layer(at.layer).cell(at).is_synthetic_air() {
            warn!(?at, "set_cell on a handle outside the map ignored");
            return Ok(());
        }
        self.replace_occupant(at.layer, at.chunk as usize, at.index as usize, id)
    }

    fn write_world(&mut self, layer: LayerType, world: TilePos, id: TileId) -> Result<()> {
        let Some((chunk, local)) = self.layer(layer).locate(world) else {
            warn!(x = world.x, y = world.y, ?layer, "forwarded write outside the map ignored");
            return Ok(());
        };
        let Some(index) = self.layer(layer).chunk(chunk).checked_index(local) else {
            return Ok(());
        };
        self.replace_occupant(layer, chunk, index, id)
    }

    fn replace_occupant(&mut self, layer: LayerType, chunk: usize, index: usize, id: TileId) -> Result<()> {
        if !self.tiles.contains(id) {
            return Err(TileError::UnknownTileId(id.0));
        }

        let cell = CellRef {
            layer,
            chunk: chunk as u32,
            index: index as u32,
        };
        let previous = self.cell(cell).tile();
        self.run_hooks(previous, cell, Hook::Destroy);

        let local = {
            let target = self.layer_mut(layer).chunk_mut(chunk);
            target.swap_occupant(index, id);
            target.local_pos(index)
        };

        let touched = self.layer_mut(layer).relink_neighbors(chunk, local);
        for other in touched {
            self.layer_mut(layer).chunk_mut(other).set_dirty(true);
        }

        self.run_hooks(id, cell, Hook::Init);
        self.layer_mut(layer).chunk_mut(chunk).set_dirty(true);
        Ok(())
    }

    /// Run one lifecycle hook of every behavior attached to `tile`, in
    /// attachment order.
    pub(super) fn run_hooks(&mut self, tile: TileId, cell: CellRef, hook: Hook) {
        let count = self.tiles.resolve(tile).behaviors().len();
        for slot in 0..count {
            let id = self.tiles.resolve(tile).behaviors()[slot];
            let Some(behavior) = self.behaviors.get(id) else { continue };
            match hook {
                Hook::Init => behavior.on_init(self, cell),
                Hook::Destroy => behavior.on_destroy(self, cell),
            }
        }
    }
}
