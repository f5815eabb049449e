//! Amortized behavior sweep.

use tracing::debug;

use super::*;
use crate::domain::tiles::SimFlag;
use crate::spatial::SweepProgress;

impl TileMap {
    /// Visit at most `budget` cells of one chunk, starting at its cursor.
    ///
    /// Every visited cell whose occupant is `Simulated` gets `on_update`
    /// from each attached behavior, all with the pass's shared sweep time.
    /// When the cursor runs off the end the pass completes: the cursor
    /// rewinds and the next pass's sweep time becomes the current clock.
    pub fn advance_sweep(&mut self, layer: LayerType, chunk: usize, budget: usize) -> SweepProgress {
        let (slice, sweep_time) = {
            let target = self.layer(layer).chunk(chunk);
            (target.sweep_slice(budget), target.sweep_cursor().sweep_time)
        };

        for index in slice {
            self.layer_mut(layer).chunk_mut(chunk).finish_visit();
            self.perf_stats.tiles_visited += 1;

            let cell = CellRef {
                layer,
                chunk: chunk as u32,
                index: index as u32,
            };
            let tile = self.cell(cell).tile();
            let def = self.tiles.resolve(tile);
            if def.sim() != SimFlag::Simulated {
                continue;
            }

            let count = def.behaviors().len();
            for slot in 0..count {
                // An earlier behavior may have replaced the occupant.
                if self.cell(cell).tile() != tile {
                    break;
                }
                let id = self.tiles.resolve(tile).behaviors()[slot];
                let Some(behavior) = self.behaviors.get(id) else { continue };
                behavior.on_update(self, cell, sweep_time);
                self.perf_stats.behavior_calls += 1;
            }
        }

        let now = self.clock;
        let progress = self.layer_mut(layer).chunk_mut(chunk).close_slice(now);
        if progress.pass_complete {
            self.perf_stats.passes_completed += 1;
            debug!(?layer, chunk, sweep_time = now, "sweep pass complete");
        }
        progress
    }
}
