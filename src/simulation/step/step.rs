#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::*;

/// Summary of one `TileMap::step`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    pub frame: u64,
    pub clock: f64,
    pub chunks_rebuilt: u32,
    pub passes_completed: u32,
}

impl TileMap {
    /// Advance one frame.
    ///
    /// 1. clock += `dt`
    /// 2. every dirty chunk is re-meshed and handed to `sink`, then cleaned
    /// 3. every chunk advances its sweep by `sweep_budget` tiles
    ///
    /// Chunks dirtied by the sweep are picked up by the next frame.
    pub fn step(&mut self, dt: f64, sink: &mut dyn GeometrySink) -> StepReport {
        let perf_on = self.perf_enabled;
        self.perf_stats.reset();
        let step_start = PerfTimer::start(perf_on);

        self.clock += dt;
        self.frame += 1;

        let t0 = PerfTimer::start(perf_on);
        self.rebuild_dirty(sink);
        self.perf_stats.rebuild_ms = t0.elapsed_ms();

        let t0 = PerfTimer::start(perf_on);
        let budget = self.settings.sweep_budget;
        for kind in LayerType::ALL {
            for chunk in 0..self.layer(kind).chunks().len() {
                self.advance_sweep(kind, chunk, budget);
            }
        }
        self.perf_stats.sweep_ms = t0.elapsed_ms();
        self.perf_stats.step_ms = step_start.elapsed_ms();

        StepReport {
            frame: self.frame,
            clock: self.clock,
            chunks_rebuilt: self.perf_stats.chunks_rebuilt,
            passes_completed: self.perf_stats.passes_completed,
        }
    }

    /// Mesh for one chunk regardless of its dirty flag.
    pub fn build_mesh(&self, layer: LayerType, chunk: usize) -> ChunkMesh {
        ChunkMesh::extract(
            self.layer(layer).chunk(chunk),
            &self.tiles,
            self.settings.tile_unit_size,
        )
    }

    fn rebuild_dirty(&mut self, sink: &mut dyn GeometrySink) {
        let unit = self.settings.tile_unit_size;
        for kind in LayerType::ALL {
            let meshes = extract_dirty(self.layer(kind), &self.tiles, unit);
            for (key, mesh) in &meshes {
                self.perf_stats.quads_emitted += mesh.quad_count() as u32;
                sink.chunk_rebuilt(*key, mesh);
                self.layer_mut(kind).chunk_mut(key.chunk as usize).set_dirty(false);
            }
            self.perf_stats.chunks_rebuilt += meshes.len() as u32;
        }
    }
}

#[cfg(feature = "parallel")]
fn extract_dirty(layer: &Layer, tiles: &TileRegistry, unit: f32) -> Vec<(ChunkKey, ChunkMesh)> {
    layer
        .chunks()
        .par_iter()
        .filter(|chunk| chunk.is_dirty())
        .map(|chunk| (chunk_key(chunk), ChunkMesh::extract(chunk, tiles, unit)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn extract_dirty(layer: &Layer, tiles: &TileRegistry, unit: f32) -> Vec<(ChunkKey, ChunkMesh)> {
    layer
        .chunks()
        .iter()
        .filter(|chunk| chunk.is_dirty())
        .map(|chunk| (chunk_key(chunk), ChunkMesh::extract(chunk, tiles, unit)))
        .collect()
}

#[inline]
fn chunk_key(chunk: &crate::spatial::Chunk) -> ChunkKey {
    ChunkKey {
        layer: chunk.layer(),
        chunk: chunk.index(),
    }
}
