//! TileMap - coordinate-space authority and frame driver
//!
//! Owns the atlas, the definition registry, the behavior registry and one
//! layer per `LayerType`. Every coordinate-based read and write goes through
//! here and is routed to (layer, chunk, local position).
//!
//! - init/:     builder (registration + initial population), bundles, settings
//! - commands/: occupant replacement + behavior lifecycle hooks
//! - step/:     amortized sweep per chunk, per-frame driver
//! - render/:   chunk mesh extraction

use crate::core::{Direction, Result, TilePos};
use crate::domain::atlas::AtlasMap;
use crate::domain::tiles::{TileDefinition, TileId, TileRegistry};
use crate::spatial::{CellRef, Layer, LayerType, TileCell, AIR_CELL};
use crate::systems::behaviors::BehaviorRegistry;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "render/mesh.rs"]
pub mod mesh;
#[path = "init/builder.rs"]
mod builder;
#[path = "init/bundle.rs"]
mod bundle;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/edit.rs"]
mod edit;
#[path = "step/sweep.rs"]
mod sweep;
#[path = "step/step.rs"]
mod step;
mod facade;

pub use builder::TileMapBuilder;
pub use facade::TileWorld;
pub use mesh::{ChunkKey, ChunkMesh, GeometrySink, MeshCollector, NullSink};
pub use perf_stats::PerfStats;
pub use settings::MapSettings;
pub use step::StepReport;

use perf_timer::PerfTimer;

pub struct TileMap {
    settings: MapSettings,
    atlas: AtlasMap,
    tiles: TileRegistry,
    behaviors: BehaviorRegistry,
    layers: Vec<Layer>,

    // Simulation clock, advanced by `step`.
    clock: f64,
    frame: u64,

    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl std::fmt::Debug for TileMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileMap")
            .field("clock", &self.clock)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl TileMap {
    pub fn builder(settings: MapSettings) -> TileMapBuilder {
        TileMapBuilder::new(settings)
    }

    /// Parse a content bundle and build a populated map from it.
    pub fn from_bundle_json(json: &str) -> Result<TileMap> {
        let bundle = crate::domain::content::ContentBundle::from_json(json)?;
        TileMapBuilder::from_bundle(bundle)?.build()
    }

    // === Accessors ===

    pub fn settings(&self) -> &MapSettings { &self.settings }

    pub fn map_side(&self) -> u32 { self.settings.map_side }

    pub fn chunk_side(&self) -> u32 { self.settings.chunk_side }

    pub fn atlas(&self) -> &AtlasMap { &self.atlas }

    pub fn tiles(&self) -> &TileRegistry { &self.tiles }

    pub fn behaviors(&self) -> &BehaviorRegistry { &self.behaviors }

    pub fn clock(&self) -> f64 { self.clock }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn layer(&self, kind: LayerType) -> &Layer {
        &self.layers[kind.index()]
    }

    pub(crate) fn layer_mut(&mut self, kind: LayerType) -> &mut Layer {
        &mut self.layers[kind.index()]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Registry lookup; fails with `UnknownTileId`.
    pub fn definition(&self, id: TileId) -> Result<&TileDefinition> {
        self.tiles.get(id)
    }

    /// Definition of whatever currently occupies `cell` (air for the
    /// synthetic cell).
    pub fn definition_of(&self, cell: &TileCell) -> &TileDefinition {
        self.tiles.resolve(cell.tile())
    }

    pub fn manifest_json(&self) -> String {
        crate::domain::content::manifest_json(&self.tiles)
    }

    // === Reads ===

    /// Total read. Off-map coordinates return the synthetic air cell.
    /// With `mark_dirty` the owning chunk is flagged for a geometry rebuild.
    pub fn get_tile_at(&mut self, x: f32, y: f32, layer: LayerType, mark_dirty: bool) -> &TileCell {
        let pos = TilePos::from_world(x, y);
        let Some((chunk, _)) = self.layer(layer).locate(pos) else {
            return &AIR_CELL;
        };
        if mark_dirty {
            self.layer_mut(layer).chunk_mut(chunk).set_dirty(true);
        }
        self.layer(layer).tile_at(pos)
    }

    /// Read-only variant of `get_tile_at`.
    pub fn tile_at(&self, x: f32, y: f32, layer: LayerType) -> &TileCell {
        self.layer(layer).tile_at(TilePos::from_world(x, y))
    }

    pub fn tile_at_pos(&self, pos: TilePos, layer: LayerType) -> &TileCell {
        self.layer(layer).tile_at(pos)
    }

    pub fn cell_ref_at(&self, pos: TilePos, layer: LayerType) -> Option<CellRef> {
        self.layer(layer).cell_ref_at(pos)
    }

    pub fn cell(&self, at: CellRef) -> &TileCell {
        self.layer(at.layer).cell(at)
    }

    /// Mutable access for behaviors writing their own metadata or flags.
    /// `None` for handles that do not address a cell of this map.
    pub fn cell_mut(&mut self, at: CellRef) -> Option<&mut TileCell> {
        self.layer_mut(at.layer).cell_mut(at)
    }

    /// Follow one adjacency link. Unlinked directions (map edge, synthetic
    /// air) give air.
    pub fn linked<'a>(&'a self, from: &'a TileCell, dir: Direction) -> &'a TileCell {
        match from.neighbor_ref(dir) {
            Some(at) => self.cell(at),
            None => &AIR_CELL,
        }
    }

    pub fn neighbor(&self, at: CellRef, dir: Direction) -> &TileCell {
        self.linked(self.cell(at), dir)
    }

    // === Adjacency ===

    /// Relink every cell of one chunk.
    pub fn relink_chunk(&mut self, layer: LayerType, chunk: usize) {
        self.layer_mut(layer).relink_chunk(chunk);
    }

    /// Relink every layer.
    pub fn relink_all(&mut self) {
        for layer in &mut self.layers {
            layer.relink_all();
        }
    }

    // === Perf ===

    /// Enable or disable per-step timings (counts are always collected).
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
    }

    /// Snapshot of the last step.
    pub fn perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
