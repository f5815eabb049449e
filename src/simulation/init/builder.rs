//! TileMapBuilder - registration phase of a map.
//!
//! Atlases, behaviors and definitions are append-only while the builder is
//! alive; `build` freezes them and populates every layer.

use std::ops::Range;
use std::rc::Rc;

use tracing::info;

use super::*;
use crate::core::TileError;
use crate::domain::atlas::{MaterialHandle, TextureId};
use crate::domain::tiles::TileSpec;
use crate::systems::behaviors::{BehaviorId, TileBehavior};

pub struct TileMapBuilder {
    settings: MapSettings,
    atlas: AtlasMap,
    tiles: TileRegistry,
    behaviors: BehaviorRegistry,
}

impl TileMapBuilder {
    pub fn new(settings: MapSettings) -> Self {
        Self {
            settings,
            atlas: AtlasMap::new(),
            tiles: TileRegistry::new(),
            behaviors: BehaviorRegistry::new(),
        }
    }

    pub fn settings(mut self, settings: MapSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Slice an atlas image into `u_sub * v_sub` texture IDs.
    pub fn atlas(&mut self, material: MaterialHandle, u_sub: u32, v_sub: u32) -> Range<TextureId> {
        self.atlas.register_atlas(material, u_sub, v_sub)
    }

    pub fn behavior(&mut self, key: impl Into<String>, behavior: Rc<dyn TileBehavior>) -> BehaviorId {
        self.behaviors.register(key, behavior)
    }

    pub fn tile(&mut self, spec: TileSpec) -> Result<TileId> {
        self.tiles
            .register(spec, &self.atlas, self.behaviors.len() as u32)
    }

    /// ID the next `tile` call will receive. Behaviors that reference tiles
    /// (e.g. alive/dead pairs) are created before those tiles exist.
    pub fn next_tile_id(&self) -> TileId {
        TileId(self.tiles.len() as u32)
    }

    pub fn tiles(&self) -> &TileRegistry {
        &self.tiles
    }

    /// Allocate the layers filled with tile 0, wire adjacency and run the
    /// default tile's init hooks on every cell.
    pub fn build(self) -> Result<TileMap> {
        self.settings.validate()?;
        if self.tiles.is_empty() {
            return Err(TileError::Content(
                "at least one tile definition is required".to_string(),
            ));
        }

        let fill = TileId(0);
        let MapSettings { map_side, chunk_side, .. } = self.settings;
        let mut layers: Vec<Layer> = LayerType::ALL
            .iter()
            .map(|&kind| Layer::new(kind, map_side, chunk_side, fill))
            .collect();
        for layer in &mut layers {
            layer.relink_all();
        }

        info!(
            map_side,
            chunk_side,
            chunks_per_side = self.settings.chunks_per_side(),
            definitions = self.tiles.len(),
            behaviors = self.behaviors.len(),
            "tile map built"
        );

        let mut map = TileMap {
            settings: self.settings,
            atlas: self.atlas,
            tiles: self.tiles,
            behaviors: self.behaviors,
            layers,
            clock: 0.0,
            frame: 0,
            perf_enabled: false,
            perf_stats: PerfStats::default(),
        };

        if !map.tiles.resolve(fill).behaviors().is_empty() {
            let handles: Vec<CellRef> = map
                .layers
                .iter()
                .flat_map(|layer| layer.chunks())
                .flat_map(|chunk| chunk.cells())
                .filter_map(TileCell::handle)
                .collect();
            for cell in handles {
                map.run_hooks(fill, cell, super::edit::Hook::Init);
            }
        }

        Ok(map)
    }
}
