//! Tile definitions - immutable templates describing each kind of tile.
//!
//! Definitions are registered once while a map is being built and are
//! addressed by `TileId` afterwards. IDs are dense and assigned in
//! registration order, so the first registered definition (ID 0) doubles as
//! the default fill for freshly allocated chunks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{Result, TileError};
use crate::domain::atlas::{AtlasMap, TextureId, UvRect};
use crate::systems::behaviors::BehaviorId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Occupant of the synthetic air cell returned for off-map reads.
    /// Never assigned to a registered definition.
    pub const AIR: TileId = TileId(u32::MAX);

    #[inline]
    pub fn is_synthetic_air(self) -> bool {
        self == Self::AIR
    }
}

/// How the simulation treats a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimFlag {
    /// Scenery; never receives behavior updates.
    Static,
    /// Receives periodic behavior updates from the chunk sweep.
    Simulated,
    /// Empty and passable. Off-map reads report this.
    Air,
    /// Empty and impassable.
    Vacuum,
}

impl SimFlag {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, SimFlag::Air | SimFlag::Vacuum)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileDefinition {
    id: TileId,
    key: String,
    rendered: bool,
    sim: SimFlag,
    texture_id: Option<TextureId>,
    texture: UvRect,
    behaviors: Vec<BehaviorId>,
}

/// Definition backing the synthetic air cell.
pub static AIR_DEFINITION: TileDefinition = TileDefinition {
    id: TileId::AIR,
    key: String::new(),
    rendered: false,
    sim: SimFlag::Air,
    texture_id: None,
    texture: UvRect::EMPTY,
    behaviors: Vec::new(),
};

impl TileDefinition {
    #[inline]
    pub fn id(&self) -> TileId { self.id }

    #[inline]
    pub fn key(&self) -> &str { &self.key }

    #[inline]
    pub fn rendered(&self) -> bool { self.rendered }

    #[inline]
    pub fn sim(&self) -> SimFlag { self.sim }

    #[inline]
    pub fn texture_id(&self) -> Option<TextureId> { self.texture_id }

    /// UV rect resolved from the atlas at registration time.
    #[inline]
    pub fn texture(&self) -> &UvRect { &self.texture }

    /// Attached behaviors, in dispatch order.
    #[inline]
    pub fn behaviors(&self) -> &[BehaviorId] { &self.behaviors }

    /// Whether a chunk mesh should emit a quad for this definition.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.rendered && !self.sim.is_empty()
    }
}

/// Registration input for one tile kind.
#[derive(Clone, Debug)]
pub struct TileSpec {
    pub key: String,
    pub rendered: bool,
    pub sim: SimFlag,
    pub texture: Option<TextureId>,
    pub behaviors: Vec<BehaviorId>,
}

impl TileSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rendered: true,
            sim: SimFlag::Static,
            texture: None,
            behaviors: Vec::new(),
        }
    }

    pub fn rendered(mut self, rendered: bool) -> Self {
        self.rendered = rendered;
        self
    }

    pub fn sim(mut self, sim: SimFlag) -> Self {
        self.sim = sim;
        self
    }

    pub fn texture(mut self, id: TextureId) -> Self {
        self.texture = Some(id);
        self
    }

    pub fn behavior(mut self, id: BehaviorId) -> Self {
        self.behaviors.push(id);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct TileRegistry {
    defs: Vec<TileDefinition>,
    key_to_id: HashMap<String, TileId>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition. `behavior_count` bounds the behavior IDs it may
    /// reference.
    pub fn register(&mut self, spec: TileSpec, atlas: &AtlasMap, behavior_count: u32) -> Result<TileId> {
        if self.key_to_id.contains_key(&spec.key) {
            return Err(TileError::DuplicateKey(spec.key));
        }
        if let Some(bad) = spec.behaviors.iter().find(|b| b.0 >= behavior_count) {
            return Err(TileError::UnknownBehavior(bad.0));
        }

        let texture = match spec.texture {
            Some(tex) => atlas.lookup(tex)?,
            None => UvRect::EMPTY,
        };

        let id = TileId(self.defs.len() as u32);
        self.key_to_id.insert(spec.key.clone(), id);
        self.defs.push(TileDefinition {
            id,
            key: spec.key,
            rendered: spec.rendered,
            sim: spec.sim,
            texture_id: spec.texture,
            texture,
            behaviors: spec.behaviors,
        });
        Ok(id)
    }

    /// Registry lookup. The synthetic air ID resolves to `AIR_DEFINITION`.
    pub fn get(&self, id: TileId) -> Result<&TileDefinition> {
        if id.is_synthetic_air() {
            return Ok(&AIR_DEFINITION);
        }
        self.defs.get(id.0 as usize).ok_or(TileError::UnknownTileId(id.0))
    }

    /// Lookup for IDs already stored in cells; those are validated on write.
    #[inline]
    pub(crate) fn resolve(&self, id: TileId) -> &TileDefinition {
        self.defs.get(id.0 as usize).unwrap_or(&AIR_DEFINITION)
    }

    pub fn contains(&self, id: TileId) -> bool {
        (id.0 as usize) < self.defs.len()
    }

    pub fn id_by_key(&self, key: &str) -> Option<TileId> {
        self.key_to_id.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileDefinition> {
        self.defs.iter()
    }
}
