//! TileCell - live state of one grid slot.
//!
//! Adjacency links are plain `CellRef` handles into the owning layer's chunk
//! array. They carry no ownership and are rebuilt whenever the structure
//! around a cell changes.

use crate::core::{Direction, TilePos};
use crate::domain::tiles::TileId;
use crate::systems::behaviors::CellMeta;

use super::layer::LayerType;

/// Handle to a cell: layer, chunk index within the layer, cell index within
/// the chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub layer: LayerType,
    pub chunk: u32,
    pub index: u32,
}

#[derive(Debug)]
pub struct TileCell {
    handle: Option<CellRef>,
    tile: TileId,
    links: [Option<CellRef>; 4],
    position: TilePos,
    flags: u32,
    meta: Option<CellMeta>,
}

/// Returned for every read outside the map. Occupied by `TileId::AIR`, has no
/// handle and no links, so chained lookups through it stay air.
pub static AIR_CELL: TileCell = TileCell {
    handle: None,
    tile: TileId::AIR,
    links: [None; 4],
    position: TilePos::new(0, 0),
    flags: 0,
    meta: None,
};

impl TileCell {
    pub(crate) fn new(handle: CellRef, tile: TileId, position: TilePos) -> Self {
        Self {
            handle: Some(handle),
            tile,
            links: [None; 4],
            position,
            flags: 0,
            meta: None,
        }
    }

    /// `None` only for the synthetic air cell.
    #[inline]
    pub fn handle(&self) -> Option<CellRef> { self.handle }

    #[inline]
    pub fn is_synthetic_air(&self) -> bool { self.handle.is_none() }

    #[inline]
    pub fn tile(&self) -> TileId { self.tile }

    /// World-space tile coordinate.
    #[inline]
    pub fn position(&self) -> TilePos { self.position }

    #[inline]
    pub fn flags(&self) -> u32 { self.flags }

    #[inline]
    pub fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }

    #[inline]
    pub fn neighbor_ref(&self, dir: Direction) -> Option<CellRef> {
        self.links[dir.index()]
    }

    #[inline]
    pub fn links(&self) -> &[Option<CellRef>; 4] { &self.links }

    #[inline]
    pub(crate) fn set_links(&mut self, links: [Option<CellRef>; 4]) {
        self.links = links;
    }

    #[inline]
    pub(crate) fn set_link(&mut self, dir: Direction, to: Option<CellRef>) {
        self.links[dir.index()] = to;
    }

    #[inline]
    pub fn meta(&self) -> Option<&CellMeta> { self.meta.as_ref() }

    #[inline]
    pub fn meta_mut(&mut self) -> Option<&mut CellMeta> { self.meta.as_mut() }

    /// Install metadata for the current occupant, replacing whatever was
    /// there.
    #[inline]
    pub fn set_meta(&mut self, meta: CellMeta) {
        self.meta = Some(meta);
    }

    /// Swap the occupant. Flags and metadata belong to the old occupant and
    /// are dropped.
    pub(crate) fn replace_occupant(&mut self, tile: TileId) -> TileId {
        self.flags = 0;
        self.meta = None;
        std::mem::replace(&mut self.tile, tile)
    }
}
