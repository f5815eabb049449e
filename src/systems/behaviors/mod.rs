//! Behaviors - per-tile logic attached to tile definitions
//!
//! One behavior instance services every cell whose occupant references it,
//! so instances hold no per-cell state. Per-cell state lives in the cell's
//! metadata slot (`CellMeta`); state shared by all cells of one behavior is
//! an explicit field on the behavior (see `LifeBehavior::clock`).

mod life;

pub use life::{LifeBehavior, LifeClock, LifeMeta};

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::simulation::TileMap;
use crate::spatial::CellRef;

/// Stable index of a behavior inside a map's `BehaviorRegistry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BehaviorId(pub u32);

/// Lifecycle hooks + periodic update.
///
/// Hooks receive the whole map so they can inspect neighbours and replace
/// occupants; `cell` addresses the cell being processed.
pub trait TileBehavior {
    /// Occupant attached to `cell`. Runs after adjacency is relinked.
    fn on_init(&self, _map: &mut TileMap, _cell: CellRef) {}

    /// Occupant about to be detached from `cell`. The old metadata is still
    /// in place while this runs and is discarded right after.
    fn on_destroy(&self, _map: &mut TileMap, _cell: CellRef) {}

    /// Periodic update from the chunk sweep. `sweep_time` is shared by every
    /// tile visited during the same pass.
    fn on_update(&self, map: &mut TileMap, cell: CellRef, sweep_time: f64);
}

/// Per-cell metadata owned by whichever behavior occupies the cell.
pub enum CellMeta {
    Life(LifeMeta),
    /// Escape hatch for behaviors defined outside this crate.
    Custom(Box<dyn Any + Send + Sync>),
}

impl CellMeta {
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        CellMeta::Custom(Box::new(value))
    }

    pub fn as_life(&self) -> Option<&LifeMeta> {
        match self {
            CellMeta::Life(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn as_life_mut(&mut self) -> Option<&mut LifeMeta> {
        match self {
            CellMeta::Life(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            CellMeta::Custom(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        match self {
            CellMeta::Custom(value) => value.downcast_mut::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for CellMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellMeta::Life(meta) => f.debug_tuple("Life").field(meta).finish(),
            CellMeta::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Behavior registry - dispatch by `BehaviorId`
#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: Vec<Rc<dyn TileBehavior>>,
    key_to_id: HashMap<String, BehaviorId>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared instance under `key`. Re-registering a key returns
    /// the existing ID and keeps the first instance.
    pub fn register(&mut self, key: impl Into<String>, behavior: Rc<dyn TileBehavior>) -> BehaviorId {
        let key = key.into();
        if let Some(id) = self.key_to_id.get(&key) {
            return *id;
        }
        let id = BehaviorId(self.behaviors.len() as u32);
        self.behaviors.push(behavior);
        self.key_to_id.insert(key, id);
        id
    }

    /// Cloned handle, so the caller can hand `&mut TileMap` to the hook.
    #[inline]
    pub fn get(&self, id: BehaviorId) -> Option<Rc<dyn TileBehavior>> {
        self.behaviors.get(id.0 as usize).cloned()
    }

    pub fn id_by_key(&self, key: &str) -> Option<BehaviorId> {
        self.key_to_id.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("keys", &self.key_to_id)
            .finish()
    }
}
