//! Tilemap Engine - chunked 2D tile grid with live adjacency
//!
//! Architecture:
//! - core/        - errors, tile coordinates, directions
//! - domain/      - atlas slicing, tile definitions, content bundles
//! - spatial/     - cells, chunks, layers and adjacency links
//! - systems/     - tile behaviors (lifecycle + periodic update)
//! - simulation/  - TileMap facade, frame step, mesh extraction, wasm API

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

pub use systems::behaviors;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Tilemap engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{Direction, Result, TileError, TilePos};
pub use domain::{AtlasMap, ContentBundle, MaterialHandle, SimFlag, TileDefinition, TileId, TileSpec, UvRect};
pub use simulation::{ChunkMesh, MapSettings, MeshCollector, TileMap, TileMapBuilder, TileWorld};
pub use spatial::{CellRef, Chunk, Layer, LayerType, TileCell};
pub use systems::behaviors::{BehaviorId, CellMeta, LifeBehavior, TileBehavior};
