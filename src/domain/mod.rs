//! Domain data: atlas slicing, tile definitions and content bundles.

pub mod atlas;
pub mod content;
pub mod tiles;

pub use atlas::{AtlasMap, MaterialHandle, TextureId, UvRect};
pub use content::ContentBundle;
pub use tiles::{SimFlag, TileDefinition, TileId, TileRegistry, TileSpec};
