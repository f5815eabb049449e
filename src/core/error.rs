use thiserror::Error;

/// Errors raised while configuring a map or resolving registry lookups.
///
/// Runtime reads and writes outside the map never produce one of these:
/// reads return synthetic air and writes are dropped with a warning.
#[derive(Debug, Error)]
pub enum TileError {
    #[error("unknown tile id {0}")]
    UnknownTileId(u32),
    #[error("texture id {0} is not registered in the atlas")]
    InvalidTextureId(u32),
    #[error("unknown behavior id {0}")]
    UnknownBehavior(u32),
    #[error("content references unknown key '{0}'")]
    UnknownKey(String),
    #[error("duplicate content key '{0}'")]
    DuplicateKey(String),
    #[error("map side {map_side} is not a non-zero multiple of chunk side {chunk_side}")]
    InvalidDimensions { map_side: u32, chunk_side: u32 },
    #[error("invalid content bundle: {0}")]
    Content(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TileError>;
