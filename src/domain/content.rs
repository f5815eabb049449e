//! Content bundles - JSON description of a map's atlases, behaviors and
//! tiles.
//!
//! Tiles are listed in ID order: the first tile becomes ID 0 and fills every
//! layer of a fresh map. Turning a bundle into a map is
//! `TileMapBuilder::from_bundle`; this module only parses and describes.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::domain::atlas::{MaterialHandle, TextureId};
use crate::domain::tiles::{SimFlag, TileRegistry};
use crate::simulation::MapSettings;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    #[serde(default)]
    pub settings: MapSettings,
    #[serde(default)]
    pub atlases: Vec<BundleAtlas>,
    #[serde(default)]
    pub behaviors: Vec<BundleBehavior>,
    pub tiles: Vec<BundleTile>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleAtlas {
    pub material: MaterialHandle,
    pub u_subdivisions: u32,
    pub v_subdivisions: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BundleBehavior {
    #[serde(rename_all = "camelCase")]
    Life {
        key: String,
        alive: String,
        dead: String,
        #[serde(default = "default_tick_interval")]
        tick_interval: f64,
    },
}

impl BundleBehavior {
    pub fn key(&self) -> &str {
        match self {
            BundleBehavior::Life { key, .. } => key,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleTile {
    pub key: String,
    #[serde(default = "default_rendered")]
    pub rendered: bool,
    #[serde(default = "default_sim")]
    pub sim: SimFlag,
    #[serde(default)]
    pub texture: Option<TextureId>,
    #[serde(default)]
    pub behaviors: Vec<String>,
}

fn default_tick_interval() -> f64 {
    0.5
}

fn default_rendered() -> bool {
    true
}

fn default_sim() -> SimFlag {
    SimFlag::Static
}

impl ContentBundle {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentManifest<'a> {
    format_version: u32,
    tiles: Vec<ManifestTile<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestTile<'a> {
    id: u32,
    key: &'a str,
    rendered: bool,
    sim: SimFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    texture: Option<TextureId>,
}

/// JSON listing of every registered tile, for hosts building palettes.
pub fn manifest_json(tiles: &TileRegistry) -> String {
    let out = ContentManifest {
        format_version: 1,
        tiles: tiles
            .iter()
            .map(|def| ManifestTile {
                id: def.id().0,
                key: def.key(),
                rendered: def.rendered(),
                sim: def.sim(),
                texture: def.texture_id(),
            })
            .collect(),
    };
    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileError;

    #[test]
    fn omitted_fields_take_defaults() {
        let json = r#"{
            "behaviors": [{ "kind": "life", "key": "l", "alive": "b", "dead": "a" }],
            "tiles": [{ "key": "a" }, { "key": "b", "sim": "simulated", "texture": 2, "behaviors": ["l"] }]
        }"#;
        let bundle = ContentBundle::from_json(json).unwrap();
        assert_eq!(bundle.settings.map_side, MapSettings::default().map_side);
        assert!(bundle.atlases.is_empty());

        let a = &bundle.tiles[0];
        assert!(a.rendered);
        assert_eq!(a.sim, SimFlag::Static);
        assert_eq!(a.texture, None);
        assert!(a.behaviors.is_empty());

        let b = &bundle.tiles[1];
        assert_eq!(b.sim, SimFlag::Simulated);
        assert_eq!(b.texture, Some(2));
        assert_eq!(b.behaviors, vec!["l".to_string()]);

        assert_eq!(bundle.behaviors[0].key(), "l");
        assert!(matches!(
            bundle.behaviors[0],
            BundleBehavior::Life { tick_interval, .. } if tick_interval == 0.5
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(ContentBundle::from_json("{ nope"), Err(TileError::Json(_))));
    }
}
