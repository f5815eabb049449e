//! Content bundle → builder. Tile keys are resolved in a prepass so
//! behaviors may name tiles declared later in the bundle.

use std::collections::HashMap;
use std::rc::Rc;

use super::*;
use crate::core::TileError;
use crate::domain::content::{BundleBehavior, ContentBundle};
use crate::domain::tiles::TileSpec;
use crate::systems::behaviors::{BehaviorId, LifeBehavior};

impl TileMapBuilder {
    /// Register everything the bundle declares, in bundle order.
    pub fn from_bundle(bundle: ContentBundle) -> Result<Self> {
        let mut builder = TileMapBuilder::new(bundle.settings);

        for atlas in &bundle.atlases {
            builder.atlas(atlas.material, atlas.u_subdivisions, atlas.v_subdivisions);
        }

        // IDs are dense and follow bundle order.
        let mut tile_ids: HashMap<&str, TileId> = HashMap::with_capacity(bundle.tiles.len());
        for (idx, tile) in bundle.tiles.iter().enumerate() {
            if tile_ids.insert(tile.key.as_str(), TileId(idx as u32)).is_some() {
                return Err(TileError::DuplicateKey(tile.key.clone()));
            }
        }
        let tile_id = |key: &str| -> Result<TileId> {
            tile_ids
                .get(key)
                .copied()
                .ok_or_else(|| TileError::UnknownKey(key.to_string()))
        };

        let mut behavior_ids: HashMap<&str, BehaviorId> = HashMap::new();
        for behavior in &bundle.behaviors {
            if behavior_ids.contains_key(behavior.key()) {
                return Err(TileError::DuplicateKey(behavior.key().to_string()));
            }
            let id = match behavior {
                BundleBehavior::Life { key, alive, dead, tick_interval } => {
                    let life = LifeBehavior::new(tile_id(alive)?, tile_id(dead)?, *tick_interval);
                    builder.behavior(key.as_str(), Rc::new(life))
                }
            };
            behavior_ids.insert(behavior.key(), id);
        }

        for tile in &bundle.tiles {
            let mut spec = TileSpec::new(tile.key.as_str())
                .rendered(tile.rendered)
                .sim(tile.sim);
            if let Some(texture) = tile.texture {
                spec = spec.texture(texture);
            }
            for key in &tile.behaviors {
                let id = behavior_ids
                    .get(key.as_str())
                    .copied()
                    .ok_or_else(|| TileError::UnknownKey(key.clone()))?;
                spec = spec.behavior(id);
            }
            builder.tile(spec)?;
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tiles::SimFlag;

    const LIFE: &str = r#"{
        "settings": { "mapSide": 8, "chunkSide": 4 },
        "atlases": [{ "material": 1, "uSubdivisions": 2, "vSubdivisions": 1 }],
        "behaviors": [
            { "kind": "life", "key": "life", "alive": "alive", "dead": "dead", "tickInterval": 0.25 }
        ],
        "tiles": [
            { "key": "dead", "sim": "simulated", "texture": 0, "behaviors": ["life"] },
            { "key": "alive", "sim": "simulated", "texture": 1, "behaviors": ["life"] },
            { "key": "hole", "rendered": false, "sim": "vacuum" }
        ]
    }"#;

    fn build(json: &str) -> Result<TileMap> {
        TileMapBuilder::from_bundle(ContentBundle::from_json(json)?)?.build()
    }

    #[test]
    fn bundle_registers_in_order() {
        let map = build(LIFE).unwrap();
        assert_eq!(map.tiles().len(), 3);
        assert_eq!(map.tiles().id_by_key("dead"), Some(TileId(0)));
        assert_eq!(map.tiles().id_by_key("alive"), Some(TileId(1)));
        assert_eq!(map.behaviors().len(), 1);
        assert_eq!(map.settings().map_side, 8);
        assert_eq!(map.atlas().texture_count(), 2);

        let alive = map.definition(TileId(1)).unwrap();
        assert_eq!(alive.sim(), SimFlag::Simulated);
        assert_eq!(alive.texture_id(), Some(1));
        assert_eq!(alive.behaviors(), &[BehaviorId(0)]);
        assert!(!map.definition(TileId(2)).unwrap().is_drawn());
    }

    #[test]
    fn builder_stays_open_after_the_bundle() {
        let mut builder = TileMapBuilder::from_bundle(ContentBundle::from_json(LIFE).unwrap()).unwrap();
        assert_eq!(builder.next_tile_id(), TileId(3));
        let extra = builder.tile(TileSpec::new("extra")).unwrap();
        let map = builder.build().unwrap();
        assert_eq!(map.tiles().id_by_key("extra"), Some(extra));
    }

    #[test]
    fn unknown_behavior_key_is_reported() {
        let json = r#"{ "tiles": [{ "key": "a", "behaviors": ["nope"] }] }"#;
        let err = build(json).unwrap_err();
        assert!(matches!(err, TileError::UnknownKey(k) if k == "nope"));
    }

    #[test]
    fn life_must_name_existing_tiles() {
        let json = r#"{
            "behaviors": [{ "kind": "life", "key": "l", "alive": "x", "dead": "a" }],
            "tiles": [{ "key": "a" }]
        }"#;
        let err = build(json).unwrap_err();
        assert!(matches!(err, TileError::UnknownKey(k) if k == "x"));
    }

    #[test]
    fn duplicate_tile_keys_are_rejected() {
        let json = r#"{ "tiles": [{ "key": "a" }, { "key": "a" }] }"#;
        let err = build(json).unwrap_err();
        assert!(matches!(err, TileError::DuplicateKey(k) if k == "a"));
    }

    #[test]
    fn texture_outside_atlas_fails() {
        let json = r#"{ "tiles": [{ "key": "a", "texture": 3 }] }"#;
        let err = build(json).unwrap_err();
        assert!(matches!(err, TileError::InvalidTextureId(3)));
    }

    #[test]
    fn manifest_lists_every_tile() {
        let map = TileMap::from_bundle_json(LIFE).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&map.manifest_json()).unwrap();
        assert_eq!(manifest["formatVersion"], 1);
        let tiles = manifest["tiles"].as_array().unwrap();
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[1]["key"], "alive");
        assert_eq!(tiles[1]["sim"], "simulated");
        assert_eq!(tiles[2]["rendered"], false);
        assert!(tiles[2].get("texture").is_none());
    }
}
