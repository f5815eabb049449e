use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::{MeshCollector, TileMap};
use crate::domain::tiles::TileId;
use crate::spatial::LayerType;

fn js_err(err: crate::core::TileError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn layer_from_js(layer: u8) -> Option<LayerType> {
    LayerType::from_index(layer as usize)
}

/// Browser-facing handle. Meshes produced by the last `step` stay readable
/// by index until the next `step`.
#[wasm_bindgen]
pub struct TileWorld {
    map: TileMap,
    rebuilt: MeshCollector,
}

#[wasm_bindgen]
impl TileWorld {
    /// Build a world from a content bundle.
    #[wasm_bindgen(constructor)]
    pub fn new(bundle_json: &str) -> Result<TileWorld, JsValue> {
        let map = TileMap::from_bundle_json(bundle_json).map_err(js_err)?;
        Ok(Self {
            map,
            rebuilt: MeshCollector::new(),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn map_side(&self) -> u32 { self.map.map_side() }

    #[wasm_bindgen(getter)]
    pub fn chunk_side(&self) -> u32 { self.map.chunk_side() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.map.frame() }

    #[wasm_bindgen(getter)]
    pub fn clock(&self) -> f64 { self.map.clock() }

    /// Floor-layer write. Off-map writes are ignored; unknown IDs throw.
    pub fn set_tile(&mut self, x: f32, y: f32, id: u32) -> Result<(), JsValue> {
        self.map.set_tile(x, y, TileId(id)).map_err(js_err)
    }

    /// Occupant ID at a world position; `u32::MAX` off the map or for an
    /// unknown layer index.
    pub fn tile_id_at(&self, x: f32, y: f32, layer: u8) -> u32 {
        match layer_from_js(layer) {
            Some(kind) => self.map.tile_at(x, y, kind).tile().0,
            None => TileId::AIR.0,
        }
    }

    #[wasm_bindgen(js_name = tileIdByKey)]
    pub fn tile_id_by_key(&self, key: &str) -> Option<u32> {
        self.map.tiles().id_by_key(key).map(|id| id.0)
    }

    /// Advance one frame; returns how many chunk meshes were rebuilt.
    pub fn step(&mut self, dt: f64) -> u32 {
        self.rebuilt.clear();
        self.map.step(dt, &mut self.rebuilt).chunks_rebuilt
    }

    pub fn rebuilt_count(&self) -> u32 {
        self.rebuilt.meshes.len() as u32
    }

    pub fn rebuilt_layer(&self, i: usize) -> Option<u8> {
        self.rebuilt.meshes.get(i).map(|(key, _)| key.layer.index() as u8)
    }

    pub fn rebuilt_chunk(&self, i: usize) -> Option<u32> {
        self.rebuilt.meshes.get(i).map(|(key, _)| key.chunk)
    }

    pub fn mesh_origin(&self, i: usize) -> Option<js_sys::Float32Array> {
        let (_, mesh) = self.rebuilt.meshes.get(i)?;
        Some(js_sys::Float32Array::from(&mesh.origin[..]))
    }

    pub fn mesh_material(&self, i: usize) -> Option<u32> {
        let (_, mesh) = self.rebuilt.meshes.get(i)?;
        mesh.material.map(|m| m.0)
    }

    pub fn mesh_vertices(&self, i: usize) -> Option<js_sys::Float32Array> {
        let (_, mesh) = self.rebuilt.meshes.get(i)?;
        Some(js_sys::Float32Array::from(&mesh.flat_vertices()[..]))
    }

    pub fn mesh_uvs(&self, i: usize) -> Option<js_sys::Float32Array> {
        let (_, mesh) = self.rebuilt.meshes.get(i)?;
        Some(js_sys::Float32Array::from(&mesh.flat_uvs()[..]))
    }

    pub fn mesh_normals(&self, i: usize) -> Option<js_sys::Float32Array> {
        let (_, mesh) = self.rebuilt.meshes.get(i)?;
        Some(js_sys::Float32Array::from(&mesh.flat_normals()[..]))
    }

    pub fn mesh_indices(&self, i: usize) -> Option<js_sys::Uint32Array> {
        let (_, mesh) = self.rebuilt.meshes.get(i)?;
        Some(js_sys::Uint32Array::from(&mesh.indices[..]))
    }

    pub fn manifest_json(&self) -> String {
        self.map.manifest_json()
    }

    /// Enable or disable per-step timings
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.map.enable_perf_metrics(enabled);
    }

    /// Last step perf snapshot (timings zero when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.map.perf_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"{
        "settings": { "mapSide": 8, "chunkSide": 4 },
        "tiles": [{ "key": "grass" }, { "key": "rock" }]
    }"#;

    #[test]
    fn unknown_layer_reads_as_air() {
        let mut world = TileWorld::new(BUNDLE).unwrap();
        world.set_tile(1.0, 1.0, 1).unwrap();
        assert_eq!(world.tile_id_at(1.0, 1.0, 0), 1);
        assert_eq!(world.tile_id_at(1.0, 1.0, LayerType::ALL.len() as u8), u32::MAX);
        assert_eq!(world.tile_id_at(1.0, 1.0, u8::MAX), u32::MAX);
    }
}
