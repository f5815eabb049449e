//! Chunk geometry extraction - pure data handed to the external renderer.
//!
//! Every visible tile becomes one quad of six vertices (two triangles).
//! Positions are relative to the chunk centre and scaled by the tile unit
//! size; the renderer places the mesh at `origin`. The whole mesh is rebuilt
//! on every dirty flag, never patched.

use crate::domain::atlas::MaterialHandle;
use crate::domain::tiles::TileRegistry;
use crate::spatial::{Chunk, LayerType};

/// All quads face -Z.
pub const QUAD_NORMAL: [f32; 3] = [0.0, 0.0, -1.0];

/// Identifies a chunk across layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkKey {
    pub layer: LayerType,
    pub chunk: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// World-space centre of the chunk.
    pub origin: [f32; 3],
    /// Material of the first emitted quad.
    pub material: Option<MaterialHandle>,
    pub vertices: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn extract(chunk: &Chunk, tiles: &TileRegistry, tile_unit: f32) -> ChunkMesh {
        let side = chunk.side();
        let half = side as f32 * 0.5;
        let offset = -((side / 2) as i32);
        let origin = chunk.origin();

        let mut mesh = ChunkMesh {
            origin: [
                (origin.x as f32 + half) * tile_unit,
                (origin.y as f32 + half) * tile_unit,
                0.0,
            ],
            ..ChunkMesh::default()
        };

        for (index, cell) in chunk.cells().iter().enumerate() {
            let def = tiles.resolve(cell.tile());
            if !def.is_drawn() {
                continue;
            }

            let local = chunk.local_pos(index);
            let x0 = (local.x + offset) as f32 * tile_unit;
            let y0 = (local.y + offset) as f32 * tile_unit;
            let x1 = x0 + tile_unit;
            let y1 = y0 + tile_unit;

            // corners(): bottom-left, top-left, top-right, bottom-right
            let [bl, tl, tr, br] = def.texture().corners();

            mesh.vertices.extend_from_slice(&[
                [x1, y0, 0.0],
                [x1, y1, 0.0],
                [x0, y1, 0.0],
                [x1, y0, 0.0],
                [x0, y1, 0.0],
                [x0, y0, 0.0],
            ]);
            mesh.uvs.extend_from_slice(&[br, tr, tl, br, tl, bl]);
            mesh.normals.extend_from_slice(&[QUAD_NORMAL; 6]);

            if mesh.material.is_none() {
                mesh.material = Some(def.texture().material);
            }
        }

        mesh.indices = (0..mesh.vertices.len() as u32).collect();
        mesh
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Positions flattened to `[x, y, z, x, y, z, ...]`.
    pub fn flat_vertices(&self) -> Vec<f32> {
        self.vertices.iter().flatten().copied().collect()
    }

    pub fn flat_uvs(&self) -> Vec<f32> {
        self.uvs.iter().flatten().copied().collect()
    }

    pub fn flat_normals(&self) -> Vec<f32> {
        self.normals.iter().flatten().copied().collect()
    }
}

/// Consumer of rebuilt chunk geometry.
pub trait GeometrySink {
    fn chunk_rebuilt(&mut self, key: ChunkKey, mesh: &ChunkMesh);
}

impl<F: FnMut(ChunkKey, &ChunkMesh)> GeometrySink for F {
    fn chunk_rebuilt(&mut self, key: ChunkKey, mesh: &ChunkMesh) {
        self(key, mesh)
    }
}

/// Sink that keeps the meshes delivered during the last frame(s).
#[derive(Debug, Default)]
pub struct MeshCollector {
    pub meshes: Vec<(ChunkKey, ChunkMesh)>,
}

impl MeshCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
    }

    pub fn get(&self, key: ChunkKey) -> Option<&ChunkMesh> {
        self.meshes.iter().rev().find(|(k, _)| *k == key).map(|(_, m)| m)
    }
}

impl GeometrySink for MeshCollector {
    fn chunk_rebuilt(&mut self, key: ChunkKey, mesh: &ChunkMesh) {
        self.meshes.push((key, mesh.clone()));
    }
}

/// Sink that drops geometry; for headless simulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl GeometrySink for NullSink {
    fn chunk_rebuilt(&mut self, _key: ChunkKey, _mesh: &ChunkMesh) {}
}
