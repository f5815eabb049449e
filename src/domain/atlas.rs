//! Atlas - texture-ID to UV-rect mapping for subdivided atlas images.
//!
//! Each registered image is cut into `u_sub x v_sub` cells. Cells receive
//! sequential IDs row-major (rows run along v, columns along u) and every
//! rect is pulled inwards by a texel-bleed margin so neighbouring cells never
//! bleed into each other when sampled at tile borders.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::{Result, TileError};

/// Margin divisor: inset = (1 / u_sub) / BLEED_DIVISOR on every edge.
pub const BLEED_DIVISOR: f32 = 64.0;

pub type TextureId = u32;

/// Opaque renderer-side material reference. The engine never interprets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

/// Inset UV rectangle inside an atlas image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub material: MaterialHandle,
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl UvRect {
    /// Degenerate rect used by definitions that are never drawn.
    pub const EMPTY: UvRect = UvRect {
        material: MaterialHandle(0),
        min: [0.0, 0.0],
        max: [0.0, 0.0],
    };

    /// Corners in bottom-left, top-left, top-right, bottom-right order.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.min[0], self.min[1]],
            [self.min[0], self.max[1]],
            [self.max[0], self.max[1]],
            [self.max[0], self.min[1]],
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct AtlasMap {
    rects: Vec<UvRect>,
}

impl AtlasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slice an atlas image and return the IDs assigned to its cells.
    /// Zero subdivisions are treated as one.
    pub fn register_atlas(&mut self, material: MaterialHandle, u_sub: u32, v_sub: u32) -> Range<TextureId> {
        let u_div = u_sub.max(1);
        let v_div = v_sub.max(1);

        let cell_u = 1.0 / u_div as f32;
        let cell_v = 1.0 / v_div as f32;
        let inset = cell_u / BLEED_DIVISOR;

        let first = self.rects.len() as TextureId;
        self.rects.reserve((u_div * v_div) as usize);

        for row in 0..v_div {
            for col in 0..u_div {
                let u0 = col as f32 * cell_u;
                let v0 = row as f32 * cell_v;
                self.rects.push(UvRect {
                    material,
                    min: [u0 + inset, v0 + inset],
                    max: [u0 + cell_u - inset, v0 + cell_v - inset],
                });
            }
        }

        first..self.rects.len() as TextureId
    }

    pub fn lookup(&self, id: TextureId) -> Result<UvRect> {
        self.rects
            .get(id as usize)
            .copied()
            .ok_or(TileError::InvalidTextureId(id))
    }

    pub fn texture_count(&self) -> u32 {
        self.rects.len() as u32
    }
}
