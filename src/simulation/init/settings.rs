//! Map settings - sizes and per-frame budgets.

use serde::{Deserialize, Serialize};

use crate::core::{Result, TileError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapSettings {
    /// Tiles per map side.
    pub map_side: u32,
    /// Tiles per chunk side; must divide `map_side`.
    pub chunk_side: u32,
    /// World units per tile; scales emitted geometry.
    pub tile_unit_size: f32,
    /// Tiles each chunk visits per frame during its update sweep.
    pub sweep_budget: usize,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            map_side: 128,
            chunk_side: 32,
            tile_unit_size: 1.0,
            sweep_budget: 200,
        }
    }
}

impl MapSettings {
    pub fn new(map_side: u32, chunk_side: u32) -> Self {
        Self {
            map_side,
            chunk_side,
            ..Self::default()
        }
    }

    pub fn with_sweep_budget(mut self, budget: usize) -> Self {
        self.sweep_budget = budget;
        self
    }

    pub fn with_tile_unit_size(mut self, size: f32) -> Self {
        self.tile_unit_size = size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.map_side == 0 || self.chunk_side == 0 || self.map_side % self.chunk_side != 0 {
            return Err(TileError::InvalidDimensions {
                map_side: self.map_side,
                chunk_side: self.chunk_side,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn chunks_per_side(&self) -> u32 {
        self.map_side / self.chunk_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_exact_division() {
        assert!(MapSettings::new(128, 32).validate().is_ok());
        assert!(MapSettings::new(10, 5).validate().is_ok());
        assert!(matches!(
            MapSettings::new(100, 32).validate(),
            Err(TileError::InvalidDimensions { map_side: 100, chunk_side: 32 })
        ));
        assert!(MapSettings::new(0, 4).validate().is_err());
        assert!(MapSettings::new(4, 0).validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s: MapSettings = serde_json::from_str(r#"{ "mapSide": 64 }"#).unwrap();
        assert_eq!(s.map_side, 64);
        assert_eq!(s.chunk_side, 32);
        assert_eq!(s.sweep_budget, 200);
        assert_eq!(s.chunks_per_side(), 2);
    }
}
