use wasm_bindgen::prelude::*;

/// Per-frame counters. Timings stay at zero unless perf metrics are on;
/// counts are always filled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(crate) step_ms: f64,
    pub(crate) rebuild_ms: f64,
    pub(crate) sweep_ms: f64,
    pub(crate) chunks_rebuilt: u32,
    pub(crate) quads_emitted: u32,
    pub(crate) tiles_visited: u32,
    pub(crate) behavior_calls: u32,
    pub(crate) passes_completed: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn rebuild_ms(&self) -> f64 { self.rebuild_ms }
    #[wasm_bindgen(getter)]
    pub fn sweep_ms(&self) -> f64 { self.sweep_ms }
    #[wasm_bindgen(getter)]
    pub fn chunks_rebuilt(&self) -> u32 { self.chunks_rebuilt }
    #[wasm_bindgen(getter)]
    pub fn quads_emitted(&self) -> u32 { self.quads_emitted }
    #[wasm_bindgen(getter)]
    pub fn tiles_visited(&self) -> u32 { self.tiles_visited }
    #[wasm_bindgen(getter)]
    pub fn behavior_calls(&self) -> u32 { self.behavior_calls }
    #[wasm_bindgen(getter)]
    pub fn passes_completed(&self) -> u32 { self.passes_completed }
}
