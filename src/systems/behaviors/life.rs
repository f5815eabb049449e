//! LifeBehavior - cellular automaton with a two-phase tick
//!
//! Decide pass: every due cell counts its live neighbours and records the
//! outcome in its metadata. Commit pass: every due cell applies the recorded
//! outcome. No occupant changes during a decide pass, so neighbour counts
//! never see a write from the same sweep.
//!
//! Neighbourhood: left, right, up, down, plus the four diagonals reached by
//! one extra hop from left/right (`left.up`, `left.down`, ...).

use std::cell::Cell;

use crate::core::Direction;
use crate::domain::tiles::TileId;
use crate::simulation::TileMap;
use crate::spatial::{CellRef, TileCell};

use super::{CellMeta, TileBehavior};

/// Outcome of the last decide pass for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeMeta {
    pub pending_birth: bool,
    pub pending_death: bool,
}

/// Phase state shared by every cell running the same `LifeBehavior`.
/// The automaton advances in lockstep, so there is exactly one of these per
/// behavior instance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LifeClock {
    /// `false` = decide, `true` = commit.
    pub commit_phase: bool,
    pub acted_this_phase: bool,
    pub last_update: f64,
    /// Sweep time seen by the most recent call; a change means a new pass.
    pub seen_sweep: f64,
}

pub struct LifeBehavior {
    alive: TileId,
    dead: TileId,
    tick_interval: f64,
    clock: Cell<LifeClock>,
}

impl LifeBehavior {
    pub fn new(alive: TileId, dead: TileId, tick_interval: f64) -> Self {
        Self {
            alive,
            dead,
            tick_interval,
            clock: Cell::new(LifeClock::default()),
        }
    }

    pub fn alive(&self) -> TileId { self.alive }

    pub fn dead(&self) -> TileId { self.dead }

    pub fn clock(&self) -> LifeClock {
        self.clock.get()
    }

    #[inline]
    fn is_alive(&self, cell: &TileCell) -> u32 {
        (cell.tile() == self.alive) as u32
    }

    fn live_neighbours(&self, map: &TileMap, cell: CellRef) -> u32 {
        let here = map.cell(cell);
        let mut alive = 0;

        for side in [Direction::Left, Direction::Right] {
            let n = map.linked(here, side);
            alive += self.is_alive(n);
            alive += self.is_alive(map.linked(n, Direction::Up));
            alive += self.is_alive(map.linked(n, Direction::Down));
        }
        alive += self.is_alive(map.linked(here, Direction::Up));
        alive += self.is_alive(map.linked(here, Direction::Down));

        alive
    }

    fn decide(&self, map: &mut TileMap, cell: CellRef) {
        let alive = self.live_neighbours(map, cell);
        let occupant = map.cell(cell).tile();

        let die = occupant == self.alive && !(2..=3).contains(&alive);
        let born = occupant == self.dead && alive == 3;

        if let Some(meta) = life_meta_mut(map, cell) {
            meta.pending_death = die;
            meta.pending_birth = born;
        }
    }

    fn commit(&self, map: &mut TileMap, cell: CellRef, meta: LifeMeta) {
        if meta.pending_death {
            self.clear_pending(map, cell);
            self.replace(map, cell, self.dead);
        }
        if meta.pending_birth {
            self.clear_pending(map, cell);
            self.replace(map, cell, self.alive);
        }
    }

    fn clear_pending(&self, map: &mut TileMap, cell: CellRef) {
        if let Some(meta) = life_meta_mut(map, cell) {
            *meta = LifeMeta::default();
        }
    }

    fn replace(&self, map: &mut TileMap, cell: CellRef, tile: TileId) {
        if let Err(err) = map.set_cell(cell, tile) {
            tracing::warn!(?cell, %err, "life: failed to replace occupant");
        }
    }
}

fn life_meta_mut(map: &mut TileMap, cell: CellRef) -> Option<&mut LifeMeta> {
    map.cell_mut(cell)?.meta_mut()?.as_life_mut()
}

impl TileBehavior for LifeBehavior {
    fn on_init(&self, map: &mut TileMap, cell: CellRef) {
        if let Some(here) = map.cell_mut(cell) {
            here.set_meta(CellMeta::Life(LifeMeta::default()));
        }
    }

    fn on_update(&self, map: &mut TileMap, cell: CellRef, sweep_time: f64) {
        let Some(meta) = map.cell(cell).meta().and_then(CellMeta::as_life).copied() else {
            // First encounter: adopt the cell and restart the shared clock.
            if let Some(here) = map.cell_mut(cell) {
                here.set_meta(CellMeta::Life(LifeMeta::default()));
            }
            self.clock.set(LifeClock::default());
            return;
        };

        let mut clock = self.clock.get();
        if clock.seen_sweep != sweep_time {
            clock.seen_sweep = sweep_time;
            if clock.acted_this_phase {
                clock.last_update = sweep_time;
                clock.commit_phase = !clock.commit_phase;
                clock.acted_this_phase = false;
            }
        }

        let due = clock.last_update + self.tick_interval < sweep_time;
        if due {
            clock.acted_this_phase = true;
        }
        self.clock.set(clock);

        if !due {
            return;
        }

        if clock.commit_phase {
            self.commit(map, cell, meta);
        } else {
            self.decide(map, cell);
        }
    }
}
