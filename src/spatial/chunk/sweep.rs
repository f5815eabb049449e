//! Resumable update sweep - cursor bookkeeping.
//!
//! The map drives the sweep: it asks for the next slice, dispatches behaviors
//! for each visited tile, bumps the cursor per tile and finally closes the
//! slice. Keeping the cursor on the chunk means a sweep interrupted between
//! calls resumes exactly where it stopped.

use std::ops::Range;

use super::Chunk;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweepCursor {
    /// Next cell index to visit.
    pub index: usize,
    /// Time value handed to every behavior during the current pass.
    pub sweep_time: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepProgress {
    /// Cursor position after this call (0 after a completed pass).
    pub visited_up_to: usize,
    pub pass_complete: bool,
}

impl Chunk {
    #[inline]
    pub fn sweep_cursor(&self) -> SweepCursor {
        self.sweep
    }

    /// Indices to visit this call: at most `budget` cells from the cursor.
    /// A zero budget is treated as one so every call makes progress.
    pub fn sweep_slice(&self, budget: usize) -> Range<usize> {
        let start = self.sweep.index.min(self.cells.len());
        let end = start.saturating_add(budget.max(1)).min(self.cells.len());
        start..end
    }

    /// One tile visited.
    #[inline]
    pub fn finish_visit(&mut self) {
        self.sweep.index += 1;
    }

    /// Close the current slice. When the cursor has reached the end the pass
    /// is complete: the cursor rewinds and the pass time is refreshed to
    /// `now`.
    pub fn close_slice(&mut self, now: f64) -> SweepProgress {
        if self.sweep.index >= self.cells.len() {
            self.sweep.index = 0;
            self.sweep.sweep_time = now;
            SweepProgress { visited_up_to: 0, pass_complete: true }
        } else {
            SweepProgress { visited_up_to: self.sweep.index, pass_complete: false }
        }
    }
}
