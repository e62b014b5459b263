//! Time-keyed activation store and the linear fade applied to it.

use crate::geometry::CellKey;
use std::collections::HashMap;

/// Milliseconds on the monotonic clock (see `scheduler::Clock`).
pub type Millis = u64;

/// Intensity in [0, 1] of a cell activated at `activated_at`.
///
/// Decays linearly from 1 to 0 over `linger` and is exactly 0 from then on.
/// A timestamp later than `now` counts as just activated.
pub fn fade(activated_at: Millis, now: Millis, linger: Millis) -> f64 {
    let elapsed = now.saturating_sub(activated_at);
    if elapsed >= linger {
        return 0.0;
    }
    1.0 - elapsed as f64 / linger as f64
}

/// Last activation time per cell. One record per key, last write wins.
pub struct DecayStore {
    records: HashMap<CellKey, Millis>,
    linger: Millis,
}

impl DecayStore {
    pub fn new(linger: Millis) -> Self {
        Self {
            records: HashMap::new(),
            linger,
        }
    }

    /// Insert or refresh the activation of a cell
    pub fn activate(&mut self, row: u32, col: u32, now: Millis) {
        self.records.insert(CellKey::new(row, col), now);
    }

    pub fn get(&self, row: u32, col: u32) -> Option<Millis> {
        self.records.get(&CellKey::new(row, col)).copied()
    }

    pub fn intensity_of(&self, row: u32, col: u32, now: Millis) -> f64 {
        match self.get(row, col) {
            Some(activated_at) => fade(activated_at, now, self.linger),
            None => 0.0,
        }
    }

    /// Drop every record that has fully faded. Returns how many were removed.
    pub fn prune(&mut self, now: Millis) -> usize {
        let before = self.records.len();
        let linger = self.linger;
        self.records
            .retain(|_, activated_at| fade(*activated_at, now, linger) > 0.0);
        before - self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
