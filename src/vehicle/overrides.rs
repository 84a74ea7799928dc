use smallvec::SmallVec;

/// A temporary speed a vehicle must hold until the simulation clock
/// reaches `until`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedOverride {
    /// The speed to travel at in m/s.
    pub speed: f64,
    /// The simulation time in s at which the override expires.
    pub until: f64,
}

/// A FIFO queue of speed overrides. Only the front override is ever active.
#[derive(Clone, Debug, Default)]
pub(crate) struct OverrideQueue {
    queue: SmallVec<[SpeedOverride; 2]>,
}

impl OverrideQueue {
    pub fn push(&mut self, speed_override: SpeedOverride) {
        self.queue.push(speed_override);
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeedOverride> {
        self.queue.iter()
    }

    /// Discards expired overrides and returns the one in effect at `now`.
    pub fn active(&mut self, now: f64) -> Option<SpeedOverride> {
        while self.queue.first().map_or(false, |o| now >= o.until) {
            self.queue.remove(0);
        }
        self.queue.first().copied()
    }
}
