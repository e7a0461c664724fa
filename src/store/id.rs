//! Person id generation
//!
//! Ids are decimal millisecond timestamps, bumped so that two adds in the
//! same millisecond (or a clock step backwards) still get distinct ids.

use crate::person::Person;

/// Wall-clock source, injectable for tests
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> f64;
}

/// The platform clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        crate::platform::now_ms()
    }
}

/// Monotonic timestamp-derived ids
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last: u64,
}

impl IdGenerator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock, last: 0 }
    }

    /// Next id, never equal to a previous one or to any id in `existing`
    pub fn next_id(&mut self, existing: &[Person]) -> String {
        let now = self.clock.now_ms().max(0.0) as u64;
        let mut candidate = now.max(self.last + 1);
        while existing.iter().any(|p| p.id == candidate.to_string()) {
            candidate += 1;
        }
        self.last = candidate;
        candidate.to_string()
    }
}
