//! Fetch cycles. Every mutation bumps a shared counter; a cycle remembers the
//! generation it started under and its results are only installed if nothing
//! bumped the counter in the meantime. Stale results are dropped, not merged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct RefreshTrigger(Arc<AtomicU64>);

impl RefreshTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Invalidate whatever cycle is in flight.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn begin(&self) -> Cycle {
        Cycle {
            generation: self.generation(),
            trigger: self.clone(),
        }
    }
}

#[derive(Debug)]
pub struct Cycle {
    generation: u64,
    trigger: RefreshTrigger,
}

impl Cycle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.trigger.generation() == self.generation
    }

    /// Hand back `value` if this cycle is still the latest one.
    pub fn finish<T>(self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            debug!(
                started = self.generation,
                current = self.trigger.generation(),
                "discarding results of a superseded fetch cycle"
            );
            None
        }
    }
}
