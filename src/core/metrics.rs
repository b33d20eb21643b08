use std::collections::VecDeque;
use std::time::Duration;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Counters and timings recorded for one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StepMetrics {
    /// Time delta the step advanced by
    pub dt: f32,

    pub bodies: usize,

    pub particles: usize,

    pub constraints: usize,

    /// Pairs emitted by the broad phase
    pub contact_pairs: usize,

    /// Pairs run through the narrow phase
    pub collision_tests: usize,

    /// Pairs the narrow phase confirmed
    pub collisions: usize,

    pub broad_phase_time: Duration,

    pub narrow_phase_time: Duration,
}

/// Bounded history of step metrics, oldest first
#[derive(Debug, Clone)]
pub struct MetricsLog {
    records: VecDeque<StepMetrics>,
    capacity: usize,
}

impl MetricsLog {
    /// Creates a log keeping at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn push(&mut self, record: StepMetrics) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn last(&self) -> Option<&StepMetrics> {
        self.records.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepMetrics> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes and returns every record
    pub fn drain(&mut self) -> Vec<StepMetrics> {
        self.records.drain(..).collect()
    }
}

impl Default for MetricsLog {
    fn default() -> Self {
        Self::new(3600)
    }
}
