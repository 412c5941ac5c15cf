use serde::Serialize;
use std::collections::{HashMap, VecDeque};

use crate::Subkind;

/// Samples kept per trend series.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HistoryKey {
    pub device_id: String,
    pub subkind: Subkind,
}

impl HistoryKey {
    pub fn new(device_id: impl Into<String>, subkind: Subkind) -> Self {
        Self {
            device_id: device_id.into(),
            subkind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendStyle {
    Area,
    Line,
}

/// Snapshot of one series, tagged with how the sink should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub style: TrendStyle,
    pub samples: Vec<f64>,
}

impl Trend {
    pub fn min(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    pub fn last(&self) -> Option<f64> {
        self.samples.last().copied()
    }
}

/// Fixed capacity FIFO of samples, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f64) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    buffers: HashMap<HistoryKey, HistoryBuffer>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            log::warn!("History capacity of 0 requested, using 1");
        }
        Self {
            buffers: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, key: &HistoryKey, sample: f64) {
        if let Some(buffer) = self.buffers.get_mut(key) {
            buffer.push(sample);
        } else {
            log::trace!("New history series for {} ({:?})", key.device_id, key.subkind);
            let mut buffer = HistoryBuffer::with_capacity(self.capacity);
            buffer.push(sample);
            self.buffers.insert(key.clone(), buffer);
        }
    }

    pub fn snapshot(&self, key: &HistoryKey) -> Option<Vec<f64>> {
        self.buffers.get(key).map(HistoryBuffer::to_vec)
    }

    pub fn trend(&self, key: &HistoryKey, style: TrendStyle) -> Option<Trend> {
        self.snapshot(key).map(|samples| Trend { style, samples })
    }

    pub fn get(&self, key: &HistoryKey) -> Option<&HistoryBuffer> {
        self.buffers.get(key)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.buffers.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &HistoryKey> {
        self.buffers.keys()
    }
}
