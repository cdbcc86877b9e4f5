//! Priority queue with first-in-first-out tie-breaking

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::QueueError;

/// Storage strategy for the priority queue
///
/// Both backends yield items in exactly the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Binary heap, O(log n) per operation
    #[default]
    Heap,
    /// Unordered vector searched on every dequeue
    #[serde(alias = "linear-scan")]
    Scan,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heap => write!(f, "heap"),
            Self::Scan => write!(f, "scan"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heap" => Ok(Self::Heap),
            "scan" | "linear-scan" => Ok(Self::Scan),
            _ => Err(format!("Unknown backend: {}. Use: heap or scan", s)),
        }
    }
}

/// A pending entry: payload, priority and arrival sequence
#[derive(Debug, Clone)]
pub struct PriorityItem<T, P> {
    payload: T,
    priority: P,
    sequence: u64,
}

impl<T, P> PriorityItem<T, P> {
    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// Arrival order within the owning queue, starting at 0
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T, P: Ord> Ord for PriorityItem<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher priority first, then earlier arrival
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T, P: Ord> PartialOrd for PriorityItem<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> PartialEq for PriorityItem<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for PriorityItem<T, P> {}

#[derive(Debug, Clone)]
enum Storage<T, P> {
    Heap(BinaryHeap<PriorityItem<T, P>>),
    Scan(Vec<PriorityItem<T, P>>),
}

/// Queue that always yields the most urgent pending payload.
///
/// Higher priorities come out first. Items with equal priority come out in
/// the order they were enqueued.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P = i64> {
    storage: Storage<T, P>,
    next_sequence: u64,
}

impl<T, P: Ord> PriorityQueue<T, P> {
    /// Create an empty heap-backed queue
    pub fn new() -> Self {
        Self::with_backend(Backend::Heap)
    }

    pub fn with_backend(backend: Backend) -> Self {
        debug!(%backend, "PriorityQueue::with_backend: called");
        let storage = match backend {
            Backend::Heap => Storage::Heap(BinaryHeap::new()),
            Backend::Scan => Storage::Scan(Vec::new()),
        };
        Self {
            storage,
            next_sequence: 0,
        }
    }

    pub fn backend(&self) -> Backend {
        match self.storage {
            Storage::Heap(_) => Backend::Heap,
            Storage::Scan(_) => Backend::Scan,
        }
    }

    /// Add a payload with the given priority
    pub fn enqueue(&mut self, payload: T, priority: P) {
        let item = PriorityItem {
            payload,
            priority,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        debug!(sequence = item.sequence, len = self.len() + 1, "PriorityQueue::enqueue: called");

        match &mut self.storage {
            Storage::Heap(heap) => heap.push(item),
            Storage::Scan(items) => items.push(item),
        }
    }

    /// Remove and return the highest-priority, earliest-enqueued payload
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        let item = match &mut self.storage {
            Storage::Heap(heap) => heap.pop(),
            Storage::Scan(items) => {
                let best = items
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.cmp(b))
                    .map(|(idx, _)| idx);
                best.map(|idx| items.swap_remove(idx))
            }
        };

        match item {
            Some(item) => {
                debug!(sequence = item.sequence, len = self.len(), "PriorityQueue::dequeue: selected");
                Ok(item.payload)
            }
            None => {
                debug!("PriorityQueue::dequeue: queue empty");
                Err(QueueError::Empty)
            }
        }
    }

    /// The payload `dequeue` would return next
    pub fn peek(&self) -> Option<&T> {
        let best = match &self.storage {
            Storage::Heap(heap) => heap.peek(),
            Storage::Scan(items) => items.iter().max(),
        };
        best.map(PriorityItem::payload)
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pending items in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &PriorityItem<T, P>> {
        self.as_slice().iter()
    }

    /// Drain every pending payload in dequeue order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut payloads = Vec::with_capacity(self.len());
        while let Ok(payload) = self.dequeue() {
            payloads.push(payload);
        }
        payloads
    }

    fn as_slice(&self) -> &[PriorityItem<T, P>] {
        match &self.storage {
            Storage::Heap(heap) => heap.as_slice(),
            Storage::Scan(items) => items.as_slice(),
        }
    }
}

impl<T, P: Ord> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
