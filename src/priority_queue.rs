use std::cmp::Ordering;
use std::collections::BinaryHeap;

use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

use crate::error::EmptyQueueError;

struct SmallestPriorityHolder<T, P: FloatCore> {
    priority: OrderedFloat<P>,
    sequence: u64,
    item: T,
}

impl<T, P: FloatCore> Eq for SmallestPriorityHolder<T, P> {}

impl<T, P: FloatCore> PartialEq for SmallestPriorityHolder<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.sequence.eq(&other.sequence)
    }
}

impl<T, P: FloatCore> PartialOrd for SmallestPriorityHolder<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: FloatCore> Ord for SmallestPriorityHolder<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse both keys so the smallest priority comes out first
        // and equal priorities come out in insertion order.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Min-priority queue over floating point priorities. The same item may be inserted any number of
/// times at different priorities; every insertion is kept and returned once, which lets searches
/// re-insert a node with a better priority instead of decreasing its key.
pub struct PriorityQueue<T, P: FloatCore = f32> {
    heap: BinaryHeap<SmallestPriorityHolder<T, P>>,
    next_sequence: u64,
}

impl<T, P: FloatCore> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<T, P: FloatCore> PriorityQueue<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn insert(&mut self, item: T, priority: P) {
        self.heap.push(SmallestPriorityHolder {
            priority: OrderedFloat(priority),
            sequence: self.next_sequence,
            item,
        });
        self.next_sequence += 1;
    }

    /// Removes the item with the smallest priority. Items with equal priority leave in the order
    /// they were inserted.
    pub fn extract_min(&mut self) -> Result<T, EmptyQueueError> {
        self.pop_min().map(|(item, _)| item).ok_or(EmptyQueueError)
    }

    /// Like [extract_min](Self::extract_min) but also hands back the priority.
    pub fn pop_min(&mut self) -> Option<(T, P)> {
        self.heap
            .pop()
            .map(|SmallestPriorityHolder { priority, item, .. }| (item, priority.into_inner()))
    }

    pub fn peek_min(&self) -> Option<(&T, P)> {
        self.heap
            .peek()
            .map(|holder| (&holder.item, holder.priority.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}
