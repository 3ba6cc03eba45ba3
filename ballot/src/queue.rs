//! The application queue: a binary min-heap of pending candidates.
//!
//! Entries are ordered by `(priority, identifier)`, so equal priorities come
//! out in lexicographic identifier order on every node. A position index
//! gives O(log n) update and removal by identifier.

use std::collections::HashMap;

use tcr_types::{BlockHeight, Identifier, QueueItem};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("{0} is not queued")]
    NotFound(Identifier),
}

#[derive(Clone, Debug, Default)]
pub struct ApplicationQueue {
    heap: Vec<QueueItem>,
    index: HashMap<Identifier, usize>,
}

impl ApplicationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a queue from persisted entries. A repeated identifier keeps
    /// its last priority.
    pub fn from_items(items: Vec<QueueItem>) -> Self {
        let mut queue = Self {
            heap: Vec::with_capacity(items.len()),
            index: HashMap::with_capacity(items.len()),
        };
        for item in items {
            queue.push(item);
        }
        queue
    }

    /// The heap array, suitable for [`Self::from_items`].
    pub fn into_items(self) -> Vec<QueueItem> {
        self.heap
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.heap
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn priority_of(&self, identifier: &Identifier) -> Option<BlockHeight> {
        self.index.get(identifier).map(|&i| self.heap[i].priority)
    }

    /// Insert an entry. An identifier already queued is re-prioritised
    /// instead, so the queue never holds two entries for one candidate.
    pub fn push(&mut self, item: QueueItem) {
        if let Some(&pos) = self.index.get(&item.identifier) {
            self.heap[pos].priority = item.priority;
            self.restore(pos);
            return;
        }
        let pos = self.heap.len();
        self.index.insert(item.identifier.clone(), pos);
        self.heap.push(item);
        self.sift_up(pos);
    }

    /// Change the priority of a queued identifier.
    pub fn update(
        &mut self,
        identifier: &Identifier,
        priority: BlockHeight,
    ) -> Result<(), QueueError> {
        let pos = *self
            .index
            .get(identifier)
            .ok_or_else(|| QueueError::NotFound(identifier.clone()))?;
        self.heap[pos].priority = priority;
        self.restore(pos);
        Ok(())
    }

    pub fn remove(&mut self, identifier: &Identifier) -> Option<QueueItem> {
        let pos = self.index.remove(identifier)?;
        let last = self.heap.len() - 1;
        if pos != last {
            self.heap.swap(pos, last);
            self.index.insert(self.heap[pos].identifier.clone(), pos);
        }
        let removed = self.heap.pop();
        if pos < self.heap.len() {
            self.restore(pos);
        }
        removed
    }

    pub fn peek(&self) -> Option<&QueueItem> {
        self.heap.first()
    }

    pub fn pop(&mut self) -> Option<QueueItem> {
        let first = self.heap.first()?.identifier.clone();
        self.remove(&first)
    }

    /// All entries in pop order, without consuming the queue.
    pub fn sorted(&self) -> Vec<QueueItem> {
        let mut items = self.heap.clone();
        items.sort();
        items
    }

    /// Identifiers whose phase has expired at `height`, in pop order.
    pub fn due(&self, height: BlockHeight) -> Vec<Identifier> {
        self.sorted()
            .into_iter()
            .take_while(|item| item.priority <= height)
            .map(|item| item.identifier)
            .collect()
    }

    fn restore(&mut self, pos: usize) {
        let pos = self.sift_up(pos);
        self.sift_down(pos);
    }

    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos] >= self.heap[parent] {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < len && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == pos {
                return;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].identifier.clone(), a);
        self.index.insert(self.heap[b].identifier.clone(), b);
    }
}
