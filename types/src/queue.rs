//! Application queue entries.

use crate::{BlockHeight, Identifier};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A pending candidate and the height at which its current phase expires.
///
/// Ordered by `(priority, identifier)` so that equal priorities resolve
/// lexicographically and every node reaches the same queue order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueItem {
    pub identifier: Identifier,
    pub priority: BlockHeight,
}

impl QueueItem {
    pub fn new(identifier: Identifier, priority: BlockHeight) -> Self {
        Self {
            identifier,
            priority,
        }
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.identifier.cmp(&other.identifier))
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
