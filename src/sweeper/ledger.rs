//! Bounded history of dispatched click points
//!
//! The ledger is an insertion-ordered set: membership is O(1), and once the
//! capacity is exceeded the oldest point is evicted. Re-inserting a point that
//! is still held does not refresh its age.

use super::types::ClickPoint;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_LEDGER_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct ClickLedger {
    order: VecDeque<ClickPoint>,
    members: HashSet<ClickPoint>,
    capacity: usize,
}

impl ClickLedger {
    /// Create an empty ledger. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            order: VecDeque::with_capacity(capacity + 1),
            members: HashSet::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn contains(&self, point: &ClickPoint) -> bool {
        self.members.contains(point)
    }

    /// Record `point`, evicting the oldest entry on overflow.
    ///
    /// Returns `false` (and changes nothing) when the point is already held,
    /// which makes this the atomic check-and-insert used to claim a click.
    pub fn insert(&mut self, point: ClickPoint) -> bool {
        if !self.members.insert(point) {
            return false;
        }
        self.order.push_back(point);

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &ClickPoint> {
        self.order.iter()
    }
}

impl Default for ClickLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_CAPACITY)
    }
}

/// Ledger handle shared by every worker. A claim is one critical section, so
/// two workers can never both dispatch the same point.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<ClickLedger>>,
}

impl SharedLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClickLedger::new(capacity))),
        }
    }

    /// Insert `point` unless it is already held; `true` means the caller
    /// owns the click.
    pub async fn claim(&self, point: ClickPoint) -> bool {
        self.inner.lock().await.insert(point)
    }

    pub async fn contains(&self, point: ClickPoint) -> bool {
        self.inner.lock().await.contains(&point)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}
