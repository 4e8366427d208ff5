//! # Pool
//!
//! The inactive set for one prototype key.

use std::collections::VecDeque;

use crate::key::PrototypeKey;

/// Lifetime counters for one pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances the host had to create (pool misses).
    pub created: u64,
    /// Acquires served from the inactive set (pool hits).
    pub reused: u64,
    /// Successful releases back into the pool.
    pub released: u64,
}

impl PoolStats {
    /// Total acquires served by this pool.
    #[inline]
    #[must_use]
    pub const fn acquired(&self) -> u64 {
        self.created + self.reused
    }

    /// Fraction of acquires that were served without creating anything.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let acquired = self.acquired();
        if acquired == 0 {
            0.0
        } else {
            self.reused as f64 / acquired as f64
        }
    }
}

/// Inactive instances of one prototype, oldest first.
///
/// The pool is the sole owner of its inactive handles; active instances
/// belong to the host and are not listed here.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use [`SharedPoolRegistry`](crate::SharedPoolRegistry)
/// when the host mutates pools from more than one thread.
#[derive(Debug)]
pub struct Pool<H> {
    key: PrototypeKey,
    inactive: VecDeque<H>,
    stats: PoolStats,
    forgotten: u64,
}

impl<H: Copy + PartialEq> Pool<H> {
    /// Creates an empty pool for `key`.
    #[must_use]
    pub fn new(key: PrototypeKey) -> Self {
        Self {
            key,
            inactive: VecDeque::new(),
            stats: PoolStats::default(),
            forgotten: 0,
        }
    }

    /// The prototype this pool recycles.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &PrototypeKey {
        &self.key
    }

    /// Number of instances waiting for reuse.
    #[inline]
    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.inactive.len()
    }

    /// Number of instances of this key currently live in the world.
    #[must_use]
    pub fn active_count(&self) -> u64 {
        self.stats
            .created
            .saturating_sub(self.forgotten)
            .saturating_sub(self.inactive.len() as u64)
    }

    /// Lifetime counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> PoolStats {
        self.stats
    }

    /// True if `handle` is waiting in this pool.
    #[must_use]
    pub fn contains(&self, handle: H) -> bool {
        self.inactive.contains(&handle)
    }

    /// Iterates inactive handles, oldest first.
    pub fn iter_inactive(&self) -> impl Iterator<Item = H> + '_ {
        self.inactive.iter().copied()
    }

    /// Takes the oldest inactive instance, counting a hit.
    pub(crate) fn take_inactive(&mut self) -> Option<H> {
        let handle = self.inactive.pop_front()?;
        self.stats.reused += 1;
        Some(handle)
    }

    /// Records a host-created instance, counting a miss.
    pub(crate) fn record_created(&mut self) {
        self.stats.created += 1;
    }

    /// Drops an instance the registry no longer attributes to this key.
    /// Returns true if it was waiting in the inactive set.
    pub(crate) fn forget(&mut self, handle: H) -> bool {
        self.forgotten += 1;
        let Some(index) = self.inactive.iter().position(|h| *h == handle) else {
            return false;
        };
        self.inactive.remove(index);
        true
    }

    /// Puts a released instance at the back of the queue.
    pub(crate) fn push_inactive(&mut self, handle: H) {
        self.inactive.push_back(handle);
        self.stats.released += 1;
    }
}
