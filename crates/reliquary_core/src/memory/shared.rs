//! # Shared Registry
//!
//! One critical section around a [`PoolRegistry`] for hosts that touch pools
//! from more than one thread.

use parking_lot::Mutex;
use reliquary_shared::{Quaternion, Vec3};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use super::registry::PoolRegistry;
use crate::host::SpawnHost;
use crate::key::PrototypeKey;

/// Cloneable, lock-guarded handle to a [`PoolRegistry`].
///
/// Every operation takes the same `parking_lot::Mutex`; there is a single
/// writer at a time, so no lock-free structure is needed.
#[derive(Debug)]
pub struct SharedPoolRegistry<H> {
    inner: Arc<Mutex<PoolRegistry<H>>>,
}

impl<H> SharedPoolRegistry<H>
where
    H: Copy + Eq + Hash + Debug,
{
    /// Creates an empty shared registry.
    #[must_use]
    pub fn new() -> Self {
        Self::from_registry(PoolRegistry::new())
    }

    /// Wraps an existing registry.
    #[must_use]
    pub fn from_registry(registry: PoolRegistry<H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// See [`PoolRegistry::acquire`].
    pub fn acquire<S>(&self, host: &mut S, key: &PrototypeKey, position: Vec3, rotation: Quaternion) -> H
    where
        S: SpawnHost<Handle = H> + ?Sized,
    {
        self.inner.lock().acquire(host, key, position, rotation)
    }

    /// See [`PoolRegistry::release`].
    pub fn release<S>(&self, host: &mut S, handle: H) -> bool
    where
        S: SpawnHost<Handle = H> + ?Sized,
    {
        self.inner.lock().release(host, handle)
    }

    /// Runs `f` with exclusive access to the registry.
    ///
    /// Use this to batch several operations (one reward burst) under one
    /// lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut PoolRegistry<H>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl<H> Clone for SharedPoolRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> Default for SharedPoolRegistry<H>
where
    H: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
