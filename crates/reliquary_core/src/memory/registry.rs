//! # Pool Registry
//!
//! Maps prototype keys to pools and live handles back to their key.

use reliquary_shared::{Quaternion, Vec3};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::pool::Pool;
use crate::error::{PoolError, PoolResult};
use crate::host::SpawnHost;
use crate::key::PrototypeKey;

/// Where an instance is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// In the world, owned by the host.
    Active,
    /// Parked in its pool's inactive set.
    Inactive,
}

/// Identity attached to an instance when the host creates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceRecord {
    /// Key the instance was created for.
    pub key: PrototypeKey,
    /// Current lifecycle state.
    pub state: Lifecycle,
}

/// Owner of every pool in a simulation session.
///
/// Pools are created on the first acquire of a key. Each instance the
/// registry creates gets an [`InstanceRecord`]; release resolves the pool
/// through that record only.
///
/// # Thread Safety
///
/// NOT thread-safe. Drive it from the simulation thread, or wrap it in a
/// [`SharedPoolRegistry`](super::SharedPoolRegistry).
#[derive(Debug)]
pub struct PoolRegistry<H> {
    pools: HashMap<PrototypeKey, Pool<H>>,
    instances: HashMap<H, InstanceRecord>,
}

impl<H> PoolRegistry<H>
where
    H: Copy + Eq + Hash + Debug,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
            instances: HashMap::new(),
        }
    }

    /// Hands out an instance of `key` placed at `position`/`rotation`.
    ///
    /// Reuses the oldest inactive instance of the key if there is one,
    /// otherwise asks the host for a new one. Never fails.
    pub fn acquire<S>(
        &mut self,
        host: &mut S,
        key: &PrototypeKey,
        position: Vec3,
        rotation: Quaternion,
    ) -> H
    where
        S: SpawnHost<Handle = H> + ?Sized,
    {
        let pool = self.pools.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(key = %key, "pool.created");
            Pool::new(key.clone())
        });

        let (handle, previous) = if let Some(handle) = pool.take_inactive() {
            if let Some(record) = self.instances.get_mut(&handle) {
                record.state = Lifecycle::Active;
            }
            (handle, None)
        } else {
            let handle = host.create_instance(key);
            pool.record_created();
            let previous = self.instances.insert(
                handle,
                InstanceRecord {
                    key: key.clone(),
                    state: Lifecycle::Active,
                },
            );
            (handle, previous)
        };

        // The host handed back a handle that is still on the books. The new
        // record wins; the old pool must stop offering it.
        if let Some(previous) = previous {
            let was_pooled = self
                .pools
                .get_mut(&previous.key)
                .is_some_and(|old| old.forget(handle));
            tracing::warn!(
                handle = ?handle,
                previous_key = %previous.key,
                key = %key,
                was_pooled,
                "host returned a handle the registry already tracks"
            );
        }

        host.set_placement(handle, position, rotation);
        host.set_active(handle, true);
        handle
    }

    /// Returns an instance to its pool.
    ///
    /// Returns `false` (with a warning) for handles this registry never
    /// created and for instances that are already inactive. Those are left
    /// untouched for the host to tear down.
    pub fn release<S>(&mut self, host: &mut S, handle: H) -> bool
    where
        S: SpawnHost<Handle = H> + ?Sized,
    {
        match self.try_release(host, handle) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "pool.release_rejected");
                false
            }
        }
    }

    /// Like [`release`](Self::release), but reports why a release was
    /// rejected.
    ///
    /// # Errors
    ///
    /// - [`PoolError::UnknownInstance`] if the handle has no record.
    /// - [`PoolError::AlreadyReleased`] on a second release without an
    ///   acquire in between. Pool membership is left unchanged.
    pub fn try_release<S>(&mut self, host: &mut S, handle: H) -> PoolResult<()>
    where
        S: SpawnHost<Handle = H> + ?Sized,
    {
        let Some(record) = self.instances.get_mut(&handle) else {
            return Err(PoolError::UnknownInstance {
                handle: format!("{handle:?}"),
            });
        };

        if record.state == Lifecycle::Inactive {
            return Err(PoolError::AlreadyReleased {
                handle: format!("{handle:?}"),
                key: record.key.clone(),
            });
        }

        // Every record is created alongside its pool.
        let Some(pool) = self.pools.get_mut(&record.key) else {
            return Err(PoolError::UnknownInstance {
                handle: format!("{handle:?}"),
            });
        };

        host.set_active(handle, false);
        record.state = Lifecycle::Inactive;
        pool.push_inactive(handle);
        Ok(())
    }

    /// The pool for `key`, if anything was ever acquired under it.
    #[must_use]
    pub fn pool(&self, key: &str) -> Option<&Pool<H>> {
        self.pools.get(key)
    }

    /// Iterates all pools in no particular order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool<H>> {
        self.pools.values()
    }

    /// Number of pools created so far.
    #[inline]
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Lifecycle state of a handle this registry created.
    #[must_use]
    pub fn state(&self, handle: H) -> Option<Lifecycle> {
        self.instances.get(&handle).map(|record| record.state)
    }

    /// Key a handle was created for.
    #[must_use]
    pub fn key_of(&self, handle: H) -> Option<&PrototypeKey> {
        self.instances.get(&handle).map(|record| &record.key)
    }

    /// Total instances the registry knows about, active or pooled.
    #[inline]
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Total inactive instances across every pool.
    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.pools.values().map(Pool::inactive_count).sum()
    }
}

impl<H> Default for PoolRegistry<H>
where
    H: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
