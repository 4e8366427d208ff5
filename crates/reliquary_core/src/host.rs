//! # Host Collaborator
//!
//! The simulation/rendering host owns live objects. The library only asks it
//! to create, place, toggle and push them.

use reliquary_shared::{Quaternion, Vec3};
use std::fmt::Debug;
use std::hash::Hash;

use crate::key::PrototypeKey;

/// Operations the registry and the reward generator need from the host.
///
/// `Handle` is whatever the host uses to address a live object (an entity
/// id, a slot index). It must stay valid while the instance sits in a pool.
pub trait SpawnHost {
    /// Host-side handle of a spawned object.
    type Handle: Copy + Eq + Hash + Debug;

    /// Creates a brand-new object for `key`. Only called on a pool miss.
    fn create_instance(&mut self, key: &PrototypeKey) -> Self::Handle;

    /// Toggles simulation/rendering of the object.
    ///
    /// Activation is where the host runs the object's own re-initialization
    /// (health, timers, pickup state). The registry never resets those.
    fn set_active(&mut self, handle: Self::Handle, active: bool);

    /// Moves the object.
    fn set_placement(&mut self, handle: Self::Handle, position: Vec3, rotation: Quaternion);

    /// Applies an instantaneous impulse.
    fn apply_impulse(&mut self, handle: Self::Handle, impulse: Vec3);
}
