//! # Instance Recycling
//!
//! Prototype-keyed pools of inactive instances.
//!
//! ## Design Philosophy
//!
//! Spawning through the host is expensive; toggling an existing object is
//! not. During gameplay:
//! - Released instances go back to the pool of the key they were created for
//! - Acquire reuses the oldest released instance before creating anything
//! - Pools are created lazily and live as long as their registry

mod pool;
mod registry;
mod shared;

pub use pool::{Pool, PoolStats};
pub use registry::{InstanceRecord, Lifecycle, PoolRegistry};
pub use shared::SharedPoolRegistry;
