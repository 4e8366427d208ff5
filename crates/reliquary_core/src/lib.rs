//! # RELIQUARY Core
//!
//! Prototype-keyed instance recycling for spawn-heavy gameplay (drops,
//! projectiles, enemies).
//!
//! ## Architecture Rules
//!
//! 1. **Explicit registry** - no process-wide statics; the registry lives as
//!    long as the simulation session that owns it
//! 2. **Pool first** - an inactive instance is always reused before the host
//!    is asked to create a new one
//! 3. **Recorded identity** - every instance carries the key it was created
//!    for; release never guesses from display names
//!
//! ## Example
//!
//! ```rust,ignore
//! use reliquary_core::{PoolRegistry, PrototypeKey};
//! use reliquary_shared::{Quaternion, Vec3};
//!
//! let mut registry = PoolRegistry::new();
//! let key = PrototypeKey::new("exp-small");
//!
//! let orb = registry.acquire(&mut host, &key, Vec3::ZERO, Quaternion::IDENTITY);
//! // ... orb gets picked up ...
//! registry.release(&mut host, orb);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod host;
pub mod key;
pub mod memory;

pub use error::{PoolError, PoolResult};
pub use host::SpawnHost;
pub use key::PrototypeKey;
pub use memory::{InstanceRecord, Lifecycle, Pool, PoolRegistry, PoolStats, SharedPoolRegistry};
