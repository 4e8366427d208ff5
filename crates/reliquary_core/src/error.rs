//! # Pool Error Types

use thiserror::Error;

use crate::key::PrototypeKey;

/// Errors surfaced by [`PoolRegistry::try_release`](crate::PoolRegistry::try_release).
///
/// None of these are fatal. The plain `release` call logs them and returns
/// `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The instance was never handed out by this registry.
    #[error("instance {handle} has no pool; leaving it to host teardown")]
    UnknownInstance {
        /// Debug rendering of the host handle.
        handle: String,
    },

    /// The instance is already sitting in its pool's inactive set.
    #[error("instance {handle} of '{key}' was already released")]
    AlreadyReleased {
        /// Debug rendering of the host handle.
        handle: String,
        /// Pool the instance belongs to.
        key: PrototypeKey,
    },
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
