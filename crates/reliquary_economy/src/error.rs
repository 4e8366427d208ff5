//! # Economy Error Types
//!
//! All errors that can occur while loading or validating reward tuning.
//! Nothing here is raised at roll time.

use thiserror::Error;

/// Errors that can occur in the reward system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// A drop or quality roll has unusable numbers (zero decay, min > max).
    #[error("invalid roll config: {0}")]
    InvalidRollConfig(String),

    /// Weighted quality chances or the level bound are out of range.
    #[error("invalid quality config: {0}")]
    InvalidQualityConfig(String),

    /// Burst impulse bounds are unusable.
    #[error("invalid burst config: {0}")]
    InvalidBurstConfig(String),

    /// A reward category has no prototypes to spawn.
    #[error("category '{0}' has no variants")]
    EmptyCategory(String),

    /// A reward category was declared twice.
    #[error("category '{0}' is declared more than once")]
    DuplicateCategory(String),

    /// A category's tuning was rejected; the category is disabled.
    #[error("category '{category}' disabled: {reason}")]
    CategoryDisabled {
        /// Name of the disabled category.
        category: String,
        /// Why validation failed.
        reason: String,
    },

    /// The tuning file could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The tuning file could not be read.
    #[error("cannot read {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
