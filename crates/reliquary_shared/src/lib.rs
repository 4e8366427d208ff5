//! # RELIQUARY Shared
//!
//! Placement types handed across the host boundary.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a host engine. The host converts
//! [`Vec3`] and [`Quaternion`] into its own transform types at the edge.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{lerp, Quaternion, Vec3};
