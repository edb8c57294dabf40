//! Configuration types for batched collision detection.
//!
//! This crate provides the static options that select and tune the
//! broad-phase pipeline in `sim-broadphase`:
//!
//! - [`BroadphaseType`] - brute force, tiled sweep-and-prune, or segmented
//!   sweep-and-prune
//! - [`CollisionOptions`] - sweep direction, worker-pool sizing, strategy
//! - [`SimError`] - configuration errors
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They carry no geometry and run no
//! algorithms. A model builder validates them once; the collision pipeline
//! only reads them.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - Headless training loops
//! - Batched reinforcement-learning environments
//! - Analysis tools
//! - Other engines
//!
//! # Example
//!
//! ```
//! use sim_types::{BroadphaseType, CollisionOptions};
//!
//! let opt = CollisionOptions::default()
//!     .with_broadphase(BroadphaseType::SapSegmented)
//!     .with_sweep_factor(8);
//!
//! assert!(opt.validate().is_ok());
//! assert_eq!(opt.broadphase, BroadphaseType::SapSegmented);
//! ```

#![doc(html_root_url = "https://docs.rs/sim-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn, // Builder methods read better without const noise
    clippy::missing_errors_doc,   // Error docs added where non-obvious
)]

mod config;
mod error;

pub use config::{BroadphaseType, CollisionOptions, DEFAULT_SAP_DIRECTION, DEFAULT_SWEEP_FACTOR};
pub use error::SimError;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, SimError>;
