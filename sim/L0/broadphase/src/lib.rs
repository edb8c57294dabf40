//! Batched broad-phase collision detection.
//!
//! This crate provides the MuJoCo-aligned Model/Data architecture for the
//! collision-candidate stage of a batched simulator: thousands of
//! identically-structured worlds stepped in lockstep, sharing one static
//! [`Model`] and one [`Data`] per batch.
//!
//! - [`Model`] is static (pair-compatibility table, bounding radii, margins)
//! - [`Data`] is dynamic (poses in, candidate pairs out)
//! - [`collision()`] fills the candidate buffer and hands it to the
//!   midphase and narrow-phase collaborators installed on the model
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        collision()                          │
//! │  reset buffers → gate on flags/capacity → select strategy   │
//! └──────────────┬───────────────────────────────┬──────────────┘
//!                │                               │
//!                ▼                               ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │      nxn_broadphase       │   │        sap_broadphase       │
//! │  (world, admissible pair) │   │ project → sort → range →    │
//! │                           │   │ load-balanced sweep         │
//! └──────────────┬────────────┘   └──────────────┬──────────────┘
//!                └───────── sphere_filter ───────┘
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CollisionBuffer (atomic cursor, fixed capacity)            │
//! │  → hfield midphase → convex / primitive / SDF narrow phase  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Brute force and sweep-and-prune produce the same candidate set for the
//! same poses; only the order in the buffer differs.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - Headless training loops
//! - Batched reinforcement-learning environments
//! - Analysis tools
//! - Other engines
//!
//! # Quick Start
//!
//! ```
//! use nalgebra::Vector3;
//! use sim_broadphase::{Model, collision};
//!
//! // Ground plane plus two spheres of radius 0.5
//! let model = Model::ground_and_spheres(&[0.5, 0.5], 0.0);
//! let mut data = model.make_data(2, 64);
//!
//! for world in 0..2 {
//!     data.set_xpos(world, 1, Vector3::new(0.0, 0.0, 2.0));
//!     data.set_xpos(world, 2, Vector3::new(0.8, 0.0, 2.0));
//! }
//!
//! collision(&model, &mut data);
//! assert_eq!(data.ncollision(), 2); // one sphere pair per world
//! ```
//!
//! # Features
//!
//! - `parallel` (default): every stage runs on rayon. Disabled, every stage
//!   runs sequentially with identical results.
//! - `serde`: serialization of [`CollisionOptions`].

#![doc(html_root_url = "https://docs.rs/sim-broadphase/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn, // Many methods can't be const due to nalgebra
    clippy::doc_markdown,         // Not all technical terms need backticks
    clippy::module_name_repetitions,
)]

// Core type definitions (enums, Model, Data, pair table, callbacks)
pub mod types;

// Collision driver and broad-phase strategies
pub mod collision;

pub use collision::emit::{CollisionBuffer, CollisionCandidate, HFTRI_EXPAND, emit_pair};
pub use collision::filter::sphere_filter;
pub use collision::nxn::nxn_broadphase;
pub use collision::sap::{SapScratch, sap_broadphase};
pub use collision::{collision, reset_collision};
pub use types::{
    BatchedArray, Callback, CbCollisionStage, ContactPair, DISABLE_CONSTRAINT, DISABLE_CONTACT,
    Data, GeomType, Model, ModelBuilder, ModelError, NxnPair, PairCompat, PairTable, Warning,
    WarningStat, upper_tri_index,
};

pub use sim_types::{BroadphaseType, CollisionOptions, SimError};
