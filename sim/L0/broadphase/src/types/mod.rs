//! Core type definitions for the batched collision pipeline.
//!
//! This module contains the types that flow through every stage of a
//! collision step: enums and flags, the static [`Model`], the per-batch
//! [`Data`], the pair-compatibility table, and the collaborator hooks.

pub(crate) mod batched;
pub(crate) mod callbacks;
pub(crate) mod contact_types;
pub(crate) mod data;
pub(crate) mod enums;
pub mod flags;
pub(crate) mod model;
pub(crate) mod model_builder;
pub(crate) mod model_factories;
pub(crate) mod pair_table;
pub mod validation;
pub mod warning;

pub use batched::BatchedArray;
pub use callbacks::{Callback, CbCollisionStage};
pub use contact_types::{ContactPair, DEFAULT_SOLIMP, DEFAULT_SOLREF};
pub use data::Data;
pub use enums::*;
pub use model::Model;
pub use model_builder::ModelBuilder;
pub use pair_table::{NxnPair, PairCompat, PairTable, pair_count, upper_tri_index};
pub use warning::{NUM_WARNINGS, Warning, WarningStat};
