//! Configuration types for collision detection.
//!
//! This module provides the options that control how the broad phase runs:
//! which algorithm, which sweep direction, and how large the sweep worker
//! pool is relative to the geometry count.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default sweep direction for sweep-and-prune (normalized on use).
///
/// An arbitrary fixed direction that is unlikely to align with the axes
/// of typical scenes (stacks, grids, ground planes).
pub const DEFAULT_SAP_DIRECTION: [f64; 3] = [0.5935, 0.7790, 0.1235];

/// Default sweep workers per `(world, geom)`.
///
/// Assumes each geom overlaps about five others along the sweep direction.
pub const DEFAULT_SWEEP_FACTOR: usize = 5;

/// Broad-phase algorithm selection.
///
/// All three produce the same candidate set for identical poses; they
/// differ only in cost profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BroadphaseType {
    /// Brute force over the precomputed admissible pair list.
    /// O(worlds × admissible pairs).
    Nxn,
    /// Sweep-and-prune with an independent sort per world.
    /// Best when each world holds a small number of geoms.
    #[default]
    SapTile,
    /// Sweep-and-prune with a single sort over all worlds, keyed by world id.
    /// Best when each world holds many geoms.
    SapSegmented,
}

impl BroadphaseType {
    /// Whether this is one of the sweep-and-prune variants.
    #[must_use]
    pub const fn is_sap(self) -> bool {
        matches!(self, Self::SapTile | Self::SapSegmented)
    }
}

/// Static collision options (like the collision subset of mjOption).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionOptions {
    /// Broad-phase algorithm.
    pub broadphase: BroadphaseType,
    /// Sweep direction for sweep-and-prune. Need not be unit length;
    /// it is normalized once per step. Must be finite and non-zero.
    pub sap_direction: [f64; 3],
    /// Sweep worker-pool size per `(world, geom)`.
    ///
    /// The pool holds `sap_sweep_factor * nworld * ngeom` workers; each
    /// worker strides over the flattened work index space, so the pool size
    /// is independent of the amount of work. Zero is swept as one.
    pub sap_sweep_factor: usize,
}

impl Default for CollisionOptions {
    fn default() -> Self {
        Self {
            broadphase: BroadphaseType::default(),
            sap_direction: DEFAULT_SAP_DIRECTION,
            sap_sweep_factor: DEFAULT_SWEEP_FACTOR,
        }
    }
}

impl CollisionOptions {
    /// Create options for the given broad-phase algorithm.
    #[must_use]
    pub fn new(broadphase: BroadphaseType) -> Self {
        Self {
            broadphase,
            ..Default::default()
        }
    }

    /// Set the broad-phase algorithm.
    #[must_use]
    pub fn with_broadphase(mut self, broadphase: BroadphaseType) -> Self {
        self.broadphase = broadphase;
        self
    }

    /// Set the sweep direction.
    #[must_use]
    pub fn with_direction(mut self, direction: [f64; 3]) -> Self {
        self.sap_direction = direction;
        self
    }

    /// Set the sweep worker-pool factor.
    #[must_use]
    pub fn with_sweep_factor(mut self, factor: usize) -> Self {
        self.sap_sweep_factor = factor;
        self
    }

    /// Unit sweep direction.
    ///
    /// Only meaningful for options that passed [`validate`](Self::validate).
    #[must_use]
    pub fn unit_direction(&self) -> [f64; 3] {
        let [x, y, z] = self.sap_direction;
        let norm = (x * x + y * y + z * z).sqrt();
        [x / norm, y / norm, z / norm]
    }

    /// Validate the options.
    pub fn validate(&self) -> crate::Result<()> {
        if self.sap_direction.iter().any(|c| !c.is_finite()) {
            return Err(crate::SimError::invalid_config(
                "sap_direction must be finite",
            ));
        }

        let [x, y, z] = self.sap_direction;
        if x * x + y * y + z * z <= f64::MIN_POSITIVE {
            return Err(crate::SimError::invalid_config(
                "sap_direction cannot be zero",
            ));
        }

        if self.sap_sweep_factor == 0 {
            return Err(crate::SimError::invalid_config(
                "sap_sweep_factor must be at least 1",
            ));
        }

        Ok(())
    }
}
