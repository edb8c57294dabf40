//! Data struct definition, Clone impl, and pose accessors.
//!
//! [`Data`] is the per-step collision state for a whole batch of worlds:
//! geometry poses, the shared candidate buffer, sweep-and-prune scratch,
//! and narrow-phase counters. It is the mutable counterpart to [`Model`];
//! one `Data` is created per batch via `model.make_data(nworld, nconmax)`.

use nalgebra::{Matrix3, Vector3};

use super::model::Model;
use super::warning::{NUM_WARNINGS, Warning, WarningStat};
use crate::collision::emit::{CollisionBuffer, CollisionCandidate};
use crate::collision::sap::SapScratch;

/// Dynamic collision state (the collision subset of mjData, batched).
///
/// All buffers are pre-allocated; a collision step performs no heap
/// allocation except inside the segmented sort.
///
/// # Memory Layout
///
/// `geom_xpos` and `geom_xmat` are flattened `[world, geom]`:
/// entry `world * ngeom + geom`.
#[derive(Debug)]
pub struct Data {
    // ==================== Dimensions ====================
    /// Number of worlds in the batch.
    pub nworld: usize,
    /// Number of geoms per world.
    pub ngeom: usize,

    // ==================== Poses (read-only during broad phase) ====================
    /// Geometry positions in world frame.
    pub geom_xpos: Vec<Vector3<f64>>,
    /// Geometry orientations; column 2 is the local z axis (plane normal).
    pub geom_xmat: Vec<Matrix3<f64>>,

    // ==================== Broad Phase Output ====================
    /// Candidate pairs for narrow phase.
    pub collision: CollisionBuffer,
    /// Sweep-and-prune scratch arrays.
    pub sap: SapScratch,

    // ==================== Narrow Phase Counters ====================
    /// Contacts reported by narrow-phase collaborators.
    pub ncon: usize,
    /// Height-field contacts reported by the midphase collaborator.
    pub ncon_hfield: usize,

    // ==================== Diagnostics ====================
    /// Per-warning statistics.
    pub warnings: [WarningStat; NUM_WARNINGS],
}

impl Clone for Data {
    fn clone(&self) -> Self {
        Self {
            nworld: self.nworld,
            ngeom: self.ngeom,
            geom_xpos: self.geom_xpos.clone(),
            geom_xmat: self.geom_xmat.clone(),
            collision: self.collision.snapshot(),
            sap: self.sap.clone(),
            ncon: self.ncon,
            ncon_hfield: self.ncon_hfield,
            warnings: self.warnings,
        }
    }
}

impl Data {
    pub(crate) fn new(nworld: usize, ngeom: usize, nconmax: usize) -> Self {
        let n = nworld * ngeom;
        Self {
            nworld,
            ngeom,
            geom_xpos: vec![Vector3::zeros(); n],
            geom_xmat: vec![Matrix3::identity(); n],
            collision: CollisionBuffer::new(nconmax),
            sap: SapScratch::new(nworld, ngeom),
            ncon: 0,
            ncon_hfield: 0,
            warnings: [WarningStat::default(); NUM_WARNINGS],
        }
    }

    /// Position of `geom` in `world`.
    #[inline]
    #[must_use]
    pub fn xpos(&self, world: usize, geom: usize) -> &Vector3<f64> {
        &self.geom_xpos[world * self.ngeom + geom]
    }

    /// Orientation of `geom` in `world`.
    #[inline]
    #[must_use]
    pub fn xmat(&self, world: usize, geom: usize) -> &Matrix3<f64> {
        &self.geom_xmat[world * self.ngeom + geom]
    }

    /// Set the position of `geom` in `world`.
    pub fn set_xpos(&mut self, world: usize, geom: usize, pos: Vector3<f64>) {
        self.geom_xpos[world * self.ngeom + geom] = pos;
    }

    /// Set the orientation of `geom` in `world`.
    pub fn set_xmat(&mut self, world: usize, geom: usize, mat: Matrix3<f64>) {
        self.geom_xmat[world * self.ngeom + geom] = mat;
    }

    /// Capacity of the candidate buffer (shared across worlds).
    #[inline]
    #[must_use]
    pub fn nconmax(&self) -> usize {
        self.collision.capacity()
    }

    /// Raw candidate count; may exceed `nconmax` after overflow.
    #[must_use]
    pub fn ncollision(&self) -> usize {
        self.collision.ncollision()
    }

    /// Candidates written this step (at most `nconmax`).
    #[must_use]
    pub fn candidates(&self) -> Vec<CollisionCandidate> {
        self.collision.candidates()
    }

    /// Statistics for one warning type.
    #[must_use]
    pub fn warning(&self, warning: Warning) -> WarningStat {
        self.warnings[warning as usize]
    }

    /// Clear warning statistics.
    pub fn clear_warnings(&mut self) {
        self.warnings = [WarningStat::default(); NUM_WARNINGS];
    }

    /// Record contacts found by a narrow-phase collaborator.
    pub fn add_contacts(&mut self, count: usize) {
        self.ncon += count;
    }

    /// Record height-field contacts found by the midphase collaborator.
    ///
    /// They count toward `ncon` as well.
    pub fn add_hfield_contacts(&mut self, count: usize) {
        self.ncon += count;
        self.ncon_hfield += count;
    }

    pub(crate) fn check_model(&self, model: &Model) {
        debug_assert_eq!(self.ngeom, model.ngeom, "Data built for a different model");
        debug_assert_eq!(self.geom_xpos.len(), self.nworld * self.ngeom);
        debug_assert_eq!(self.geom_xmat.len(), self.nworld * self.ngeom);
    }
}
