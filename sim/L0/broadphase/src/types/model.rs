//! Model struct definition and field accessors.
//!
//! [`Model`] is the static, immutable description of the collision scene:
//! geometry types, bounding radii, margins, the pair-compatibility table and
//! the collision options. It is constructed by [`ModelBuilder`](super::ModelBuilder)
//! (or a scene loader) and shared read-only by every world and every step.

use nalgebra::Vector3;

use sim_types::CollisionOptions;

use super::batched::BatchedArray;
use super::callbacks::CbCollisionStage;
use super::contact_types::ContactPair;
use super::data::Data;
use super::enums::GeomType;
use super::pair_table::{NxnPair, PairTable};

/// Static model definition (the collision subset of mjModel).
///
/// Immutable after construction.
///
/// # Memory Layout
///
/// - `geom_*` vectors indexed by `geom_id`
/// - [`BatchedArray`] fields indexed by `(world, geom_id)` with row broadcast
/// - `pair_table` addressed through [`PairTable::get`]
#[derive(Debug, Clone)]
pub struct Model {
    // ==================== Metadata ====================
    /// Model name.
    pub name: String,

    // ==================== Dimensions ====================
    /// Number of bodies (including world body 0).
    pub nbody: usize,
    /// Number of collision geometries.
    pub ngeom: usize,
    /// Number of height-field geoms.
    pub nhfield: usize,
    /// Whether any geom is a signed distance field.
    pub has_sdf_geom: bool,

    // ==================== Geoms ====================
    /// Geometry type.
    pub geom_type: Vec<GeomType>,
    /// Parent body.
    pub geom_body: Vec<usize>,
    /// Type-specific size parameters.
    pub geom_size: Vec<Vector3<f64>>,
    /// Bounding sphere radius per world (`0.0` = infinite plane).
    pub geom_rbound: BatchedArray<f64>,
    /// Contact margin per world.
    pub geom_margin: BatchedArray<f64>,

    // ==================== Pairs ====================
    /// Compatibility of every geom pair.
    pub pair_table: PairTable,
    /// Explicit pairs referenced by `PairCompat::Custom`.
    pub contact_pairs: Vec<ContactPair>,
    /// Admissible pairs for the brute-force broad phase.
    pub nxn_geom_pair: Vec<NxnPair>,

    // ==================== Options ====================
    /// Collision options.
    pub opt: CollisionOptions,
    /// Disable bitfield (`DISABLE_*` constants).
    pub disableflags: u32,

    // ==================== Callbacks ====================
    /// Height-field midphase. Runs only when `nhfield > 0`.
    pub cb_hfield_midphase: Option<CbCollisionStage>,
    /// Convex narrow phase.
    pub cb_convex_narrowphase: Option<CbCollisionStage>,
    /// Primitive narrow phase.
    pub cb_primitive_narrowphase: Option<CbCollisionStage>,
    /// SDF narrow phase. Runs only when `has_sdf_geom`.
    pub cb_sdf_narrowphase: Option<CbCollisionStage>,
}

impl Model {
    /// An empty model: world body only, no geoms.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            nbody: 1,
            ngeom: 0,
            nhfield: 0,
            has_sdf_geom: false,
            geom_type: Vec::new(),
            geom_body: Vec::new(),
            geom_size: Vec::new(),
            geom_rbound: BatchedArray::default(),
            geom_margin: BatchedArray::default(),
            pair_table: PairTable::default(),
            contact_pairs: Vec::new(),
            nxn_geom_pair: Vec::new(),
            opt: CollisionOptions::default(),
            disableflags: 0,
            cb_hfield_midphase: None,
            cb_convex_narrowphase: None,
            cb_primitive_narrowphase: None,
            cb_sdf_narrowphase: None,
        }
    }

    /// Allocate per-step state for `nworld` worlds sharing a candidate buffer
    /// of capacity `nconmax`.
    ///
    /// Poses start at the origin with identity orientation.
    #[must_use]
    pub fn make_data(&self, nworld: usize, nconmax: usize) -> Data {
        Data::new(nworld, self.ngeom, nconmax)
    }

    /// Bounding radius of `geom` in `world`.
    #[inline]
    #[must_use]
    pub fn rbound(&self, world: usize, geom: usize) -> f64 {
        self.geom_rbound.get(world, geom)
    }

    /// Contact margin of `geom` in `world`.
    #[inline]
    #[must_use]
    pub fn margin(&self, world: usize, geom: usize) -> f64 {
        self.geom_margin.get(world, geom)
    }

    /// Number of admissible (non-excluded) pairs.
    #[must_use]
    pub fn npair_admissible(&self) -> usize {
        self.nxn_geom_pair.len()
    }
}
