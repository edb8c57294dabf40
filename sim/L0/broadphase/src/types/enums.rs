//! Enums, flag constants and error types for the collision pipeline.
//!
//! This module defines the type-level vocabulary shared across all pipeline
//! stages: geometry types, disable bits, and model-building errors.

use nalgebra::Vector3;

/// Geometry type for collision detection.
///
/// Declaration order is the canonical type order: every emitted collision
/// candidate satisfies `geom_type[low] <= geom_type[high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum GeomType {
    /// Plane (infinite, typically used for ground).
    Plane,
    /// Sphere defined by radius.
    #[default]
    Sphere,
    /// Capsule (cylinder with hemispherical caps).
    Capsule,
    /// Cylinder.
    Cylinder,
    /// Box (rectangular cuboid).
    Box,
    /// Ellipsoid.
    Ellipsoid,
    /// Convex mesh (requires mesh data).
    Mesh,
    /// Height field terrain.
    Hfield,
    /// Signed distance field.
    Sdf,
}

impl GeomType {
    /// Compute the bounding sphere radius for a geometry from its type and size.
    ///
    /// # Arguments
    /// * `size` - Type-specific size parameters:
    ///   - Sphere: `[radius, _, _]`
    ///   - Box: `[half_x, half_y, half_z]`
    ///   - Capsule: `[radius, half_length, _]`
    ///   - Cylinder: `[radius, half_length, _]`
    ///   - Ellipsoid: `[radius_x, radius_y, radius_z]`
    ///   - Plane: ignored (returns `0.0`, the infinite-plane marker)
    ///   - Mesh: `[scale_x, scale_y, scale_z]` (conservative estimate)
    ///   - Hfield: `[half_x, half_y, z_top]`
    ///   - Sdf: `[half_x, half_y, half_z]`
    ///
    /// Mesh, height field and SDF estimates are conservative; scene loaders
    /// with access to the asset overwrite them with the exact value.
    #[must_use]
    pub fn bounding_radius(self, size: Vector3<f64>) -> f64 {
        match self {
            Self::Plane => 0.0,
            Self::Sphere => size.x,
            Self::Box | Self::Sdf | Self::Hfield => size.norm(), // Distance from center to corner
            Self::Capsule => size.x + size.y,     // radius + half_length
            Self::Cylinder => size.x.hypot(size.y), // sqrt(r² + h²)
            Self::Ellipsoid => size.x.max(size.y).max(size.z), // Max semi-axis
            Self::Mesh => {
                let scale = size.x.max(size.y).max(size.z);
                if scale > 0.0 { scale * 10.0 } else { 10.0 }
            }
        }
    }

    /// Whether narrow phase for this type is handled by the SDF collaborator.
    #[must_use]
    pub const fn is_sdf(self) -> bool {
        matches!(self, Self::Sdf)
    }

    /// Whether candidates involving this type need height-field triangle
    /// expansion before narrow phase.
    #[must_use]
    pub const fn is_hfield(self) -> bool {
        matches!(self, Self::Hfield)
    }
}

// ==================== Disable Flags ====================
// Bit positions match MuJoCo's mjtDisableBit.

/// Disable all constraint processing (contacts included).
pub const DISABLE_CONSTRAINT: u32 = 1 << 0;
/// Disable contact detection.
pub const DISABLE_CONTACT: u32 = 1 << 4;

/// Errors raised while building a [`Model`](super::Model).
///
/// The collision entry point itself is infallible; all checks happen once,
/// at build time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Geom index outside `0..ngeom`.
    #[error("geom index {index} out of range (ngeom={ngeom})")]
    GeomOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of geoms in the model.
        ngeom: usize,
    },

    /// Body index outside `0..nbody`.
    #[error("body index {index} out of range (nbody={nbody})")]
    BodyOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of bodies in the model.
        nbody: usize,
    },

    /// An explicit pair names the same geom twice.
    #[error("explicit pair references geom {0} twice")]
    SelfPair(usize),

    /// The same geom pair was declared more than once.
    #[error("explicit pair ({0}, {1}) declared more than once")]
    DuplicatePair(usize, usize),

    /// Negative or non-finite size, margin or bounding radius.
    #[error("invalid {field} for geom {geom}: {value}")]
    InvalidGeomValue {
        /// Field name (`size`, `margin`, `rbound`).
        field: &'static str,
        /// Geom index.
        geom: usize,
        /// Offending value.
        value: f64,
    },

    /// Per-world override names a world beyond the batched table.
    #[error("world {world} override is not contiguous with {nrow} existing rows")]
    WorldOverride {
        /// World index of the override.
        world: usize,
        /// Rows present when the override was applied.
        nrow: usize,
    },

    /// Invalid collision options.
    #[error(transparent)]
    Options(#[from] sim_types::SimError),
}
