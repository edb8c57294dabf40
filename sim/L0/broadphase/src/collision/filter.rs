//! Bounding-sphere filter.
//!
//! Each geom is treated as a sphere of radius `rbound`, inflated by the
//! larger of the two margins. A zero bounding radius marks an infinite
//! plane, tested by signed distance along its normal instead.
//!
//! The filter is conservative: it never rejects a pair that narrow phase
//! could report in contact.

use nalgebra::{Matrix3, Vector3};

use crate::types::{Data, Model};

/// May geoms `g1` and `g2` of `world` be in contact?
#[inline]
#[must_use]
pub fn sphere_filter(model: &Model, data: &Data, g1: usize, g2: usize, world: usize) -> bool {
    overlap(
        model.rbound(world, g1),
        model.rbound(world, g2),
        model.margin(world, g1).max(model.margin(world, g2)),
        data.xpos(world, g1),
        data.xpos(world, g2),
        data.xmat(world, g1),
        data.xmat(world, g2),
    )
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn overlap(
    rbound1: f64,
    rbound2: f64,
    margin: f64,
    pos1: &Vector3<f64>,
    pos2: &Vector3<f64>,
    mat1: &Matrix3<f64>,
    mat2: &Matrix3<f64>,
) -> bool {
    let bound = rbound1 + rbound2 + margin;
    let dif = pos2 - pos1;

    if rbound1 != 0.0 && rbound2 != 0.0 {
        dif.norm_squared() <= bound * bound
    } else if rbound1 == 0.0 {
        // geom1 is a plane: height of geom2's center above it
        mat1.column(2).dot(&dif) <= bound
    } else {
        mat2.column(2).dot(&(-dif)) <= bound
    }
}
