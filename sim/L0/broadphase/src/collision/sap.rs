//! Sweep-and-prune broad phase.
//!
//! Four stages, each a full barrier for the next:
//!
//! 1. **Project**: every geom's bounding sphere onto a fixed sweep direction,
//!    giving an interval `[center - radius, center + radius]`.
//! 2. **Sort**: per world, geoms by ascending lower bound. Either one sort per
//!    world ([`sort_tile`]) or one global sort keyed by world id
//!    ([`sort_segmented`]). Both break ties by geom id and produce identical
//!    permutations.
//! 3. **Range**: per sorted position, the number of later positions whose
//!    lower bound does not exceed this geom's upper bound. Lower bounds are
//!    sorted, so every overlapping partner lies inside that range.
//! 4. **Sweep**: ranges vary wildly (a plane overlaps everything, a small body
//!    almost nothing). An exclusive prefix sum over all worlds flattens the
//!    work into `[0, total)`; a fixed pool of workers strides over it,
//!    inverting each unit back to `(world, i, j)` by binary search.

use nalgebra::Vector3;

use super::emit::emit_pair;
use super::filter::sphere_filter;
use crate::types::validation::MAX_VAL;
use crate::types::{Data, Model};

/// Per-step sweep-and-prune scratch, flattened `[world, geom]`.
#[derive(Debug, Clone, Default)]
pub struct SapScratch {
    /// Interval lower bounds. Indexed by geom id after projection; sorted in
    /// place (indexed by sorted position) after the sort stage.
    pub projection_lower: Vec<f64>,
    /// Interval upper bounds, always indexed by geom id.
    pub projection_upper: Vec<f64>,
    /// Sorted position to geom id, per world.
    pub sort_index: Vec<usize>,
    /// Overlap candidates after each sorted position.
    pub range: Vec<usize>,
    /// Exclusive prefix sum of `range` over all worlds, with the total
    /// appended (length `nworld * ngeom + 1`).
    pub cumulative_sum: Vec<usize>,
    sorted_lower: Vec<f64>,
}

impl SapScratch {
    /// Scratch sized for `nworld` worlds of `ngeom` geoms.
    #[must_use]
    pub fn new(nworld: usize, ngeom: usize) -> Self {
        let n = nworld * ngeom;
        Self {
            projection_lower: vec![0.0; n],
            projection_upper: vec![0.0; n],
            sort_index: vec![0; n],
            range: vec![0; n],
            cumulative_sum: vec![0; n + 1],
            sorted_lower: vec![0.0; n],
        }
    }

    /// Total sweep work of the last step.
    #[must_use]
    pub fn total_work(&self) -> usize {
        self.cumulative_sum.last().copied().unwrap_or(0)
    }
}

// ==================== Project ====================

fn project_world(
    model: &Model,
    world: usize,
    xpos: &[Vector3<f64>],
    direction: &Vector3<f64>,
    lower: &mut [f64],
    upper: &mut [f64],
    index: &mut [usize],
) {
    for (g, pos) in xpos.iter().enumerate() {
        let rbound = model.rbound(world, g);
        let rbound = if rbound == 0.0 { MAX_VAL } else { rbound };
        let radius = rbound + model.margin(world, g);
        let center = direction.dot(pos);
        lower[g] = center - radius;
        upper[g] = center + radius;
        index[g] = g;
    }
}

/// Project every geom of every world onto `direction` (unit length).
///
/// Planes (zero bounding radius) project to a [`MAX_VAL`]-wide interval.
/// Resets `sort_index` to the identity.
pub fn project(
    model: &Model,
    geom_xpos: &[Vector3<f64>],
    sap: &mut SapScratch,
    direction: &Vector3<f64>,
) {
    let ngeom = model.ngeom;
    if ngeom == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IndexedParallelIterator, ParallelIterator};
        use rayon::slice::{ParallelSlice, ParallelSliceMut};
        geom_xpos
            .par_chunks(ngeom)
            .zip(sap.projection_lower.par_chunks_mut(ngeom))
            .zip(sap.projection_upper.par_chunks_mut(ngeom))
            .zip(sap.sort_index.par_chunks_mut(ngeom))
            .enumerate()
            .for_each(|(world, (((xpos, lower), upper), index))| {
                project_world(model, world, xpos, direction, lower, upper, index);
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        geom_xpos
            .chunks(ngeom)
            .zip(sap.projection_lower.chunks_mut(ngeom))
            .zip(sap.projection_upper.chunks_mut(ngeom))
            .zip(sap.sort_index.chunks_mut(ngeom))
            .enumerate()
            .for_each(|(world, (((xpos, lower), upper), index))| {
                project_world(model, world, xpos, direction, lower, upper, index);
            });
    }
}

// ==================== Sort ====================

fn sort_world(lower: &mut [f64], index: &mut [usize], sorted: &mut [f64]) {
    index.sort_unstable_by(|&a, &b| lower[a].total_cmp(&lower[b]).then(a.cmp(&b)));
    for (dst, &g) in sorted.iter_mut().zip(index.iter()) {
        *dst = lower[g];
    }
    lower.copy_from_slice(sorted);
}

/// Sort each world independently by lower bound.
///
/// Suited to worlds with few geoms. Expects the identity permutation
/// written by [`project`].
pub fn sort_tile(sap: &mut SapScratch, ngeom: usize) {
    if ngeom == 0 {
        return;
    }
    let SapScratch {
        projection_lower,
        sort_index,
        sorted_lower,
        ..
    } = sap;

    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IndexedParallelIterator, ParallelIterator};
        use rayon::slice::ParallelSliceMut;
        projection_lower
            .par_chunks_mut(ngeom)
            .zip(sort_index.par_chunks_mut(ngeom))
            .zip(sorted_lower.par_chunks_mut(ngeom))
            .for_each(|((lower, index), sorted)| sort_world(lower, index, sorted));
    }

    #[cfg(not(feature = "parallel"))]
    {
        projection_lower
            .chunks_mut(ngeom)
            .zip(sort_index.chunks_mut(ngeom))
            .zip(sorted_lower.chunks_mut(ngeom))
            .for_each(|((lower, index), sorted)| sort_world(lower, index, sorted));
    }
}

/// Sort all worlds in one pass, keyed by `(world, lower bound, geom id)`.
///
/// Suited to worlds with many geoms. Produces the same permutation as
/// [`sort_tile`].
pub fn sort_segmented(sap: &mut SapScratch, ngeom: usize) {
    if ngeom == 0 {
        return;
    }

    let mut keys: Vec<(usize, f64, usize)> = sap
        .projection_lower
        .iter()
        .enumerate()
        .map(|(k, &lower)| (k / ngeom, lower, k % ngeom))
        .collect();

    let cmp = |a: &(usize, f64, usize), b: &(usize, f64, usize)| {
        a.0.cmp(&b.0)
            .then(a.1.total_cmp(&b.1))
            .then(a.2.cmp(&b.2))
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::slice::ParallelSliceMut;
        keys.par_sort_unstable_by(cmp);
    }

    #[cfg(not(feature = "parallel"))]
    {
        keys.sort_unstable_by(cmp);
    }

    for (k, (_, lower, geom)) in keys.into_iter().enumerate() {
        sap.projection_lower[k] = lower;
        sap.sort_index[k] = geom;
    }
}

// ==================== Range ====================

fn range_world(lower: &[f64], upper: &[f64], index: &[usize], range: &mut [usize]) {
    for (i, count) in range.iter_mut().enumerate() {
        let hi = upper[index[i]];
        *count = lower[i + 1..].partition_point(|&l| l <= hi);
    }
}

/// Count, for every sorted position, the later positions that may overlap.
pub fn compute_range(sap: &mut SapScratch, ngeom: usize) {
    if ngeom == 0 {
        return;
    }
    let SapScratch {
        projection_lower,
        projection_upper,
        sort_index,
        range,
        ..
    } = sap;

    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IndexedParallelIterator, ParallelIterator};
        use rayon::slice::{ParallelSlice, ParallelSliceMut};
        range
            .par_chunks_mut(ngeom)
            .zip(projection_lower.par_chunks(ngeom))
            .zip(projection_upper.par_chunks(ngeom))
            .zip(sort_index.par_chunks(ngeom))
            .for_each(|(((range, lower), upper), index)| {
                range_world(lower, upper, index, range);
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        range
            .chunks_mut(ngeom)
            .zip(projection_lower.chunks(ngeom))
            .zip(projection_upper.chunks(ngeom))
            .zip(sort_index.chunks(ngeom))
            .for_each(|(((range, lower), upper), index)| {
                range_world(lower, upper, index, range);
            });
    }
}

/// Exclusive prefix sum of `range`, total appended. Returns the total.
pub fn cumulative_sum(sap: &mut SapScratch) -> usize {
    let mut acc = 0;
    for (dst, &r) in sap.cumulative_sum.iter_mut().zip(&sap.range) {
        *dst = acc;
        acc += r;
    }
    if let Some(last) = sap.cumulative_sum.last_mut() {
        *last = acc;
    }
    acc
}

// ==================== Sweep ====================

#[inline]
fn sweep_unit(model: &Model, data: &Data, unit: usize) {
    let ngeom = model.ngeom;
    let sap = &data.sap;

    // last k with cumulative_sum[k] <= unit; range[k] > 0 there
    let k = sap.cumulative_sum.partition_point(|&c| c <= unit) - 1;
    let world = k / ngeom;
    let i = k % ngeom;
    let j = i + 1 + (unit - sap.cumulative_sum[k]);

    let base = world * ngeom;
    let ga = sap.sort_index[base + i];
    let gb = sap.sort_index[base + j];
    let (g1, g2) = if ga < gb { (ga, gb) } else { (gb, ga) };

    let compat = model.pair_table.get(g1, g2);
    if !compat.is_admissible() {
        return;
    }
    if sphere_filter(model, data, g1, g2, world) {
        emit_pair(model, &data.collision, g1, g2, world, compat.pair_id());
    }
}

/// Test every pair inside the computed ranges and emit survivors.
///
/// Runs `nsweep` workers; worker `w` handles units `w, w + nsweep, ...`.
/// A pool size of zero still runs one worker.
pub fn sweep(model: &Model, data: &Data, nsweep: usize) {
    let total = data.sap.total_work();
    if total == 0 {
        return;
    }
    let nsweep = nsweep.clamp(1, total);

    let worker = |w: usize| {
        let mut unit = w;
        while unit < total {
            sweep_unit(model, data, unit);
            unit += nsweep;
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};
        (0..nsweep).into_par_iter().for_each(worker);
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..nsweep).for_each(worker);
    }
}

// ==================== Pipeline ====================

/// Run all four sweep-and-prune stages, appending to `data.collision`.
///
/// `segmented` selects [`sort_segmented`] over [`sort_tile`].
pub fn sap_broadphase(model: &Model, data: &mut Data, segmented: bool) {
    let ngeom = model.ngeom;
    let [x, y, z] = model.opt.unit_direction();
    let direction = Vector3::new(x, y, z);

    project(model, &data.geom_xpos, &mut data.sap, &direction);
    if segmented {
        sort_segmented(&mut data.sap, ngeom);
    } else {
        sort_tile(&mut data.sap, ngeom);
    }
    compute_range(&mut data.sap, ngeom);
    let total = cumulative_sum(&mut data.sap);

    let nsweep = model.opt.sap_sweep_factor.max(1) * data.nworld * ngeom;
    tracing::trace!(total, nsweep, segmented, "sap sweep");
    sweep(model, data, nsweep);
}
