//! Brute-force broad phase.
//!
//! Tests every admissible pair of every world. The admissible list is
//! precomputed at build time, so excluded pairs cost nothing here. One unit
//! of work per `(world, pair)`, flattened into a single index space.

use super::emit::emit_pair;
use super::filter::sphere_filter;
use crate::types::{Data, Model};

/// Run the brute-force broad phase, appending candidates to `data.collision`.
///
/// Cost is O(nworld × admissible pairs).
pub fn nxn_broadphase(model: &Model, data: &Data) {
    let npair = model.nxn_geom_pair.len();
    let total = data.nworld * npair;
    if total == 0 {
        return;
    }

    let test = |unit: usize| {
        let world = unit / npair;
        let pair = &model.nxn_geom_pair[unit % npair];
        if sphere_filter(model, data, pair.geom1, pair.geom2, world) {
            let pairid = model.pair_table.at(pair.table_index).pair_id();
            emit_pair(
                model,
                &data.collision,
                pair.geom1,
                pair.geom2,
                world,
                pairid,
            );
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};
        (0..total).into_par_iter().for_each(test);
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..total).for_each(test);
    }

    tracing::trace!(nworld = data.nworld, npair, "nxn broadphase done");
}
