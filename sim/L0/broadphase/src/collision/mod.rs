//! Collision driver: buffer reset, broad-phase dispatch, and hand-off to the
//! midphase and narrow-phase collaborators.
//!
//! Corresponds to MuJoCo's `engine_collision_driver.c`, batched over worlds.

pub mod emit;
pub mod filter;
pub mod nxn;
pub mod sap;

use sim_types::BroadphaseType;
use tracing::debug;

use crate::types::flags::contacts_disabled;
use crate::types::warning::{Warning, mj_warning};
use crate::types::{Data, Model};

use self::nxn::nxn_broadphase;
use self::sap::sap_broadphase;

// ============================================================================
// Dispatch
// ============================================================================

/// Zero every per-step output: the candidate buffer (cursor and slots) and
/// the narrow-phase contact counters.
pub fn reset_collision(data: &mut Data) {
    data.collision.reset();
    data.ncon = 0;
    data.ncon_hfield = 0;
}

/// Run collision detection for every world in `data`.
///
/// Fills `data.collision` with broad-phase candidates, then invokes the
/// collaborator callbacks in order: height-field midphase (only if the model
/// has height fields), convex and primitive narrow phase, SDF narrow phase
/// (only if the model has SDF geoms).
///
/// Never fails. Overflow truncates the candidate buffer and is reported
/// through `data.warnings`; disabled contacts or a zero-capacity buffer
/// leave every output empty.
pub fn collision(model: &Model, data: &mut Data) {
    data.check_model(model);
    reset_collision(data);

    if data.nconmax() == 0 || contacts_disabled(model) {
        return;
    }

    if model.ngeom >= 2 && data.nworld > 0 {
        let _span = tracing::debug_span!(
            "broadphase",
            strategy = ?model.opt.broadphase,
            nworld = data.nworld,
            ngeom = model.ngeom
        )
        .entered();

        match model.opt.broadphase {
            BroadphaseType::Nxn => nxn_broadphase(model, data),
            BroadphaseType::SapTile => sap_broadphase(model, data, false),
            BroadphaseType::SapSegmented => sap_broadphase(model, data, true),
        }

        let ncollision = data.ncollision();
        debug!(ncollision, nconmax = data.nconmax(), "broadphase candidates");
        if ncollision > data.nconmax() {
            mj_warning(data, Warning::CandidateFull, ncollision);
        }
    }

    if model.nhfield > 0 {
        if let Some(cb) = &model.cb_hfield_midphase {
            cb.call(model, data);
        }
    }
    if let Some(cb) = &model.cb_convex_narrowphase {
        cb.call(model, data);
    }
    if let Some(cb) = &model.cb_primitive_narrowphase {
        cb.call(model, data);
    }
    if model.has_sdf_geom {
        if let Some(cb) = &model.cb_sdf_narrowphase {
            cb.call(model, data);
        }
    }

    let ncon = data.ncon;
    if ncon > data.nconmax() {
        mj_warning(data, Warning::ContactFull, ncon);
    }
    debug!(ncon = data.ncon, ncon_hfield = data.ncon_hfield, "narrowphase contacts");
}
