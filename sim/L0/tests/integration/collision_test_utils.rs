//! Shared helpers for collision integration tests.
//!
//! Candidate buffers are unordered, so every comparison goes through
//! [`candidate_set`], a sorted set of `(world, geom0, geom1, pairid, hftri)`.

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use std::collections::BTreeSet;

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use rand::Rng;

use sim_broadphase::{
    BroadphaseType, CollisionCandidate, ContactPair, Data, GeomType, HFTRI_EXPAND, Model,
    ModelBuilder, collision, sphere_filter,
};

/// All strategies under test.
pub const STRATEGIES: [BroadphaseType; 3] = [
    BroadphaseType::Nxn,
    BroadphaseType::SapTile,
    BroadphaseType::SapSegmented,
];

/// Comparable form of a candidate.
pub type CandidateKey = (usize, usize, usize, Option<usize>, i32);

/// Key for one candidate.
#[must_use]
pub fn key(c: &CollisionCandidate) -> CandidateKey {
    (c.worldid, c.geom[0], c.geom[1], c.pairid, c.hftri_index)
}

/// Stored candidates as a set. Panics on duplicates.
#[must_use]
pub fn candidate_set(data: &Data) -> BTreeSet<CandidateKey> {
    let candidates = data.candidates();
    let set: BTreeSet<_> = candidates.iter().map(key).collect();
    assert_eq!(set.len(), candidates.len(), "duplicate candidates emitted");
    set
}

/// Run one collision step with `strategy` and return the candidate set.
pub fn run(model: &mut Model, data: &mut Data, strategy: BroadphaseType) -> BTreeSet<CandidateKey> {
    model.opt.broadphase = strategy;
    collision(model, data);
    candidate_set(data)
}

/// O(n²) reference: every admissible pair that passes the sphere filter,
/// in canonical order.
#[must_use]
pub fn reference_set(model: &Model, data: &Data) -> BTreeSet<CandidateKey> {
    let mut set = BTreeSet::new();
    for world in 0..data.nworld {
        for i in 0..model.ngeom {
            for j in (i + 1)..model.ngeom {
                let compat = model.pair_table.get(i, j);
                if !compat.is_admissible() || !sphere_filter(model, data, i, j, world) {
                    continue;
                }
                let (ti, tj) = (model.geom_type[i], model.geom_type[j]);
                let (lo, hi) = if (ti, i) > (tj, j) { (j, i) } else { (i, j) };
                let hftri = if ti.is_hfield() || tj.is_hfield() {
                    HFTRI_EXPAND
                } else {
                    0
                };
                set.insert((world, lo, hi, compat.pair_id(), hftri));
            }
        }
    }
    set
}

/// Check the per-entry invariants of the candidate buffer.
pub fn assert_canonical(model: &Model, data: &Data) {
    for c in data.candidates() {
        let [g0, g1] = c.geom;
        assert_ne!(g0, g1, "self pair {c:?}");
        assert!(
            model.geom_type[g0] <= model.geom_type[g1],
            "non-canonical type order {c:?}"
        );
        assert!(c.worldid < data.nworld);
        assert!(model.pair_table.get(g0, g1).is_admissible());
    }
}

/// Two spheres of radius `r` on separate bodies.
#[must_use]
pub fn sphere_pair(r: f64) -> ModelBuilder {
    let mut builder = ModelBuilder::new();
    let a = builder.add_body(0);
    let b = builder.add_body(0);
    builder.add_geom(GeomType::Sphere, Vector3::new(r, 0.0, 0.0), a);
    builder.add_geom(GeomType::Sphere, Vector3::new(r, 0.0, 0.0), b);
    builder
}

/// Random mixed scene: optional ground plane, shapes of varying type on a
/// random kinematic tree, random affinity masks, margins, body excludes and
/// explicit pairs, plus a per-world margin override.
pub fn random_model(rng: &mut impl Rng, ngeom: usize, with_plane: bool) -> Model {
    const TYPES: [GeomType; 6] = [
        GeomType::Sphere,
        GeomType::Capsule,
        GeomType::Box,
        GeomType::Ellipsoid,
        GeomType::Cylinder,
        GeomType::Mesh,
    ];

    let mut builder = ModelBuilder::new();
    let mut bodies = vec![0];
    for _ in 0..(ngeom / 2).max(1) {
        let parent = bodies[rng.gen_range(0..bodies.len())];
        bodies.push(builder.add_body(parent));
    }

    let mut start = 0;
    if with_plane {
        builder.add_geom(GeomType::Plane, Vector3::zeros(), 0);
        start = 1;
    }

    for g in start..ngeom {
        let geom_type = TYPES[rng.gen_range(0..TYPES.len())];
        let size = Vector3::new(
            rng.gen_range(0.05..0.4),
            rng.gen_range(0.05..0.4),
            rng.gen_range(0.05..0.4),
        );
        let body = bodies[rng.gen_range(1..bodies.len())];
        builder.add_geom(geom_type, size, body);
        builder.set_geom_margin(g, rng.gen_range(0.0..0.05));
        if geom_type == GeomType::Mesh {
            builder.set_geom_rbound(g, size.norm());
        }
        if rng.gen_bool(0.1) {
            builder.set_geom_affinity(g, 2, 2);
        }
    }

    if bodies.len() > 2 && rng.gen_bool(0.5) {
        builder.add_exclude(bodies[1], bodies[bodies.len() - 1]);
    }
    if ngeom >= 3 {
        builder.add_contact_pair(ContactPair::new(ngeom - 1, ngeom - 2));
    }
    if ngeom > start {
        builder.set_world_margin(1, start, 0.2);
    }

    builder.build().unwrap()
}

/// Random poses in a cube of half-width `extent`, plus a tilted ground plane.
pub fn randomize_poses(rng: &mut impl Rng, model: &Model, data: &mut Data, extent: f64) {
    for world in 0..data.nworld {
        for geom in 0..model.ngeom {
            let pos = Vector3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            );
            data.set_xpos(world, geom, pos);
            data.set_xmat(world, geom, random_rotation(rng));
        }
    }
}

/// Uniform-ish random rotation matrix.
pub fn random_rotation(rng: &mut impl Rng) -> Matrix3<f64> {
    let axis = Vector3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    Unit::try_new(axis, 1e-6).map_or_else(Matrix3::identity, |axis| {
        *Rotation3::from_axis_angle(&axis, angle).matrix()
    })
}
