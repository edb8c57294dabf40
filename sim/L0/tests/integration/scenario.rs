//! Two worlds of three geoms each: a ground plane, a sphere hovering above
//! it (outside the margin), and a second sphere overlapping the first.

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use nalgebra::Vector3;
use sim_broadphase::{BroadphaseType, Data, Model, collision};

use crate::collision_test_utils::{STRATEGIES, assert_canonical, candidate_set, run};

/// Plane id 0, sphere id 1 with its surface 0.5 above the plane, sphere id 2
/// overlapping sphere 1. Margin 0.1 on every geom.
fn scenario() -> (Model, Data) {
    let model = Model::ground_and_spheres(&[0.2, 0.2], 0.1);
    let mut data = model.make_data(2, 16);
    for world in 0..2 {
        let shift = Vector3::new(world as f64 * 3.0, 0.0, 0.0);
        data.set_xpos(world, 1, Vector3::new(0.0, 0.0, 0.7) + shift);
        data.set_xpos(world, 2, Vector3::new(0.3, 0.0, 0.9) + shift);
    }
    (model, data)
}

#[test]
fn one_candidate_per_world() {
    let (mut model, mut data) = scenario();

    for strategy in STRATEGIES {
        let set = run(&mut model, &mut data, strategy);
        assert_eq!(data.ncollision(), 2, "{strategy:?}");
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![(0, 1, 2, None, 0), (1, 1, 2, None, 0)],
            "{strategy:?}"
        );
        assert_canonical(&model, &data);
    }
}

#[test]
fn plane_never_pairs_with_hovering_sphere() {
    let (model, mut data) = scenario();
    collision(&model, &mut data);

    for c in data.candidates() {
        assert!(!c.geom.contains(&0), "unexpected plane candidate {c:?}");
    }
}

#[test]
fn repeated_steps_are_stable() {
    let (mut model, mut data) = scenario();
    model.opt.broadphase = BroadphaseType::SapSegmented;

    collision(&model, &mut data);
    let first = candidate_set(&data);
    collision(&model, &mut data);
    assert_eq!(candidate_set(&data), first);
    assert_eq!(data.ncollision(), 2);
}
