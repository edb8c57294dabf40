//! Disable flags gate the whole collision step.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Vector3;
use sim_broadphase::{
    CbCollisionStage, DISABLE_CONSTRAINT, DISABLE_CONTACT, Data, Model, collision,
};

use crate::collision_test_utils::{STRATEGIES, run};

fn touching_spheres(nworld: usize) -> (Model, Data) {
    let model = Model::ground_and_spheres(&[0.5, 0.5], 0.0);
    let mut data = model.make_data(nworld, 16);
    for world in 0..nworld {
        data.set_xpos(world, 1, Vector3::new(0.0, 0.0, 0.4));
        data.set_xpos(world, 2, Vector3::new(0.5, 0.0, 0.4));
    }
    (model, data)
}

#[test]
fn contact_disable_yields_no_candidates() {
    let (mut model, mut data) = touching_spheres(2);
    model.disableflags = DISABLE_CONTACT;

    for strategy in STRATEGIES {
        assert!(run(&mut model, &mut data, strategy).is_empty(), "{strategy:?}");
        assert_eq!(data.ncollision(), 0);
    }
}

#[test]
fn constraint_disable_yields_no_candidates() {
    let (mut model, mut data) = touching_spheres(2);
    model.disableflags = DISABLE_CONSTRAINT;

    for strategy in STRATEGIES {
        assert!(run(&mut model, &mut data, strategy).is_empty(), "{strategy:?}");
    }
}

#[test]
fn unrelated_flag_has_no_effect() {
    let (mut model, mut data) = touching_spheres(2);
    model.disableflags = 1 << 3;

    for strategy in STRATEGIES {
        // two sphere-plane pairs and one sphere-sphere pair per world
        assert_eq!(run(&mut model, &mut data, strategy).len(), 6, "{strategy:?}");
    }
}

#[test]
fn disabled_step_clears_previous_output_and_skips_collaborators() {
    let (mut model, mut data) = touching_spheres(1);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    model.cb_convex_narrowphase = Some(CbCollisionStage::new(move |_, data| {
        counter.fetch_add(1, Ordering::Relaxed);
        data.add_contacts(1);
    }));

    collision(&model, &mut data);
    assert_eq!(data.ncollision(), 3);
    assert_eq!(data.ncon, 1);

    model.disableflags = DISABLE_CONTACT;
    collision(&model, &mut data);
    assert_eq!(data.ncollision(), 0);
    assert!(data.candidates().is_empty());
    assert_eq!(data.ncon, 0);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn zero_capacity_is_noop() {
    let model = Model::ground_and_spheres(&[0.5, 0.5], 0.0);
    let mut data = model.make_data(2, 0);
    collision(&model, &mut data);
    assert_eq!(data.ncollision(), 0);
}
