//! Zero bounding radius marks an infinite plane: tested by signed distance
//! along its normal and never pruned by sweep-and-prune.

#![allow(clippy::unwrap_used)]

use nalgebra::{Rotation3, Vector3};
use sim_broadphase::{GeomType, Model, ModelBuilder};

use crate::collision_test_utils::{STRATEGIES, run};

#[test]
fn sphere_outside_margin_then_inside() {
    let mut model = Model::ground_and_spheres(&[0.5], 0.1);
    let mut data = model.make_data(1, 4);

    // strictly beyond radius + margin
    data.set_xpos(0, 1, Vector3::new(0.0, 0.0, 0.61));
    for strategy in STRATEGIES {
        assert!(run(&mut model, &mut data, strategy).is_empty(), "{strategy:?}");
    }

    // within the margin
    data.set_xpos(0, 1, Vector3::new(0.0, 0.0, 0.59));
    for strategy in STRATEGIES {
        let got = run(&mut model, &mut data, strategy);
        assert_eq!(got.into_iter().collect::<Vec<_>>(), vec![(0, 0, 1, None, 0)]);
    }
}

#[test]
fn plane_extent_is_infinite() {
    let mut model = Model::ground_and_spheres(&[0.5], 0.0);
    let mut data = model.make_data(1, 4);

    // far along the plane, resting on it
    data.set_xpos(0, 1, Vector3::new(1.0e6, -2.0e6, 0.3));
    for strategy in STRATEGIES {
        assert_eq!(run(&mut model, &mut data, strategy).len(), 1, "{strategy:?}");
    }
}

#[test]
fn tilted_plane_uses_its_normal() {
    let mut model = Model::ground_and_spheres(&[0.25], 0.0);
    let mut data = model.make_data(2, 4);

    // world 0: wall facing +x at the origin; world 1: default ground
    let wall = Rotation3::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_2);
    data.set_xmat(0, 0, *wall.matrix());
    data.set_xpos(0, 1, Vector3::new(0.2, 0.0, 5.0));
    data.set_xpos(1, 1, Vector3::new(0.2, 0.0, 5.0));

    for strategy in STRATEGIES {
        let got = run(&mut model, &mut data, strategy);
        assert_eq!(got.into_iter().collect::<Vec<_>>(), vec![(0, 0, 1, None, 0)]);
    }
}

#[test]
fn plane_after_other_geoms_still_leads() {
    let mut builder = ModelBuilder::new();
    let body = builder.add_body(0);
    builder.add_geom(GeomType::Box, Vector3::new(0.2, 0.2, 0.2), body);
    builder.add_geom(GeomType::Capsule, Vector3::new(0.1, 0.3, 0.0), body);
    let plane = builder.add_geom(GeomType::Plane, Vector3::zeros(), 0);
    let mut model = builder.build().unwrap();

    let mut data = model.make_data(1, 8);
    data.set_xpos(0, 0, Vector3::new(0.0, 0.0, 0.1));
    data.set_xpos(0, 1, Vector3::new(3.0, 0.0, 0.1));

    for strategy in STRATEGIES {
        let got = run(&mut model, &mut data, strategy);
        let expected = vec![(0, plane, 0, None, 0), (0, plane, 1, None, 0)];
        assert_eq!(got.into_iter().collect::<Vec<_>>(), expected, "{strategy:?}");
    }
}

#[test]
fn two_planes_pair_deterministically() {
    let mut builder = ModelBuilder::new();
    let floor = builder.add_geom(GeomType::Plane, Vector3::zeros(), 0);
    let wall_body = builder.add_body(0);
    let wall = builder.add_geom(GeomType::Plane, Vector3::zeros(), wall_body);
    let mut model = builder.build().unwrap();

    let mut data = model.make_data(1, 4);
    data.set_xpos(0, wall, Vector3::new(0.0, 0.0, -1.0));

    for strategy in STRATEGIES {
        let got = run(&mut model, &mut data, strategy);
        assert_eq!(
            got.into_iter().collect::<Vec<_>>(),
            vec![(0, floor, wall, None, 0)],
            "{strategy:?}"
        );
    }
}
