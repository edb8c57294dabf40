//! Factory methods for canonical collision scenes.
//!
//! These constructors produce pre-configured [`Model`] instances used by
//! inline tests, benchmarks and `sim-conformance-tests`.

use nalgebra::Vector3;

use super::batched::BatchedArray;
use super::enums::GeomType;
use super::model::Model;
use super::pair_table::{PairCompat, PairTable};

impl Model {
    /// A ground plane (geom 0, on the world body) plus one free sphere per
    /// entry of `radii` (geoms `1..=n`, each on its own child of the world).
    ///
    /// Every pair is admissible. All geoms share `margin`.
    ///
    /// # Panics
    /// Panics if a radius or the margin is negative or non-finite.
    ///
    /// # Example
    /// ```
    /// use sim_broadphase::Model;
    ///
    /// let model = Model::ground_and_spheres(&[0.5, 0.25], 0.01);
    /// assert_eq!(model.ngeom, 3);
    /// assert_eq!(model.nxn_geom_pair.len(), 3);
    /// ```
    #[must_use]
    pub fn ground_and_spheres(radii: &[f64], margin: f64) -> Self {
        assert!(
            margin.is_finite() && margin >= 0.0,
            "margin must be finite and non-negative"
        );
        assert!(
            radii.iter().all(|r| r.is_finite() && *r >= 0.0),
            "radii must be finite and non-negative"
        );

        let mut model = Self::empty();
        model.name = "ground_and_spheres".to_string();

        let ngeom = radii.len() + 1;
        model.ngeom = ngeom;
        model.nbody = ngeom; // world + one body per sphere

        model.geom_type.push(GeomType::Plane);
        model.geom_body.push(0);
        model.geom_size.push(Vector3::new(0.0, 0.0, 1.0));

        for (i, &r) in radii.iter().enumerate() {
            model.geom_type.push(GeomType::Sphere);
            model.geom_body.push(i + 1);
            model.geom_size.push(Vector3::new(r, 0.0, 0.0));
        }

        let rbound = model
            .geom_type
            .iter()
            .zip(&model.geom_size)
            .map(|(t, s)| t.bounding_radius(*s))
            .collect();
        model.geom_rbound = BatchedArray::shared(rbound);
        model.geom_margin = BatchedArray::shared(vec![margin; ngeom]);

        model.pair_table = PairTable::new(ngeom, PairCompat::Default);
        model.nxn_geom_pair = model.pair_table.admissible_pairs();

        model
    }
}
