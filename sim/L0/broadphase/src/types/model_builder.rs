//! Programmatic model construction.
//!
//! Scene loaders normally produce the pair-compatibility table; the builder
//! derives it from bodies, geoms and affinity bitmasks the way MuJoCo's
//! compiler does, so the collision core is usable on its own.

use std::collections::HashSet;

use nalgebra::Vector3;
use sim_types::CollisionOptions;

use super::batched::BatchedArray;
use super::callbacks::CbCollisionStage;
use super::contact_types::ContactPair;
use super::data::Data;
use super::enums::{GeomType, ModelError};
use super::model::Model;
use super::pair_table::{PairCompat, PairTable};
use super::validation::is_bad;

#[derive(Debug, Clone)]
struct GeomSpec {
    geom_type: GeomType,
    size: Vector3<f64>,
    body: usize,
    margin: f64,
    contype: u32,
    conaffinity: u32,
    rbound: Option<f64>,
}

/// Builder for [`Model`].
///
/// Body 0 is the world body and always exists.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    body_parent: Vec<usize>,
    geoms: Vec<GeomSpec>,
    excludes: Vec<(usize, usize)>,
    pairs: Vec<ContactPair>,
    // (world, geom, margin)
    world_margins: Vec<(usize, usize, f64)>,
    opt: CollisionOptions,
    disableflags: u32,
    base: Model,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    /// Empty builder holding only the world body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            body_parent: vec![0],
            geoms: Vec::new(),
            excludes: Vec::new(),
            pairs: Vec::new(),
            world_margins: Vec::new(),
            opt: CollisionOptions::default(),
            disableflags: 0,
            base: Model::empty(),
        }
    }

    /// Set the model name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a body under `parent`, returning its id.
    pub fn add_body(&mut self, parent: usize) -> usize {
        self.body_parent.push(parent);
        self.body_parent.len() - 1
    }

    /// Add a geom attached to `body`, returning its id.
    ///
    /// Defaults: zero margin, `contype = conaffinity = 1`, bounding radius
    /// from [`GeomType::bounding_radius`].
    pub fn add_geom(&mut self, geom_type: GeomType, size: Vector3<f64>, body: usize) -> usize {
        self.geoms.push(GeomSpec {
            geom_type,
            size,
            body,
            margin: 0.0,
            contype: 1,
            conaffinity: 1,
            rbound: None,
        });
        self.geoms.len() - 1
    }

    /// Set the margin of `geom` in every world.
    pub fn set_geom_margin(&mut self, geom: usize, margin: f64) {
        if let Some(g) = self.geoms.get_mut(geom) {
            g.margin = margin;
        }
    }

    /// Set the affinity bitmasks of `geom`.
    pub fn set_geom_affinity(&mut self, geom: usize, contype: u32, conaffinity: u32) {
        if let Some(g) = self.geoms.get_mut(geom) {
            g.contype = contype;
            g.conaffinity = conaffinity;
        }
    }

    /// Override the bounding radius of `geom` (e.g. exact mesh radius).
    pub fn set_geom_rbound(&mut self, geom: usize, rbound: f64) {
        if let Some(g) = self.geoms.get_mut(geom) {
            g.rbound = Some(rbound);
        }
    }

    /// Override the margin of `geom` in one world.
    ///
    /// Overrides may be given in any order, but the worlds named must form a
    /// contiguous range starting at 0 or 1 (row 0 always exists). A later
    /// override of the same world and geom wins.
    pub fn set_world_margin(&mut self, world: usize, geom: usize, margin: f64) {
        self.world_margins.push((world, geom, margin));
    }

    /// Never collide geoms of `body1` with geoms of `body2`.
    pub fn add_exclude(&mut self, body1: usize, body2: usize) {
        self.excludes.push((body1.min(body2), body1.max(body2)));
    }

    /// Add an explicit pair, returning its id.
    pub fn add_contact_pair(&mut self, pair: ContactPair) -> usize {
        self.pairs.push(pair);
        self.pairs.len() - 1
    }

    /// Set the collision options.
    pub fn set_options(&mut self, opt: CollisionOptions) {
        self.opt = opt;
    }

    /// Set the disable bitfield.
    pub fn set_disableflags(&mut self, flags: u32) {
        self.disableflags = flags;
    }

    /// Install the height-field midphase.
    pub fn set_hfield_midphase(&mut self, f: impl Fn(&Model, &mut Data) + Send + Sync + 'static) {
        self.base.cb_hfield_midphase = Some(CbCollisionStage::new(f));
    }

    /// Install the convex narrow phase.
    pub fn set_convex_narrowphase(
        &mut self,
        f: impl Fn(&Model, &mut Data) + Send + Sync + 'static,
    ) {
        self.base.cb_convex_narrowphase = Some(CbCollisionStage::new(f));
    }

    /// Install the primitive narrow phase.
    pub fn set_primitive_narrowphase(
        &mut self,
        f: impl Fn(&Model, &mut Data) + Send + Sync + 'static,
    ) {
        self.base.cb_primitive_narrowphase = Some(CbCollisionStage::new(f));
    }

    /// Install the SDF narrow phase.
    pub fn set_sdf_narrowphase(&mut self, f: impl Fn(&Model, &mut Data) + Send + Sync + 'static) {
        self.base.cb_sdf_narrowphase = Some(CbCollisionStage::new(f));
    }

    // ==================== Build ====================

    fn validate(&self) -> Result<(), ModelError> {
        self.opt.validate()?;

        let nbody = self.body_parent.len();
        let ngeom = self.geoms.len();
        let check_value = |field: &'static str, geom: usize, value: f64| {
            if is_bad(value) || value < 0.0 {
                Err(ModelError::InvalidGeomValue { field, geom, value })
            } else {
                Ok(())
            }
        };

        for (id, &parent) in self.body_parent.iter().enumerate().skip(1) {
            if parent >= id {
                return Err(ModelError::BodyOutOfRange {
                    index: parent,
                    nbody: id,
                });
            }
        }

        for (id, g) in self.geoms.iter().enumerate() {
            if g.body >= nbody {
                return Err(ModelError::BodyOutOfRange {
                    index: g.body,
                    nbody,
                });
            }
            for &s in g.size.iter() {
                check_value("size", id, s)?;
            }
            check_value("margin", id, g.margin)?;
            if let Some(r) = g.rbound {
                check_value("rbound", id, r)?;
            }
        }

        for &(b1, b2) in &self.excludes {
            let index = b1.max(b2);
            if index >= nbody {
                return Err(ModelError::BodyOutOfRange { index, nbody });
            }
        }

        let mut seen = HashSet::new();
        for pair in &self.pairs {
            let (g1, g2) = pair.ordered();
            if g2 >= ngeom {
                return Err(ModelError::GeomOutOfRange { index: g2, ngeom });
            }
            if g1 == g2 {
                return Err(ModelError::SelfPair(g1));
            }
            if !seen.insert((g1, g2)) {
                return Err(ModelError::DuplicatePair(g1, g2));
            }
        }

        for &(_, geom, margin) in &self.world_margins {
            if geom >= ngeom {
                return Err(ModelError::GeomOutOfRange { index: geom, ngeom });
            }
            check_value("margin", geom, margin)?;
        }

        Ok(())
    }

    /// MuJoCo affinity filtering for a default (non-explicit) pair.
    fn affinity(&self, excludes: &HashSet<(usize, usize)>, g1: usize, g2: usize) -> bool {
        let (a, b) = (&self.geoms[g1], &self.geoms[g2]);
        let (body1, body2) = (a.body, b.body);

        if body1 == body2 {
            return false;
        }
        if excludes.contains(&(body1.min(body2), body1.max(body2))) {
            return false;
        }
        // world-body geoms collide with direct children of the world
        if body1 != 0
            && body2 != 0
            && (self.body_parent[body1] == body2 || self.body_parent[body2] == body1)
        {
            return false;
        }

        (a.contype & b.conaffinity) != 0 || (b.contype & a.conaffinity) != 0
    }

    /// Validate and assemble the model.
    pub fn build(self) -> Result<Model, ModelError> {
        self.validate()?;

        let ngeom = self.geoms.len();
        let excludes: HashSet<_> = self.excludes.iter().copied().collect();

        let mut pair_table = PairTable::new(ngeom, PairCompat::Excluded);
        for i in 0..ngeom {
            for j in (i + 1)..ngeom {
                if self.affinity(&excludes, i, j) {
                    pair_table.set(i, j, PairCompat::Default);
                }
            }
        }
        for (id, pair) in self.pairs.iter().enumerate() {
            pair_table.set(pair.geom1, pair.geom2, PairCompat::Custom(id));
        }

        let rbound: Vec<f64> = self
            .geoms
            .iter()
            .map(|g| g.rbound.unwrap_or_else(|| g.geom_type.bounding_radius(g.size)))
            .collect();

        let mut geom_margin = BatchedArray::shared(self.geoms.iter().map(|g| g.margin).collect());
        let base_row = geom_margin.row(0).to_vec();
        let mut world_margins = self.world_margins.clone();
        world_margins.sort_by_key(|&(world, _, _)| world);
        for (world, geom, margin) in world_margins {
            let nrow = geom_margin.nrow();
            if world == nrow {
                geom_margin.push_row(&base_row);
            } else if world > nrow {
                return Err(ModelError::WorldOverride { world, nrow });
            }
            if let Some(row) = geom_margin.row_mut(world) {
                row[geom] = margin;
            }
        }

        let geom_type: Vec<GeomType> = self.geoms.iter().map(|g| g.geom_type).collect();
        let nxn_geom_pair = pair_table.admissible_pairs();

        tracing::debug!(
            ngeom,
            admissible = nxn_geom_pair.len(),
            custom = self.pairs.len(),
            "model built"
        );

        Ok(Model {
            name: self.name,
            nbody: self.body_parent.len(),
            ngeom,
            nhfield: geom_type.iter().filter(|t| t.is_hfield()).count(),
            has_sdf_geom: geom_type.iter().any(|t| t.is_sdf()),
            geom_body: self.geoms.iter().map(|g| g.body).collect(),
            geom_size: self.geoms.iter().map(|g| g.size).collect(),
            geom_type,
            geom_rbound: BatchedArray::shared(rbound),
            geom_margin,
            pair_table,
            contact_pairs: self.pairs,
            nxn_geom_pair,
            opt: self.opt,
            disableflags: self.disableflags,
            ..self.base
        })
    }
}
