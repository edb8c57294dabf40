//! Explicit contact pairs.
//!
//! A [`ContactPair`] is a `<pair>`-style override: the two geoms are always
//! tested (affinity is ignored) and narrow phase uses the per-pair
//! parameters instead of mixing the per-geom ones. The broad phase only
//! forwards the pair id; the parameters are consumed downstream.

/// Default solver reference `[timeconst, dampratio]`.
pub const DEFAULT_SOLREF: [f64; 2] = [0.02, 1.0];

/// Default solver impedance `[d0, dwidth, width, midpoint, power]`.
pub const DEFAULT_SOLIMP: [f64; 5] = [0.9, 0.95, 0.001, 0.5, 2.0];

/// Explicit contact pair: geom indices + per-pair overrides.
/// All fields are fully resolved at build time (no Options).
#[derive(Debug, Clone, PartialEq)]
pub struct ContactPair {
    /// First geometry index.
    pub geom1: usize,
    /// Second geometry index.
    pub geom2: usize,
    /// Contact dimensionality (1, 3, 4, 6).
    pub condim: i32,
    /// 5-element friction: [tan1, tan2, torsional, roll1, roll2].
    pub friction: [f64; 5],
    /// Solver reference (normal direction).
    pub solref: [f64; 2],
    /// Solver impedance.
    pub solimp: [f64; 5],
    /// Distance threshold for contact activation.
    pub margin: f64,
    /// Contact included if distance < margin - gap.
    pub gap: f64,
}

impl ContactPair {
    /// Pair between two geoms with default parameters.
    #[must_use]
    pub fn new(geom1: usize, geom2: usize) -> Self {
        Self {
            geom1,
            geom2,
            condim: 3,
            friction: [1.0, 1.0, 0.005, 0.0001, 0.0001],
            solref: DEFAULT_SOLREF,
            solimp: DEFAULT_SOLIMP,
            margin: 0.0,
            gap: 0.0,
        }
    }

    /// Set the activation margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the gap.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the contact dimensionality.
    #[must_use]
    pub fn with_condim(mut self, condim: i32) -> Self {
        self.condim = condim;
        self
    }

    /// Geom indices ordered `(min, max)`.
    #[must_use]
    pub fn ordered(&self) -> (usize, usize) {
        (self.geom1.min(self.geom2), self.geom1.max(self.geom2))
    }
}
