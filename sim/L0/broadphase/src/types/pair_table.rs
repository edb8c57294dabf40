//! Static pair-compatibility table.
//!
//! For `n` geoms the table holds one entry per unordered pair `(i, j)`,
//! `i < j`, flattened row by row into `n * (n - 1) / 2` slots:
//!
//! ```text
//!        j=1  j=2  j=3
//! i=0  [  0    1    2 ]
//! i=1  [       3    4 ]
//! i=2  [            5 ]
//! ```
//!
//! Built once by the model builder and shared read-only by every world.

/// Compatibility of one geom pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairCompat {
    /// Never tested.
    Excluded,
    /// Tested through the bounding-sphere filter with per-geom parameters.
    #[default]
    Default,
    /// Explicit pair; the payload indexes `Model::contact_pairs`.
    Custom(usize),
}

impl PairCompat {
    /// Whether the pair may ever produce a candidate.
    #[must_use]
    pub const fn is_admissible(self) -> bool {
        !matches!(self, Self::Excluded)
    }

    /// Custom pair id carried into the candidate, if any.
    #[must_use]
    pub const fn pair_id(self) -> Option<usize> {
        match self {
            Self::Custom(id) => Some(id),
            _ => None,
        }
    }
}

/// Flat index of the unordered pair `(i, j)` with `i < j < n`.
#[inline]
#[must_use]
pub const fn upper_tri_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    (n * (n - 1) - (n - i) * (n - i - 1)) / 2 + j - i - 1
}

/// Number of unordered pairs among `n` items.
#[inline]
#[must_use]
pub const fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Flattened strictly-upper-triangular table over geom pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PairTable {
    ngeom: usize,
    entries: Vec<PairCompat>,
}

impl PairTable {
    /// Table with every pair set to `fill`.
    #[must_use]
    pub fn new(ngeom: usize, fill: PairCompat) -> Self {
        Self {
            ngeom,
            entries: vec![fill; pair_count(ngeom)],
        }
    }

    /// Number of geoms covered.
    #[must_use]
    pub fn ngeom(&self) -> usize {
        self.ngeom
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries (fewer than two geoms).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for the pair `(a, b)`, in either order.
    ///
    /// A geom paired with itself is always excluded.
    #[inline]
    #[must_use]
    pub fn get(&self, a: usize, b: usize) -> PairCompat {
        if a == b {
            return PairCompat::Excluded;
        }
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        self.entries[upper_tri_index(self.ngeom, i, j)]
    }

    /// Entry at a flat index.
    #[inline]
    #[must_use]
    pub fn at(&self, index: usize) -> PairCompat {
        self.entries[index]
    }

    /// Overwrite the entry for `(a, b)`, in either order. Ignored for `a == b`.
    pub fn set(&mut self, a: usize, b: usize, value: PairCompat) {
        if a == b {
            return;
        }
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        let idx = upper_tri_index(self.ngeom, i, j);
        self.entries[idx] = value;
    }

    /// Admissible pairs in flat-index order, for the brute-force broad phase.
    #[must_use]
    pub fn admissible_pairs(&self) -> Vec<NxnPair> {
        let n = self.ngeom;
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let table_index = upper_tri_index(n, i, j);
                if self.entries[table_index].is_admissible() {
                    pairs.push(NxnPair {
                        geom1: i,
                        geom2: j,
                        table_index,
                    });
                }
            }
        }
        pairs
    }
}

/// One admissible entry of the brute-force pair list (`geom1 < geom2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NxnPair {
    /// Lower geom id.
    pub geom1: usize,
    /// Higher geom id.
    pub geom2: usize,
    /// Flat index into the [`PairTable`].
    pub table_index: usize,
}
