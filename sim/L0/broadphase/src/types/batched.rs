//! Per-world batched model parameters.
//!
//! A [`BatchedArray`] stores one row per world. When a model carries fewer
//! rows than the data has worlds, rows are broadcast: world `w` reads row
//! `w % nrow`. A model with a single row therefore shares its values across
//! every world, while randomized-domain setups give each world its own row.

/// Row-major table of per-world values, broadcast across worlds.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchedArray<T> {
    values: Vec<T>,
    ncol: usize,
}

impl<T: Clone> BatchedArray<T> {
    /// A single row shared by every world.
    #[must_use]
    pub fn shared(row: Vec<T>) -> Self {
        let ncol = row.len();
        Self { values: row, ncol }
    }

    /// Append a row, returning its index.
    ///
    /// Returns `None` if the row length does not match the column count.
    pub fn push_row(&mut self, row: &[T]) -> Option<usize> {
        if row.len() != self.ncol {
            return None;
        }
        self.values.extend_from_slice(row);
        Some(self.nrow() - 1)
    }
}

impl<T> BatchedArray<T> {
    /// Number of columns (one per geom).
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Number of stored rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        if self.ncol == 0 {
            1
        } else {
            self.values.len() / self.ncol
        }
    }

    /// The row seen by `world`.
    #[inline]
    #[must_use]
    pub fn row(&self, world: usize) -> &[T] {
        if self.ncol == 0 {
            return &[];
        }
        let r = world % self.nrow();
        &self.values[r * self.ncol..(r + 1) * self.ncol]
    }

    /// Mutable access to a stored row (no broadcasting).
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [T]> {
        let ncol = self.ncol;
        self.values.get_mut(row * ncol..(row + 1) * ncol)
    }
}

impl<T: Copy> BatchedArray<T> {
    /// Value for `(world, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, world: usize, col: usize) -> T {
        self.row(world)[col]
    }
}

impl<T> Default for BatchedArray<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            ncol: 0,
        }
    }
}
