//! Numeric limits shared by the broad phase.

/// Largest representable extent (matches MuJoCo's `mjMAXVAL`).
///
/// Infinite planes are projected with this half-width so that they overlap
/// every other interval on the sweep axis.
pub const MAX_VAL: f64 = 1e10;

/// Returns true if value is NaN, +inf, -inf, or exceeds `MAX_VAL`.
#[inline]
#[must_use]
pub fn is_bad(x: f64) -> bool {
    // NaN fails range checks silently, so it is tested explicitly.
    #[allow(clippy::manual_range_contains)]
    {
        x.is_nan() || x > MAX_VAL || x < -MAX_VAL
    }
}
