//! Runtime flag helpers for checking disable bitfields.
//!
//! Flag constants live in `enums.rs` (pure values with no dependencies).
//! Helpers that take `&Model` live here, keeping concerns separated.

use super::enums::{DISABLE_CONSTRAINT, DISABLE_CONTACT};
use super::model::Model;

/// Disable bits this crate acts on.
const KNOWN_DISABLE_FLAGS: u32 = DISABLE_CONSTRAINT | DISABLE_CONTACT;

/// Returns true if the given disable flag is set on the model.
///
/// `flag` must be one of the `DISABLE_*` constants. Other bits may still be
/// present in `model.disableflags`; they are carried but never queried.
#[inline]
#[must_use]
pub fn disabled(model: &Model, flag: u32) -> bool {
    debug_assert!(
        flag.is_power_of_two() && flag & KNOWN_DISABLE_FLAGS == flag,
        "disabled() called with non-disable flag: {flag:#x}"
    );
    model.disableflags & flag != 0
}

/// Returns true if contact generation is switched off, either directly or
/// through the global constraint switch.
#[inline]
#[must_use]
pub fn contacts_disabled(model: &Model) -> bool {
    disabled(model, DISABLE_CONSTRAINT) || disabled(model, DISABLE_CONTACT)
}
