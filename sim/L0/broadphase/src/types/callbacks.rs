//! Collaborator hooks invoked by the collision dispatcher.
//!
//! Narrow phase and height-field midphase live outside this crate. They are
//! plugged into the [`Model`] as per-model, thread-safe callbacks:
//!
//! - `Arc<dyn Fn>` keeps `#[derive(Clone)]` on Model
//! - `Send + Sync` bounds allow one model to drive many batched worlds
//! - `Option<Callback<...>>` means an absent stage costs one branch

use std::fmt;
use std::sync::Arc;

use super::data::Data;
use super::model::Model;

/// Thread-safe callback wrapper that implements Debug.
///
/// Wraps `Arc<dyn Fn(...) + Send + Sync>` and provides a Debug impl
/// (since `dyn Fn` doesn't implement Debug).
pub struct Callback<F: ?Sized>(pub Arc<F>);

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(<fn>)")
    }
}

/// Collision stage callback: reads the candidate buffer in `data.collision`
/// and appends to `data.ncon` / `data.ncon_hfield`.
pub type CbCollisionStage = Callback<dyn Fn(&Model, &mut Data) + Send + Sync>;

impl CbCollisionStage {
    /// Wrap a closure as a collision stage callback.
    pub fn new(f: impl Fn(&Model, &mut Data) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the callback.
    #[inline]
    pub fn call(&self, model: &Model, data: &mut Data) {
        (self.0)(model, data);
    }
}
