//! Candidate buffer and pair emission.
//!
//! The buffer is the only state shared across worlds during the broad
//! phase. Slots are reserved with a single `fetch_add` on the cursor; a
//! reservation past capacity writes nothing, but the cursor keeps counting
//! so the true number of candidates stays observable.

use std::sync::atomic::{AtomicI32, AtomicIsize, AtomicUsize, Ordering};

use crate::types::Model;

/// Height-field triangle sentinel: expand to every triangle under the
/// other geom. Resolved by the midphase collaborator.
pub const HFTRI_EXPAND: i32 = -1;

/// One broad-phase candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionCandidate {
    /// Geom ids in canonical order (`type(geom[0]) <= type(geom[1])`).
    pub geom: [usize; 2],
    /// Explicit pair id, or `None` for a default pair.
    pub pairid: Option<usize>,
    /// World the pair belongs to.
    pub worldid: usize,
    /// [`HFTRI_EXPAND`] for height-field pairs, `0` otherwise.
    pub hftri_index: i32,
}

#[derive(Debug, Default)]
struct CandidateSlot {
    geom: [AtomicUsize; 2],
    worldid: AtomicUsize,
    // -1 = default pair
    pairid: AtomicIsize,
    hftri_index: AtomicI32,
}

impl CandidateSlot {
    fn store(&self, c: &CollisionCandidate) {
        self.geom[0].store(c.geom[0], Ordering::Relaxed);
        self.geom[1].store(c.geom[1], Ordering::Relaxed);
        self.worldid.store(c.worldid, Ordering::Relaxed);
        let pairid = c
            .pairid
            .and_then(|id| isize::try_from(id).ok())
            .unwrap_or(-1);
        self.pairid.store(pairid, Ordering::Relaxed);
        self.hftri_index.store(c.hftri_index, Ordering::Relaxed);
    }

    fn load(&self) -> CollisionCandidate {
        let pairid = self.pairid.load(Ordering::Relaxed);
        CollisionCandidate {
            geom: [
                self.geom[0].load(Ordering::Relaxed),
                self.geom[1].load(Ordering::Relaxed),
            ],
            pairid: usize::try_from(pairid).ok(),
            worldid: self.worldid.load(Ordering::Relaxed),
            hftri_index: self.hftri_index.load(Ordering::Relaxed),
        }
    }

    fn clear(&mut self) {
        *self.geom[0].get_mut() = 0;
        *self.geom[1].get_mut() = 0;
        *self.worldid.get_mut() = 0;
        *self.pairid.get_mut() = -1;
        *self.hftri_index.get_mut() = 0;
    }
}

/// Fixed-capacity, lock-free candidate buffer shared by all worlds.
///
/// Writers only need `&self`. Readers see a consistent buffer once every
/// writer has joined (the end of a parallel stage).
#[derive(Debug)]
pub struct CollisionBuffer {
    slots: Vec<CandidateSlot>,
    cursor: AtomicUsize,
}

impl CollisionBuffer {
    /// Empty buffer with room for `capacity` candidates.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || {
            let slot = CandidateSlot::default();
            slot.pairid.store(-1, Ordering::Relaxed);
            slot
        });
        Self {
            slots,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Maximum number of stored candidates.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Raw reservation count. Exceeds [`capacity`](Self::capacity) after
    /// overflow.
    #[must_use]
    pub fn ncollision(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Number of stored candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ncollision().min(self.capacity())
    }

    /// Whether no candidate is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether some reservations were dropped.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.ncollision() > self.capacity()
    }

    /// Reserve a slot and write `candidate` into it.
    ///
    /// Returns the slot index, or `None` if the buffer is full. Never blocks.
    pub fn push(&self, candidate: CollisionCandidate) -> Option<usize> {
        let slot = self.cursor.fetch_add(1, Ordering::AcqRel);
        let target = self.slots.get(slot)?;
        target.store(&candidate);
        Some(slot)
    }

    /// Candidate stored at `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<CollisionCandidate> {
        if slot >= self.len() {
            return None;
        }
        self.slots.get(slot).map(CandidateSlot::load)
    }

    /// All stored candidates, in slot order (which is unspecified).
    #[must_use]
    pub fn candidates(&self) -> Vec<CollisionCandidate> {
        self.slots[..self.len()]
            .iter()
            .map(CandidateSlot::load)
            .collect()
    }

    /// Overwrite the height-field triangle of a stored candidate.
    ///
    /// Used by the midphase collaborator when it resolves the sentinel.
    /// Returns `false` if `slot` holds no candidate.
    pub fn set_hftri_index(&self, slot: usize, hftri_index: i32) -> bool {
        if slot >= self.len() {
            return false;
        }
        self.slots[slot]
            .hftri_index
            .store(hftri_index, Ordering::Relaxed);
        true
    }

    /// Zero the cursor and every slot.
    pub fn reset(&mut self) {
        *self.cursor.get_mut() = 0;
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    pub(crate) fn snapshot(&self) -> Self {
        let copy = Self::new(self.capacity());
        for (dst, src) in copy.slots.iter().zip(&self.slots) {
            dst.store(&src.load());
        }
        copy.cursor.store(self.ncollision(), Ordering::Release);
        copy
    }
}

/// Emit the pair `(g1, g2)` of `world` into `buffer`.
///
/// The pair is written in canonical order: lower geom type first, ties
/// broken by geom id. Height-field pairs carry [`HFTRI_EXPAND`].
pub fn emit_pair(
    model: &Model,
    buffer: &CollisionBuffer,
    g1: usize,
    g2: usize,
    world: usize,
    pairid: Option<usize>,
) -> Option<usize> {
    let (t1, t2) = (model.geom_type[g1], model.geom_type[g2]);
    let geom = if (t1, g1) > (t2, g2) { [g2, g1] } else { [g1, g2] };
    let hftri_index = if t1.is_hfield() || t2.is_hfield() {
        HFTRI_EXPAND
    } else {
        0
    };

    buffer.push(CollisionCandidate {
        geom,
        pairid,
        worldid: world,
        hftri_index,
    })
}
