//! The shared freed-flag cell.
//!
//! One `LivenessCell` exists per logical allocation. Handle clones hold
//! it by reference (`Rc`), never by value, so the single retire event
//! is observable through every clone. The cell's own storage is
//! reclaimed by the reference count when the last clone drops.

use std::cell::Cell;
use std::rc::Rc;

/// Shared liveness record for one allocation.
///
/// Transitions exactly once, from live to retired, at release time.
#[derive(Clone, Debug)]
pub(crate) struct LivenessCell(Rc<Cell<bool>>);

impl LivenessCell {
    /// A fresh cell in the live state.
    pub(crate) fn new() -> Self {
        Self(Rc::new(Cell::new(false)))
    }

    /// Whether the allocation is still live.
    pub(crate) fn is_live(&self) -> bool {
        !self.0.get()
    }

    /// Mark the allocation retired. Visible through every clone.
    pub(crate) fn retire(&self) {
        self.0.set(true);
    }
}
