//! Integration test: the full misuse-detection protocol end to end.
//!
//! Drives a handle through alloc → write → read → free and verifies
//! that every protocol violation afterwards is detected through every
//! clone. Also verifies with a drop-counting element type that release
//! drops each element exactly once and that dropping handles without
//! releasing drops nothing.

#![cfg(not(feature = "unchecked"))]

use std::cell::Cell;
use std::rc::Rc;

use tether::{Handle, HandleError};

#[test]
fn protocol_violations_are_detected_through_clones() {
    let h: Handle<i32> = Handle::alloc(10);
    let copy = h.clone();

    *h.at(5) = 42;
    assert_eq!(*copy.at(5), 42);

    copy.free();

    assert_eq!(h.try_at(5).unwrap_err(), HandleError::UseAfterFree);
    assert_eq!(h.try_free().unwrap_err(), HandleError::DoubleFree);
    assert_eq!(copy.try_at(5).unwrap_err(), HandleError::UseAfterFree);
    assert_eq!(copy.try_free().unwrap_err(), HandleError::DoubleFree);
}

/// Element type that counts how many of its instances were dropped.
#[derive(Clone)]
struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl Default for DropCounter {
    fn default() -> Self {
        Self {
            drops: Rc::new(Cell::new(0)),
        }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn release_drops_every_element_exactly_once() {
    let counter = Rc::new(Cell::new(0usize));
    let h: Handle<DropCounter> = Handle::alloc(5);
    for i in 0..5 {
        // Replace the default element with one wired to our counter.
        // The replaced default drops here, against its own counter.
        *h.at(i) = DropCounter {
            drops: Rc::clone(&counter),
        };
    }
    assert_eq!(counter.get(), 0);
    h.free();
    assert_eq!(counter.get(), 5);
}

#[test]
fn dropping_handles_without_release_reclaims_nothing() {
    let counter = Rc::new(Cell::new(0usize));
    {
        let h: Handle<DropCounter> = Handle::alloc(3);
        for i in 0..3 {
            *h.at(i) = DropCounter {
                drops: Rc::clone(&counter),
            };
        }
        let _clone = h.clone();
        // Both handles go out of scope unreleased.
    }
    // Deallocation is explicit by contract: nothing was dropped.
    assert_eq!(counter.get(), 0);
}

#[test]
fn matrix_scenario_with_jagged_rows() {
    let m: Handle<Handle<i32>> = tether::alloc_matrix(&[3, 1, 5]);

    *tether::at2(&m, 0, 2) = 1;
    *tether::at2(&m, 1, 0) = 2;
    *tether::at2(&m, 2, 4) = 3;
    assert_eq!(*tether::at2(&m, 2, 4), 3);

    assert_eq!(
        tether::try_at2(&m, 1, 1).unwrap_err(),
        HandleError::IndexOutOfRange { index: 1, len: 1 }
    );
    assert_eq!(
        tether::try_at2(&m, 3, 0).unwrap_err(),
        HandleError::IndexOutOfRange { index: 3, len: 3 }
    );

    tether::free_matrix(&m);
    assert_eq!(tether::try_at2(&m, 0, 0).unwrap_err(), HandleError::UseAfterFree);
    assert_eq!(tether::try_free_matrix(&m).unwrap_err(), HandleError::DoubleFree);
}
