//! Runtime-checked handles for manually managed array allocations.
//!
//! Tether is a debugging aid for code that manages array storage by
//! hand: every allocation is wrapped in a [`Handle`] that validates
//! bounds and liveness on each access, converting silent memory
//! corruption into an immediate, located, fatal report. Deallocation
//! stays explicit and caller-driven — there is no reference counting of
//! the element block and no automatic destruction. The library's only
//! job is to detect misuse of the protocol "no access before creation,
//! no access after release, no release twice".
//!
//! # Architecture
//!
//! ```text
//! Handle<T> (clone) ──┬──▶ element block [T; len]      (freed eagerly at release)
//! Handle<T> (clone) ──┤
//! Handle<T> (clone) ──┴──▶ LivenessCell (Rc<Cell<bool>>, shared by reference)
//! ```
//!
//! Clones of a handle are views of one allocation. The liveness cell is
//! shared by reference across all of them, so releasing the allocation
//! through any clone retires every clone at once: subsequent access
//! fails as use-after-free and subsequent release as double-free,
//! regardless of which clone is used.
//!
//! Every operation has two forms. The `try_*` form returns
//! `Result<_, HandleError>` and never aborts. The bare form is the
//! default fail-fast surface: on a detected violation it writes
//! `<file>:<line> error: <message>` to stderr (the caller's source
//! location) and terminates the process with a non-zero status.
//!
//! # Checked and fast modes
//!
//! By default every access is validated. Building with the `unchecked`
//! feature compiles the liveness cell and all validation out, leaving a
//! plain (pointer, count) pair with raw pointer arithmetic — production
//! performance parity with hand-written unchecked code. Fast mode is a
//! strict behavioral subset: valid sequences behave identically, and
//! misuse is undefined behavior exactly as in the unchecked code this
//! tool exists to debug.
//!
//! # Single-threaded by construction
//!
//! The design assumes one sequential thread of control. The liveness
//! cell is `Rc<Cell<bool>>`, not an atomic, so `Handle` is neither
//! `Send` nor `Sync` and the assumption is enforced by the compiler
//! rather than by documentation.
//!
//! # Quick start
//!
//! ```rust
//! use tether::Handle;
//!
//! let h: Handle<i32> = Handle::alloc(10);
//! *h.at(5) = 42;
//! assert_eq!(*h.at(5), 42);
//! h.free();
//! // Any further h.at(..) or h.free() is reported and fatal.
//! ```
//!
//! This crate contains bounded `unsafe` code: the element block is a
//! raw allocation so that release can reclaim it eagerly while clones
//! of the handle still exist. All pointer arithmetic happens after
//! validation in checked mode.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod handle;
#[cfg(not(feature = "unchecked"))]
mod liveness;
pub mod matrix;
mod report;

// Public re-exports for the primary API surface.
pub use error::HandleError;
pub use handle::Handle;
pub use matrix::{alloc_matrix, at2, free_matrix, try_alloc_matrix, try_at2, try_free_matrix};
