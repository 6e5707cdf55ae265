//! Benchmark profiles and helpers for the tether checked-handle library.
//!
//! Provides pre-built handles and matrices sized for the benches:
//!
//! - [`make_handle_16k`]: one flat 16K-element handle
//! - [`make_square_matrix`]: an n × n matrix of `f32`
//! - [`make_jagged_matrix`]: rows of alternating short/long lengths
//!
//! Run the default build for checked-mode numbers and
//! `--features unchecked` for the fast-mode baseline; both modes go
//! through the same API, so the difference is the validation cost.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tether::Handle;

/// Element count for the flat access benchmarks.
pub const FLAT_LEN: usize = 16 * 1024;

/// Build one flat 16K-element handle of `f32`.
pub fn make_handle_16k() -> Handle<f32> {
    Handle::alloc(FLAT_LEN)
}

/// Build an `n` × `n` matrix of `f32`.
pub fn make_square_matrix(n: usize) -> Handle<Handle<f32>> {
    tether::alloc_matrix(&vec![n; n])
}

/// Build a jagged matrix with `rows` rows alternating between 4 and
/// 256 columns, the shape that defeats any per-row cache assumption.
pub fn make_jagged_matrix(rows: usize) -> Handle<Handle<f32>> {
    let lengths: Vec<usize> = (0..rows).map(|r| if r % 2 == 0 { 4 } else { 256 }).collect();
    tether::alloc_matrix(&lengths)
}
