//! Jagged two-dimensional storage as a handle of handles.
//!
//! A matrix is an outer [`Handle`] whose elements are themselves
//! handles, each row independently allocated and independently
//! bounds-tracked. Nothing here is a new primitive: two-dimensional
//! access is the one-dimensional access applied twice, so both
//! validation layers fire independently and in order — an out-of-range
//! row is reported before the column is ever evaluated, and a
//! use-after-free on the outer handle or on one row is detected at the
//! layer where it occurs. Row lengths need not be equal.

use std::panic::Location;

use smallvec::SmallVec;

use crate::error::HandleError;
use crate::handle::Handle;
use crate::report;

/// Allocate a matrix with the given row lengths.
///
/// Each entry of `rows` becomes one independently allocated row. On
/// failure, rows staged so far are released before the error is
/// returned.
pub fn try_alloc_matrix<T: Default>(rows: &[usize]) -> Result<Handle<Handle<T>>, HandleError> {
    let mut staged: SmallVec<[Handle<T>; 8]> = SmallVec::with_capacity(rows.len());
    for &cols in rows {
        match Handle::try_alloc(cols) {
            Ok(row) => staged.push(row),
            Err(err) => {
                release_staged(&staged);
                return Err(err);
            }
        }
    }
    let outer = match Handle::try_alloc(rows.len()) {
        Ok(outer) => outer,
        Err(err) => {
            release_staged(&staged);
            return Err(err);
        }
    };
    for (i, row) in staged.into_iter().enumerate() {
        // Slots start out as untracked handles; installing a row
        // replaces the placeholder.
        *outer.try_at(i)? = row;
    }
    Ok(outer)
}

/// Allocate a matrix with the given row lengths, reporting allocation
/// failure at the caller's location and terminating on failure.
#[track_caller]
pub fn alloc_matrix<T: Default>(rows: &[usize]) -> Handle<Handle<T>> {
    match try_alloc_matrix(rows) {
        Ok(outer) => outer,
        Err(err) => report::fail(Location::caller(), &err),
    }
}

/// Mutable access to element `(i, j)`: row `i` of the outer handle,
/// then column `j` of that row.
pub fn try_at2<T>(matrix: &Handle<Handle<T>>, i: usize, j: usize) -> Result<&mut T, HandleError> {
    matrix.try_at(i)?.try_at(j)
}

/// Mutable access to element `(i, j)`, reporting a violation at the
/// caller's location and terminating on failure.
#[track_caller]
pub fn at2<T>(matrix: &Handle<Handle<T>>, i: usize, j: usize) -> &mut T {
    match try_at2(matrix, i, j) {
        Ok(elem) => elem,
        Err(err) => report::fail(Location::caller(), &err),
    }
}

/// Release every row, then the outer handle.
///
/// Fails with [`HandleError::DoubleFree`] if the outer handle is
/// already retired or untracked, and with the row's error if any row
/// is already retired; in the latter case rows before it stay released
/// and rows after it stay live.
pub fn try_free_matrix<T>(matrix: &Handle<Handle<T>>) -> Result<(), HandleError> {
    #[cfg(not(feature = "unchecked"))]
    if !matrix.is_live() {
        return Err(HandleError::DoubleFree);
    }
    for i in 0..matrix.len() {
        matrix.try_at(i)?.try_free()?;
    }
    matrix.try_free()
}

/// Release every row, then the outer handle, reporting a violation at
/// the caller's location and terminating on failure.
#[track_caller]
pub fn free_matrix<T>(matrix: &Handle<Handle<T>>) {
    if let Err(err) = try_free_matrix(matrix) {
        report::fail(Location::caller(), &err);
    }
}

fn release_staged<T>(staged: &[Handle<T>]) {
    for row in staged {
        // Rows were freshly allocated, so release cannot fail here.
        let _ = row.try_free();
    }
}
