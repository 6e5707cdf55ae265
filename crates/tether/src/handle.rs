//! The checked handle: a bounds- and liveness-tracked array allocation.
//!
//! A [`Handle`] owns a raw element block plus a reference to a shared
//! liveness cell (checked mode only). Clones are views: they copy the
//! pointer and length but share the cell, so the retire event at
//! release time is observed by every clone. The block itself is
//! reclaimed eagerly at release, which is why it is a raw allocation
//! rather than a `Box` — a `Box` could not be freed while clones still
//! hold it.
//!
//! Validation order on access is bounds first, then liveness; only
//! after both pass does any pointer arithmetic occur.

use std::alloc::{self, Layout};
use std::fmt;
use std::panic::Location;
use std::ptr::{self, NonNull};

use crate::error::HandleError;
#[cfg(not(feature = "unchecked"))]
use crate::liveness::LivenessCell;
use crate::report;

/// A runtime-checked handle to one array allocation.
///
/// Produced by [`Handle::alloc`], accessed through [`Handle::at`] and
/// friends, and released exactly once through [`Handle::free`]. A
/// `Default`-constructed handle is *untracked*: it carries no liveness
/// cell and every access or release on it is treated as a violation,
/// the same as on a retired handle.
///
/// Dropping a handle reclaims nothing — deallocation is explicit, and
/// dropping the last clone of an unreleased handle leaks the block,
/// exactly like the manual-memory code this tool is meant to debug.
/// Only the liveness cell is reference-counted.
///
/// # Aliasing
///
/// Clones alias one block by design, so [`Handle::at`] hands out
/// `&mut T` keyed to `&self`. Holding two live references to the same
/// element is the caller's misuse, as it was in the unchecked code; the
/// handle detects protocol violations (bounds, lifetime), not aliasing.
#[must_use]
pub struct Handle<T> {
    /// Owning pointer to the element block. Dangling for zero-sized
    /// blocks; never dereferenced after the liveness cell retires.
    ptr: NonNull<T>,
    /// Element count, fixed at creation. Sole bound for validation.
    len: usize,
    /// Shared freed-flag. `None` means untracked.
    #[cfg(not(feature = "unchecked"))]
    live: Option<LivenessCell>,
}

impl<T> Handle<T> {
    /// Allocate a block of `len` default-initialised elements.
    ///
    /// Returns [`HandleError::AllocationFailed`] if the layout
    /// overflows or the system allocator is exhausted. A zero-length
    /// request allocates no block; the handle is live and every index
    /// fails the bounds check.
    pub fn try_alloc(len: usize) -> Result<Self, HandleError>
    where
        T: Default,
    {
        let Ok(layout) = Layout::array::<T>(len) else {
            return Err(HandleError::AllocationFailed { requested: len });
        };
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            #[allow(unsafe_code)]
            let raw = unsafe { alloc::alloc(layout) }.cast::<T>();
            match NonNull::new(raw) {
                Some(ptr) => ptr,
                None => return Err(HandleError::AllocationFailed { requested: len }),
            }
        };
        for i in 0..len {
            #[allow(unsafe_code)]
            // In bounds: i < len, and the block was sized for len elements.
            unsafe {
                ptr.as_ptr().add(i).write(T::default());
            }
        }
        Ok(Self {
            ptr,
            len,
            #[cfg(not(feature = "unchecked"))]
            live: Some(LivenessCell::new()),
        })
    }

    /// Allocate a block of `len` default-initialised elements,
    /// reporting allocation failure at the caller's location and
    /// terminating on failure.
    #[track_caller]
    pub fn alloc(len: usize) -> Self
    where
        T: Default,
    {
        match Self::try_alloc(len) {
            Ok(handle) => handle,
            Err(err) => report::fail(Location::caller(), &err),
        }
    }

    /// Mutable access to element `index`.
    ///
    /// Checked mode validates bounds
    /// ([`HandleError::IndexOutOfRange`]) and then liveness
    /// ([`HandleError::UseAfterFree`], also for untracked handles)
    /// before any pointer arithmetic. Under the `unchecked` feature
    /// both checks are compiled out and an invalid index or retired
    /// handle is undefined behavior.
    pub fn try_at(&self, index: usize) -> Result<&mut T, HandleError> {
        #[cfg(not(feature = "unchecked"))]
        {
            if index >= self.len {
                return Err(HandleError::IndexOutOfRange {
                    index,
                    len: self.len,
                });
            }
            match &self.live {
                Some(cell) if cell.is_live() => {}
                _ => return Err(HandleError::UseAfterFree),
            }
        }
        // Bounds and liveness hold (checked mode), or the caller
        // guarantees them (fast mode).
        #[allow(unsafe_code)]
        let elem = unsafe { &mut *self.ptr.as_ptr().add(index) };
        Ok(elem)
    }

    /// Mutable access to element `index`, reporting a violation at the
    /// caller's location and terminating on failure.
    #[track_caller]
    pub fn at(&self, index: usize) -> &mut T {
        match self.try_at(index) {
            Ok(elem) => elem,
            Err(err) => report::fail(Location::caller(), &err),
        }
    }

    /// Read element `index` by clone. Same validation as [`Handle::try_at`].
    pub fn get(&self, index: usize) -> Result<T, HandleError>
    where
        T: Clone,
    {
        self.try_at(index).map(|elem| elem.clone())
    }

    /// Overwrite element `index`. Same validation as [`Handle::try_at`].
    pub fn set(&self, index: usize, value: T) -> Result<(), HandleError> {
        *self.try_at(index)? = value;
        Ok(())
    }

    /// Release the allocation: retire every clone, drop the elements,
    /// and return the block to the system allocator.
    ///
    /// Returns [`HandleError::DoubleFree`] if the handle is already
    /// retired or untracked; nothing is reclaimed in that case. Under
    /// the `unchecked` feature the check is compiled out and releasing
    /// twice is undefined behavior.
    pub fn try_free(&self) -> Result<(), HandleError> {
        #[cfg(not(feature = "unchecked"))]
        match &self.live {
            Some(cell) if cell.is_live() => cell.retire(),
            _ => return Err(HandleError::DoubleFree),
        }
        if self.len > 0 {
            #[allow(unsafe_code)]
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
                let layout = Layout::array::<T>(self.len)
                    .expect("layout was validated at allocation");
                if layout.size() > 0 {
                    alloc::dealloc(self.ptr.as_ptr().cast(), layout);
                }
            }
        }
        Ok(())
    }

    /// Release the allocation, reporting a double free at the caller's
    /// location and terminating on failure.
    #[track_caller]
    pub fn free(&self) {
        if let Err(err) = self.try_free() {
            report::fail(Location::caller(), &err);
        }
    }

    /// Element count the block was sized for.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the handle holds zero elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the allocation is still live.
    ///
    /// Untracked handles report `false`. Always `true` under the
    /// `unchecked` feature, where no liveness is recorded.
    pub fn is_live(&self) -> bool {
        #[cfg(not(feature = "unchecked"))]
        {
            matches!(&self.live, Some(cell) if cell.is_live())
        }
        #[cfg(feature = "unchecked")]
        {
            true
        }
    }

    #[cfg(not(feature = "unchecked"))]
    fn state_name(&self) -> &'static str {
        match &self.live {
            None => "untracked",
            Some(cell) if cell.is_live() => "live",
            Some(_) => "retired",
        }
    }
}

impl<T> Clone for Handle<T> {
    /// A clone is a view of the same allocation: pointer and length are
    /// copied, the liveness cell is shared by reference.
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr,
            len: self.len,
            #[cfg(not(feature = "unchecked"))]
            live: self.live.clone(),
        }
    }
}

impl<T> Default for Handle<T> {
    /// The untracked handle: no block, no liveness cell.
    ///
    /// Conservatively equivalent to an already-retired handle: release
    /// fails as double free, and access fails too — at the bounds
    /// layer, since there are no elements to index. This is the state
    /// of matrix slots before rows are installed.
    fn default() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            #[cfg(not(feature = "unchecked"))]
            live: None,
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(not(feature = "unchecked"))]
        {
            write!(f, "Handle(len={}, {})", self.len, self.state_name())
        }
        #[cfg(feature = "unchecked")]
        {
            write!(f, "Handle(len={})", self.len)
        }
    }
}
