//! Fail-fast diagnostic reporting.
//!
//! A detected violation is never continued past: the bare operation
//! surface routes its error here, which prints one located line to
//! stderr and terminates the process with a non-zero status. Rendering
//! is split from termination so the line format stays testable.

use std::panic::Location;
use std::process;

use crate::error::HandleError;

/// Render the diagnostic line for a violation at the given call site.
pub(crate) fn render(file: &str, line: u32, err: &HandleError) -> String {
    format!("{file}:{line} error: {err}")
}

/// Report a violation at the caller's location and terminate.
pub(crate) fn fail(location: &Location<'_>, err: &HandleError) -> ! {
    eprintln!("{}", render(location.file(), location.line(), err));
    process::exit(1);
}
