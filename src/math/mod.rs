//! Reentrant numerical kernels.
//!
//! Everything here is free of shared mutable state so the spectral evaluations
//! can run concurrently over the (frequency, mode) grid.

pub mod brent;
pub mod interp;
pub mod quad;

pub use brent::{BrentParams, RootFindError, brent_root};
pub use interp::{LinearInterp, LogLogInterp, log_space};
pub use quad::{adaptive_simpson, trapezoid};
