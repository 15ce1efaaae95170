#![no_std]
//! Knot sequences for B-spline and NURBS curves.
//!
//! A knot sequence decides where a B-spline basis starts and ends, how
//! continuous it is at every knot and which span a parameter falls into.
//! This crate owns that structure: it validates a sequence when it is
//! built, keeps its derived flags current and hands out new, revalidated
//! sequences from every mutation.
//!
//! Four flavors are provided, all of them aliases of the generic
//! [`KnotSequence`]:
//!
//! | Flavor | Index space | Curve |
//! |---|---|---|
//! | [`IncreasingOpenKnotSequence`] | [`ExpandedIndex`] | open, or closed through wrap-around knots |
//! | [`IncreasingPeriodicKnotSequence`] | [`ExpandedIndex`] | closed, one period |
//! | [`StrictlyIncreasingOpenKnotSequence`] | [`CompactIndex`] | open, or closed through wrap-around knots |
//! | [`StrictlyIncreasingPeriodicKnotSequence`] | [`CompactIndex`] | closed, one period |
//!
//! *Increasing* flavors address every knot occurrence; *strictly
//! increasing* flavors address each distinct abscissa once.
//!
//! # Examples
//! ```
//! use knot_sequences::{IncreasingOpenKnotSequence, KnotSequenceConfig};
//!
//! let knots = [0.0, 0.0, 0.0, 0.0, 0.5, 0.6, 0.7, 0.7, 1.0, 1.0, 1.0, 1.0];
//! let sequence = IncreasingOpenKnotSequence::<f64>::new(
//!     4,
//!     KnotSequenceConfig::IncreasingKnots { knots: &knots },
//! )
//! .unwrap();
//!
//! let refined = sequence.insert_knot(0.3, 3).unwrap();
//! assert_eq!(refined.multiplicities(), vec![4, 3, 1, 1, 2, 4]);
//! // The receiver is left untouched.
//! assert_eq!(sequence.multiplicities(), vec![4, 1, 1, 2, 4]);
//! ```
//!
//! # Features
#![doc = document_features::document_features!()]

extern crate alloc;

use core::fmt::Debug;
use lerp::Lerp;
use num_traits::{Float, FromPrimitive};

mod config;
pub mod convert;
mod error;
mod flavor;
mod index;
mod knot;
pub mod normalized_basis;
mod sequence;
mod warning;

pub use config::*;
pub use error::*;
pub use flavor::*;
pub use index::*;
pub use knot::*;
pub use normalized_basis::{
    BasisBound, NormalizedBasisBounds, NormalizedBasisStatus,
};
pub use sequence::*;
pub use warning::*;

/// Two abscissae closer than this are the same knot.
pub const KNOT_COINCIDENCE_TOLERANCE: f64 = 1.0e-10;

/// Reserved abscissa value marking an uninitialized knot.
///
/// With the `sentinel_check` feature enabled, knots placed exactly at
/// this value are rejected even though it may be a legitimate position.
pub const UNINITIALIZED_ABSCISSA: f64 = -1.0e5;

/// Abscissa of the normalized-basis origin of every open knot sequence.
pub const OPEN_KNOT_SEQUENCE_ORIGIN: f64 = 0.0;

/// Scalar types usable as knot abscissae.
///
/// Implemented for every type meeting the bounds, i.e. `f32` and `f64`.
pub trait Abscissa: Float + FromPrimitive + Debug + Lerp<Self> {
    /// [`KNOT_COINCIDENCE_TOLERANCE`] in this scalar type.
    fn coincidence_tolerance() -> Self {
        Self::from_f64(KNOT_COINCIDENCE_TOLERANCE)
            .unwrap_or_else(Self::epsilon)
    }

    /// Converts a knot count or position to an abscissa.
    fn from_count(count: usize) -> Self {
        Self::from_usize(count).unwrap_or_else(Self::max_value)
    }

    /// Lossy conversion used for error reporting.
    fn to_report(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// Returns `true` if `self` and `other` are the same knot position.
    #[inline]
    fn coincides_with(self, other: Self) -> bool {
        (self - other).abs() <= Self::coincidence_tolerance()
    }
}

impl<T> Abscissa for T where T: Float + FromPrimitive + Debug + Lerp<T> {}
