//! The two index spaces over a knot sequence.
//!
//! An [`ExpandedIndex`] addresses one knot occurrence in the flattened,
//! multiplicity-repeated sequence. A [`CompactIndex`] addresses one
//! distinct abscissa. The newtypes keep the two from being mixed up.

use crate::{Knot, KnotResult, KnotSequenceError};
use core::fmt;

macro_rules! knot_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(index: $name) -> Self {
                index.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

knot_index!(
    /// Index of one knot occurrence, in `[0, total occurrences)`.
    ExpandedIndex
);

knot_index!(
    /// Index of one distinct knot, in `[0, distinct knot count)`.
    CompactIndex
);

/// Total number of knot occurrences.
pub(crate) fn occurrence_count<T: Copy>(knots: &[Knot<T>]) -> usize {
    knots.iter().map(|knot| knot.multiplicity()).sum()
}

/// Sum of the multiplicities of `knots[..=compact]`.
pub(crate) fn cumulative_multiplicity<T: Copy>(
    knots: &[Knot<T>],
    compact: usize,
) -> usize {
    knots[..=compact].iter().map(|knot| knot.multiplicity()).sum()
}

/// Expanded index of the first occurrence of knot `compact`.
pub(crate) fn first_occurrence<T: Copy>(
    knots: &[Knot<T>],
    compact: usize,
) -> usize {
    knots[..compact].iter().map(|knot| knot.multiplicity()).sum()
}

/// The distinct knot holding occurrence `expanded`.
pub(crate) fn compact_of<T: Copy>(
    knots: &[Knot<T>],
    expanded: usize,
) -> KnotResult<usize> {
    let mut cumulative = 0;
    for (compact, knot) in knots.iter().enumerate() {
        cumulative += knot.multiplicity();
        if expanded < cumulative {
            return Ok(compact);
        }
    }
    Err(KnotSequenceError::ExpandedIndexOutOfRange {
        index: expanded,
        len: cumulative,
    })
}

pub(crate) fn check_compact<T>(
    knots: &[Knot<T>],
    compact: usize,
) -> KnotResult<usize> {
    if compact < knots.len() {
        Ok(compact)
    } else {
        Err(KnotSequenceError::CompactIndexOutOfRange {
            index: compact,
            len: knots.len(),
        })
    }
}
