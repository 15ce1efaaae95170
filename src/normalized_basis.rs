//! Locating the normalized B-spline basis inside a knot list.
//!
//! Walking in from one end of the sequence, the basis starts at the first
//! knot where the running multiplicity reaches the maximal multiplicity
//! order `k`. Knot occurrences counted past `k` at that knot lie outside
//! the basis and are redundant.

use crate::{
    index, CompactIndex, Extremity, Knot, KnotResult, KnotSequenceError,
};
use alloc::vec::Vec;

/// How the basis is formed at one end of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalizedBasisStatus {
    /// The running multiplicity never reaches the order.
    NotNormalized,
    /// The running multiplicity reaches exactly the order at the bound.
    StrictlyNormalized,
    /// The running multiplicity jumps past the order at the bound; some
    /// occurrences at this end are redundant.
    OverDefined,
}

/// One end of the normalized basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BasisBound {
    /// Knot carrying the bound. For [`NormalizedBasisStatus::NotNormalized`]
    /// this is the opposite end of the sequence.
    pub knot_index: CompactIndex,
    pub status: NormalizedBasisStatus,
}

impl BasisBound {
    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.status != NormalizedBasisStatus::NotNormalized
    }
}

/// Both ends of the normalized basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedBasisBounds {
    pub start: BasisBound,
    pub end: BasisBound,
}

impl NormalizedBasisBounds {
    /// `true` if a basis can be formed from both ends.
    pub fn is_normalized(&self) -> bool {
        self.start.is_normalized() && self.end.is_normalized()
    }

    /// `true` if neither end carries redundant occurrences.
    pub fn is_strictly_normalized(&self) -> bool {
        self.start.status == NormalizedBasisStatus::StrictlyNormalized
            && self.end.status == NormalizedBasisStatus::StrictlyNormalized
    }
}

/// Locates the normalized basis of `knots` for the maximal multiplicity
/// order `max_multiplicity_order`.
///
/// Both ends are walked independently.
/// ```
/// use knot_sequences::{
///     normalized_basis::bounds_of, CompactIndex, Knot, NormalizedBasisStatus,
/// };
///
/// // Uniform knots: the basis starts at the fourth knot for a cubic.
/// let knots: Vec<_> = (0..12)
///     .map(|i| Knot::new(i as f64 * 0.1 - 0.3, 1).unwrap())
///     .collect();
/// let bounds = bounds_of(&knots, 4);
/// assert_eq!(bounds.start.knot_index, CompactIndex::new(3));
/// assert_eq!(bounds.end.knot_index, CompactIndex::new(8));
/// assert_eq!(bounds.end.status, NormalizedBasisStatus::StrictlyNormalized);
/// ```
pub fn bounds_of<T: Copy>(
    knots: &[Knot<T>],
    max_multiplicity_order: usize,
) -> NormalizedBasisBounds {
    let last = knots.len().saturating_sub(1);
    NormalizedBasisBounds {
        start: walk(knots.iter().enumerate(), max_multiplicity_order, last),
        end: walk(knots.iter().enumerate().rev(), max_multiplicity_order, 0),
    }
}

fn walk<'a, T: Copy + 'a>(
    knots: impl Iterator<Item = (usize, &'a Knot<T>)>,
    order: usize,
    fallback: usize,
) -> BasisBound {
    let mut cumulative = 0;
    for (index, knot) in knots {
        cumulative += knot.multiplicity();
        if cumulative >= order {
            return BasisBound {
                knot_index: CompactIndex::new(index),
                status: if cumulative == order {
                    NormalizedBasisStatus::StrictlyNormalized
                } else {
                    NormalizedBasisStatus::OverDefined
                },
            };
        }
    }
    BasisBound {
        knot_index: CompactIndex::new(fallback),
        status: NormalizedBasisStatus::NotNormalized,
    }
}

/// Fails unless a basis can be formed from both ends.
pub(crate) fn require_normalized<T: Copy>(
    knots: &[Knot<T>],
    bounds: &NormalizedBasisBounds,
    order: usize,
) -> KnotResult<()> {
    for (extremity, bound) in
        [(Extremity::Start, bounds.start), (Extremity::End, bounds.end)]
    {
        if !bound.is_normalized() {
            return Err(KnotSequenceError::InsufficientCumulativeMultiplicity {
                extremity,
                cumulative: index::occurrence_count(knots),
                required: order,
            });
        }
    }
    Ok(())
}

/// Fails unless both ends are strictly normalized.
pub(crate) fn require_strictly_normalized<T: Copy>(
    knots: &[Knot<T>],
    bounds: &NormalizedBasisBounds,
    order: usize,
) -> KnotResult<()> {
    require_normalized(knots, bounds, order)?;
    for (extremity, bound) in
        [(Extremity::Start, bounds.start), (Extremity::End, bounds.end)]
    {
        if bound.status == NormalizedBasisStatus::OverDefined {
            return Err(KnotSequenceError::OverDefinedBasis { extremity });
        }
    }
    Ok(())
}

/// Discards the redundant occurrences of over-defined ends so both ends
/// become strictly normalized. Returns the number of occurrences dropped.
pub(crate) fn trim_over_defined<T: Copy>(
    knots: &mut Vec<Knot<T>>,
    order: usize,
) -> KnotResult<usize> {
    let bounds = bounds_of(knots, order);
    require_normalized(knots, &bounds, order)?;
    let start = bounds.start.knot_index.get();
    let excess = index::cumulative_multiplicity(knots, start) - order;
    let mut dropped = drop_leading(knots, excess);

    // Dropping at the front may have shifted the end bound.
    let end = bounds_of(knots, order).end.knot_index.get();
    let from_end = index::occurrence_count(knots)
        - index::first_occurrence(knots, end);
    knots.reverse();
    dropped += drop_leading(knots, from_end - order);
    knots.reverse();
    Ok(dropped)
}

fn drop_leading<T: Copy>(knots: &mut Vec<Knot<T>>, mut excess: usize) -> usize {
    let dropped = excess;
    while excess > 0 {
        let multiplicity = knots[0].multiplicity();
        if multiplicity <= excess {
            knots.remove(0);
            excess -= multiplicity;
        } else {
            knots[0].reduce_multiplicity(excess);
            excess = 0;
        }
    }
    dropped
}
