//! Flavor policies of the generic [`KnotSequence`](crate::KnotSequence).
//!
//! A [`Layout`] fixes the index space callers use (one index per knot
//! occurrence or one per distinct abscissa). A [`Topology`] fixes how the
//! normalized basis is located and which extra rules the sequence obeys.

use crate::{
    index, normalized_basis, Abscissa, BasisBound, CompactIndex, ExpandedIndex,
    Knot, KnotResult, KnotSequenceError, NormalizedBasisBounds,
    NormalizedBasisStatus,
};
use core::fmt::{Debug, Display};

mod sealed {
    pub trait Sealed {}
}

/// Index space of a knot sequence.
pub trait Layout:
    sealed::Sealed + Copy + Debug + Default + PartialEq + 'static
{
    /// The caller-facing index type.
    type Index: Copy + Debug + Display + PartialEq + Eq + Ord;

    /// `true` if inputs and indices address distinct abscissae.
    const COMPACT: bool;

    /// Position of the distinct knot addressed by `index`.
    fn compact_position<T: Copy>(
        knots: &[Knot<T>],
        index: Self::Index,
    ) -> KnotResult<usize>;

    /// Converts an occurrence position into this index space.
    fn from_expanded<T: Copy>(
        knots: &[Knot<T>],
        expanded: usize,
    ) -> KnotResult<Self::Index>;

    /// Number of valid indices.
    fn len<T: Copy>(knots: &[Knot<T>]) -> usize;
}

/// One index per knot occurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Expanded;

/// One index per distinct abscissa.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Compact;

impl sealed::Sealed for Expanded {}
impl sealed::Sealed for Compact {}

impl Layout for Expanded {
    type Index = ExpandedIndex;

    const COMPACT: bool = false;

    fn compact_position<T: Copy>(
        knots: &[Knot<T>],
        index: ExpandedIndex,
    ) -> KnotResult<usize> {
        index::compact_of(knots, index.get())
    }

    #[inline]
    fn from_expanded<T: Copy>(
        _knots: &[Knot<T>],
        expanded: usize,
    ) -> KnotResult<ExpandedIndex> {
        Ok(ExpandedIndex::new(expanded))
    }

    fn len<T: Copy>(knots: &[Knot<T>]) -> usize {
        index::occurrence_count(knots)
    }
}

impl Layout for Compact {
    type Index = CompactIndex;

    const COMPACT: bool = true;

    fn compact_position<T: Copy>(
        knots: &[Knot<T>],
        index: CompactIndex,
    ) -> KnotResult<usize> {
        index::check_compact(knots, index.get())
    }

    fn from_expanded<T: Copy>(
        knots: &[Knot<T>],
        expanded: usize,
    ) -> KnotResult<CompactIndex> {
        index::compact_of(knots, expanded).map(CompactIndex::new)
    }

    fn len<T: Copy>(knots: &[Knot<T>]) -> usize {
        knots.len()
    }
}

/// Curve topology of a knot sequence.
pub trait Topology:
    sealed::Sealed + Copy + Debug + Default + PartialEq + 'static
{
    /// `true` if the sequence stores exactly one period of a closed curve.
    const PERIODIC: bool;

    /// Smallest accepted maximal multiplicity order.
    const MINIMUM_ORDER: usize;

    /// Locates the normalized basis.
    fn bounds<T: Copy>(
        knots: &[Knot<T>],
        order: usize,
    ) -> NormalizedBasisBounds;

    /// Largest multiplicity knot `position` of `len` may carry.
    fn multiplicity_cap(
        position: usize,
        len: usize,
        order: usize,
        up_to_c0_discontinuity: bool,
    ) -> usize;

    /// Rules checked every time a knot list is validated.
    fn validate_structure<T: Abscissa>(
        knots: &[Knot<T>],
        order: usize,
    ) -> KnotResult<()>;

    /// Rules checked only on knots supplied through a configuration.
    fn validate_input<T: Abscissa>(
        knots: &[Knot<T>],
        order: usize,
    ) -> KnotResult<()>;

    /// Moves the basis origin to its canonical place.
    fn pin_origin<T: Abscissa>(knots: &mut [Knot<T>], origin: T);

    /// Rejects multiplicity decrements this topology never allows.
    fn check_decrement(position: usize, len: usize) -> KnotResult<()>;
}

/// Open knot sequence: the basis starts once the cumulative multiplicity
/// from the front reaches the order. Covers open curves as well as closed
/// curves carrying their wrap-around knots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Open;

/// Periodic knot sequence: exactly one period of a closed curve, first
/// and last knot being the same closure point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Periodic;

impl sealed::Sealed for Open {}
impl sealed::Sealed for Periodic {}

impl Topology for Open {
    const PERIODIC: bool = false;
    const MINIMUM_ORDER: usize = 1;

    fn bounds<T: Copy>(
        knots: &[Knot<T>],
        order: usize,
    ) -> NormalizedBasisBounds {
        normalized_basis::bounds_of(knots, order)
    }

    fn multiplicity_cap(
        position: usize,
        len: usize,
        order: usize,
        up_to_c0_discontinuity: bool,
    ) -> usize {
        if position == 0 || position + 1 == len || up_to_c0_discontinuity {
            order
        } else {
            order - 1
        }
    }

    fn validate_structure<T: Abscissa>(
        _knots: &[Knot<T>],
        _order: usize,
    ) -> KnotResult<()> {
        Ok(())
    }

    fn validate_input<T: Abscissa>(
        knots: &[Knot<T>],
        order: usize,
    ) -> KnotResult<()> {
        let (Some(first), Some(last)) = (knots.first(), knots.last()) else {
            return Err(KnotSequenceError::EmptyKnots);
        };
        let clamped = knots.len() > 1
            && first.multiplicity() == order
            && last.multiplicity() == order
            && knots[1..knots.len() - 1]
                .iter()
                .all(|knot| knot.multiplicity() < order);
        let origin = T::from_f64(crate::OPEN_KNOT_SEQUENCE_ORIGIN)
            .unwrap_or_else(T::zero);
        if clamped && !first.abscissa().coincides_with(origin) {
            return Err(
                KnotSequenceError::OriginInconsistentWithNonUniformEnds {
                    first: first.abscissa().to_report(),
                },
            );
        }
        Ok(())
    }

    fn pin_origin<T: Abscissa>(knots: &mut [Knot<T>], origin: T) {
        let target = T::from_f64(crate::OPEN_KNOT_SEQUENCE_ORIGIN)
            .unwrap_or_else(T::zero);
        let shift = origin - target;
        if shift == T::zero() {
            return;
        }
        log::debug!("pinning open knot sequence origin, shift {shift:?}");
        for knot in knots {
            knot.set_abscissa(knot.abscissa() - shift);
        }
    }

    #[inline]
    fn check_decrement(_position: usize, _len: usize) -> KnotResult<()> {
        Ok(())
    }
}

impl Topology for Periodic {
    const PERIODIC: bool = true;
    const MINIMUM_ORDER: usize = 2;

    fn bounds<T: Copy>(
        knots: &[Knot<T>],
        _order: usize,
    ) -> NormalizedBasisBounds {
        let bound = |index| BasisBound {
            knot_index: CompactIndex::new(index),
            status: NormalizedBasisStatus::StrictlyNormalized,
        };
        NormalizedBasisBounds {
            start: bound(0),
            end: bound(knots.len().saturating_sub(1)),
        }
    }

    #[inline]
    fn multiplicity_cap(
        _position: usize,
        _len: usize,
        order: usize,
        _up_to_c0_discontinuity: bool,
    ) -> usize {
        // The closure knot is interior to the closed curve too.
        order - 1
    }

    fn validate_structure<T: Abscissa>(
        knots: &[Knot<T>],
        order: usize,
    ) -> KnotResult<()> {
        let (Some(first), Some(last)) = (knots.first(), knots.last()) else {
            return Err(KnotSequenceError::EmptyKnots);
        };
        if first.multiplicity() != last.multiplicity() {
            return Err(KnotSequenceError::PeriodicEndMultiplicityMismatch {
                start: first.multiplicity(),
                end: last.multiplicity(),
            });
        }
        let basis_size = index::occurrence_count(knots) - last.multiplicity();
        if basis_size < order {
            return Err(KnotSequenceError::InsufficientBasisSize {
                basis_size,
                minimum: order,
            });
        }
        Ok(())
    }

    #[inline]
    fn validate_input<T: Abscissa>(
        _knots: &[Knot<T>],
        _order: usize,
    ) -> KnotResult<()> {
        Ok(())
    }

    #[inline]
    fn pin_origin<T: Abscissa>(_knots: &mut [Knot<T>], _origin: T) {}

    fn check_decrement(position: usize, len: usize) -> KnotResult<()> {
        if position == 0 || position + 1 == len {
            return Err(KnotSequenceError::SequenceOriginRemoval {
                index: position,
            });
        }
        Ok(())
    }
}

/// Display name of a flavor, e.g. `IncreasingOpenKnotSequence`.
pub(crate) fn flavor_name<L: Layout, P: Topology>() -> &'static str {
    match (L::COMPACT, P::PERIODIC) {
        (false, false) => "IncreasingOpenKnotSequence",
        (false, true) => "IncreasingPeriodicKnotSequence",
        (true, false) => "StrictlyIncreasingOpenKnotSequence",
        (true, true) => "StrictlyIncreasingPeriodicKnotSequence",
    }
}
