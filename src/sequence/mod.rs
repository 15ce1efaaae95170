//! The knot sequence engine shared by every flavor.

mod build;
mod iter;
mod mutate;
mod span;

pub use iter::*;

use crate::{
    convert, flavor::flavor_name, index, Abscissa, CompactIndex, Compact,
    Expanded, ExpandedIndex, Knot, KnotResult, KnotSequenceConfig,
    KnotSequenceError, Layout, LogWarnings, NormalizedBasisBounds, Open,
    Periodic, Topology, WarningSink,
};
use alloc::{format, vec::Vec};
use core::marker::PhantomData;

/// Knots addressed per occurrence; open curves, or closed curves carrying
/// their wrap-around knots.
pub type IncreasingOpenKnotSequence<T = f64> = KnotSequence<T, Expanded, Open>;

/// Knots addressed per occurrence; one period of a closed curve.
pub type IncreasingPeriodicKnotSequence<T = f64> =
    KnotSequence<T, Expanded, Periodic>;

/// Knots addressed per distinct abscissa; open curves, or closed curves
/// carrying their wrap-around knots.
pub type StrictlyIncreasingOpenKnotSequence<T = f64> =
    KnotSequence<T, Compact, Open>;

/// Knots addressed per distinct abscissa; one period of a closed curve.
pub type StrictlyIncreasingPeriodicKnotSequence<T = f64> =
    KnotSequence<T, Compact, Periodic>;

/// A validated knot sequence.
///
/// The sequence owns its knots as a list of distinct abscissae with their
/// multiplicities. `L` picks the index space callers see, `P` the curve
/// topology. See the aliases above for the four concrete flavors.
///
/// Every mutator leaves `self` untouched and returns a new, revalidated
/// sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct KnotSequence<T, L, P> {
    knots: Vec<Knot<T>>,
    max_multiplicity_order: usize,
    up_to_c0_discontinuity: bool,
    bounds: NormalizedBasisBounds,
    is_knot_spacing_uniform: bool,
    is_knot_multiplicity_uniform: bool,
    is_knot_multiplicity_non_uniform: bool,
    flavor: PhantomData<(L, P)>,
}

impl<T: Abscissa, L: Layout, P: Topology> KnotSequence<T, L, P> {
    /// Builds a knot sequence of maximal multiplicity order
    /// `max_multiplicity_order` (the curve degree plus one).
    ///
    /// The input runs through the full validation pipeline: order range,
    /// array shapes, abscissa ordering, multiplicity range, interior
    /// multiplicity cap, cumulative multiplicity at both ends, basis width,
    /// then the flavor's own rules. Open sequences are finally shifted so
    /// their basis starts at
    /// [`OPEN_KNOT_SEQUENCE_ORIGIN`](crate::OPEN_KNOT_SEQUENCE_ORIGIN).
    ///
    /// # Examples
    /// ```
    /// use knot_sequences::{
    ///     IncreasingPeriodicKnotSequence, KnotSequenceConfig,
    ///     StrictlyIncreasingOpenKnotSequence,
    /// };
    ///
    /// let open = StrictlyIncreasingOpenKnotSequence::<f64>::new(
    ///     3,
    ///     KnotSequenceConfig::PeriodicStrictlyIncreasingKnots {
    ///         knots: &[0.0, 1.0, 2.0, 3.0],
    ///         multiplicities: &[1, 1, 1, 1],
    ///     },
    /// )
    /// .unwrap();
    /// // Wrap-around knots were added at both ends.
    /// assert_eq!(
    ///     open.distinct_abscissae(),
    ///     vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
    /// );
    ///
    /// let closed = IncreasingPeriodicKnotSequence::<f64>::new(
    ///     3,
    ///     KnotSequenceConfig::NoKnotClosedCurve,
    /// )
    /// .unwrap();
    /// assert_eq!(closed.abscissae(), vec![0.0, 1.0, 2.0, 3.0]);
    /// ```
    pub fn new(
        max_multiplicity_order: usize,
        config: KnotSequenceConfig<'_, T>,
    ) -> KnotResult<Self> {
        if max_multiplicity_order < P::MINIMUM_ORDER {
            return Err(KnotSequenceError::InvalidMaxMultiplicityOrder {
                flavor: flavor_name::<L, P>(),
                value: max_multiplicity_order,
                minimum: P::MINIMUM_ORDER,
            });
        }
        let raw = build::raw_knots::<T, L, P>(max_multiplicity_order, config)?;
        let knots = if raw.periodic && !P::PERIODIC {
            build::validate::<T, Periodic>(
                &raw.knots,
                max_multiplicity_order,
                false,
            )?;
            convert::wrap_periodic_knots(&raw.knots, max_multiplicity_order)
        } else {
            raw.knots
        };
        build::validate::<T, P>(
            &knots,
            max_multiplicity_order,
            raw.up_to_c0_discontinuity,
        )?;
        P::validate_input(&knots, max_multiplicity_order)?;
        Ok(Self::assemble(
            knots,
            max_multiplicity_order,
            raw.up_to_c0_discontinuity,
        ))
    }

    /// Validates an internally produced knot list and wraps it.
    pub(crate) fn from_knots(
        knots: Vec<Knot<T>>,
        max_multiplicity_order: usize,
        up_to_c0_discontinuity: bool,
    ) -> KnotResult<Self> {
        build::validate::<T, P>(
            &knots,
            max_multiplicity_order,
            up_to_c0_discontinuity,
        )?;
        Ok(Self::assemble(
            knots,
            max_multiplicity_order,
            up_to_c0_discontinuity,
        ))
    }

    /// `knots` must already be validated.
    fn assemble(
        mut knots: Vec<Knot<T>>,
        max_multiplicity_order: usize,
        up_to_c0_discontinuity: bool,
    ) -> Self {
        let bounds = P::bounds(&knots, max_multiplicity_order);
        let origin = knots[bounds.start.knot_index.get()].abscissa();
        P::pin_origin(&mut knots, origin);

        let mut sequence = Self {
            knots,
            max_multiplicity_order,
            up_to_c0_discontinuity,
            bounds,
            is_knot_spacing_uniform: false,
            is_knot_multiplicity_uniform: false,
            is_knot_multiplicity_non_uniform: false,
            flavor: PhantomData,
        };
        sequence.refresh();
        sequence
    }

    /// Recomputes the normalized basis bounds and the derived flags.
    pub(crate) fn refresh(&mut self) {
        let order = self.max_multiplicity_order;
        self.bounds = P::bounds(&self.knots, order);

        let tolerance = T::coincidence_tolerance();
        self.is_knot_spacing_uniform = self.knots.windows(3).all(|window| {
            let before = window[1].abscissa() - window[0].abscissa();
            let after = window[2].abscissa() - window[1].abscissa();
            (before - after).abs() <= tolerance
        });

        self.is_knot_multiplicity_uniform =
            self.knots.iter().all(|knot| knot.multiplicity() == 1);

        let len = self.knots.len();
        self.is_knot_multiplicity_non_uniform = len > 1
            && self.knots[0].multiplicity() == order
            && self.knots[len - 1].multiplicity() == order
            && self.knots[1..len - 1]
                .iter()
                .all(|knot| knot.multiplicity() < order);
    }

    /// Reinterprets the same knots in another index space.
    pub(crate) fn relayout<M: Layout>(self) -> KnotSequence<T, M, P> {
        KnotSequence {
            knots: self.knots,
            max_multiplicity_order: self.max_multiplicity_order,
            up_to_c0_discontinuity: self.up_to_c0_discontinuity,
            bounds: self.bounds,
            is_knot_spacing_uniform: self.is_knot_spacing_uniform,
            is_knot_multiplicity_uniform: self.is_knot_multiplicity_uniform,
            is_knot_multiplicity_non_uniform: self
                .is_knot_multiplicity_non_uniform,
            flavor: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn knot_list(&self) -> &[Knot<T>] {
        &self.knots
    }

    /// Fails unless a basis can be formed from both ends.
    pub(crate) fn require_normalized(&self) -> KnotResult<()> {
        crate::normalized_basis::require_normalized(
            &self.knots,
            &self.bounds,
            self.max_multiplicity_order,
        )
    }

    /// Curve degree plus one; the multiplicity that makes a knot fully
    /// discontinuous.
    #[inline]
    pub fn max_multiplicity_order(&self) -> usize {
        self.max_multiplicity_order
    }

    /// `true` if interior knots may reach full multiplicity.
    #[inline]
    pub fn is_up_to_c0_discontinuity(&self) -> bool {
        self.up_to_c0_discontinuity
    }

    /// `true` if all consecutive distinct abscissae are equally spaced.
    #[inline]
    pub fn is_knot_spacing_uniform(&self) -> bool {
        self.is_knot_spacing_uniform
    }

    /// `true` if every knot has multiplicity one.
    #[inline]
    pub fn is_knot_multiplicity_uniform(&self) -> bool {
        self.is_knot_multiplicity_uniform
    }

    /// `true` if both end knots carry the maximal multiplicity order and
    /// no interior knot does.
    #[inline]
    pub fn is_knot_multiplicity_non_uniform(&self) -> bool {
        self.is_knot_multiplicity_non_uniform
    }

    #[inline]
    pub fn normalized_basis_bounds(&self) -> NormalizedBasisBounds {
        self.bounds
    }

    /// Index of the knot where the normalized basis starts.
    #[inline]
    pub fn index_knot_origin(&self) -> CompactIndex {
        self.bounds.start.knot_index
    }

    /// Abscissa where the normalized basis starts.
    #[inline]
    pub fn origin(&self) -> T {
        self.knots[self.bounds.start.knot_index.get()].abscissa()
    }

    /// Abscissa where the normalized basis ends.
    #[inline]
    pub fn u_max(&self) -> T {
        self.knots[self.bounds.end.knot_index.get()].abscissa()
    }

    /// Number of valid indices in this flavor's index space.
    #[inline]
    pub fn len(&self) -> usize {
        L::len(&self.knots)
    }

    /// Always `false`; a valid sequence holds at least one knot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Total number of knot occurrences.
    pub fn occurrence_count(&self) -> usize {
        index::occurrence_count(&self.knots)
    }

    pub fn distinct_abscissae(&self) -> Vec<T> {
        self.knots.iter().map(|knot| knot.abscissa()).collect()
    }

    pub fn multiplicities(&self) -> Vec<usize> {
        self.knots.iter().map(|knot| knot.multiplicity()).collect()
    }

    /// Abscissa of the knot at `index`.
    pub fn abscissa_at(&self, index: L::Index) -> KnotResult<T> {
        let position = L::compact_position(&self.knots, index)?;
        Ok(self.knots[position].abscissa())
    }

    /// Multiplicity of the knot at `index`.
    pub fn knot_multiplicity(&self, index: L::Index) -> KnotResult<usize> {
        let position = L::compact_position(&self.knots, index)?;
        Ok(self.knots[position].multiplicity())
    }

    /// Multiplicity of the knot at `abscissa`, `0` if there is none.
    ///
    /// A missing knot is reported to the `log` facade as a warning.
    pub fn multiplicity_at(&self, abscissa: T) -> usize {
        self.multiplicity_at_with(abscissa, &LogWarnings)
    }

    /// As [`multiplicity_at()`](Self::multiplicity_at), reporting a missing
    /// knot to `sink`.
    pub fn multiplicity_at_with(
        &self,
        abscissa: T,
        sink: &dyn WarningSink,
    ) -> usize {
        match self
            .knots
            .iter()
            .find(|knot| knot.abscissa().coincides_with(abscissa))
        {
            Some(knot) => knot.multiplicity(),
            None => {
                sink.warn(
                    flavor_name::<L, P>(),
                    &format!(
                        "no knot at abscissa {abscissa:?}, multiplicity is 0"
                    ),
                );
                0
            }
        }
    }

    /// Distinct knot holding occurrence `index`.
    pub fn to_compact_index(
        &self,
        index: ExpandedIndex,
    ) -> KnotResult<CompactIndex> {
        index::compact_of(&self.knots, index.get()).map(CompactIndex::new)
    }

    /// First occurrence of the distinct knot `index`.
    pub fn to_expanded_index(
        &self,
        index: CompactIndex,
    ) -> KnotResult<ExpandedIndex> {
        let compact = index::check_compact(&self.knots, index.get())?;
        Ok(ExpandedIndex::new(index::first_occurrence(&self.knots, compact)))
    }
}
