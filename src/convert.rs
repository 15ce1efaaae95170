//! Conversions between knot sequence flavors.
//!
//! Changing the index space never fails: both layouts store the same
//! knots. Changing the topology does, see [`open_to_periodic()`] and
//! [`periodic_to_open()`].

use crate::{
    normalized_basis, Abscissa, Compact, Expanded, Knot, KnotResult,
    KnotSequence, KnotSequenceError, Layout, Open, Periodic, Topology,
};
use alloc::vec::Vec;

/// Strictly increasing view of the same sequence.
pub fn to_compact<T: Abscissa, P: Topology>(
    sequence: &KnotSequence<T, Expanded, P>,
) -> KnotSequence<T, Compact, P> {
    sequence.clone().relayout()
}

/// Increasing view of the same sequence.
pub fn to_expanded<T: Abscissa, P: Topology>(
    sequence: &KnotSequence<T, Compact, P>,
) -> KnotSequence<T, Expanded, P> {
    sequence.clone().relayout()
}

impl<T: Abscissa, P: Topology> From<KnotSequence<T, Expanded, P>>
    for KnotSequence<T, Compact, P>
{
    fn from(sequence: KnotSequence<T, Expanded, P>) -> Self {
        sequence.relayout()
    }
}

impl<T: Abscissa, P: Topology> From<KnotSequence<T, Compact, P>>
    for KnotSequence<T, Expanded, P>
{
    fn from(sequence: KnotSequence<T, Compact, P>) -> Self {
        sequence.relayout()
    }
}

/// Extracts the periodic form of an open sequence describing a closed
/// curve.
///
/// The knots from the origin up to `u_max` become one period.
///
/// # Errors
/// * [`KnotSequenceError::OverDefinedBasis`] if either end carries
///   redundant occurrences.
/// * [`KnotSequenceError::MultiplicityTooLargeForConversion`] if a kept
///   knot has the maximal multiplicity order; such a sequence is clamped,
///   not closed.
/// * Any validation error of the periodic sequence.
///
/// # Examples
/// ```
/// use knot_sequences::{
///     convert::open_to_periodic, IncreasingOpenKnotSequence,
///     KnotSequenceConfig,
/// };
///
/// let knots = [-1.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 4.0];
/// let open = IncreasingOpenKnotSequence::<f64>::new(
///     3,
///     KnotSequenceConfig::IncreasingKnots { knots: &knots },
/// )
/// .unwrap();
///
/// let periodic = open_to_periodic(&open).unwrap();
/// assert_eq!(periodic.abscissae(), vec![0.0, 0.0, 1.0, 2.0, 3.0, 3.0]);
/// ```
pub fn open_to_periodic<T: Abscissa, L: Layout>(
    sequence: &KnotSequence<T, L, Open>,
) -> KnotResult<KnotSequence<T, L, Periodic>> {
    let order = sequence.max_multiplicity_order();
    let knots = sequence.knot_list();
    let bounds = sequence.normalized_basis_bounds();
    normalized_basis::require_strictly_normalized(knots, &bounds, order)?;

    let start = bounds.start.knot_index.get();
    let end = bounds.end.knot_index.get();
    let period = knots[start..=end].to_vec();
    if let Some((offset, knot)) = period
        .iter()
        .enumerate()
        .find(|(_, knot)| knot.multiplicity() >= order)
    {
        return Err(KnotSequenceError::MultiplicityTooLargeForConversion {
            index: start + offset,
            multiplicity: knot.multiplicity(),
        });
    }

    log::debug!(
        "extracting one period from knots {start}..={end} of an open sequence"
    );
    KnotSequence::from_knots(period, order, false)
}

/// Expands a periodic sequence into the open sequence of the same closed
/// curve by adding wrap-around knots at both ends.
///
/// # Examples
/// ```
/// use knot_sequences::{
///     convert::periodic_to_open, IncreasingPeriodicKnotSequence,
///     KnotSequenceConfig,
/// };
///
/// let periodic = IncreasingPeriodicKnotSequence::<f64>::new(
///     3,
///     KnotSequenceConfig::PeriodicKnots {
///         knots: &[0.0, 0.0, 1.0, 2.0, 3.0, 3.0],
///     },
/// )
/// .unwrap();
///
/// let open = periodic_to_open(&periodic).unwrap();
/// assert_eq!(
///     open.abscissae(),
///     vec![-1.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 4.0]
/// );
/// ```
pub fn periodic_to_open<T: Abscissa, L: Layout>(
    sequence: &KnotSequence<T, L, Periodic>,
) -> KnotResult<KnotSequence<T, L, Open>> {
    let order = sequence.max_multiplicity_order();
    let knots = wrap_periodic_knots(sequence.knot_list(), order);
    KnotSequence::from_knots(knots, order, false)
}

/// Surrounds one validated period with the knots of the neighboring
/// periods until the multiplicity at each end reaches `order`.
pub(crate) fn wrap_periodic_knots<T: Abscissa>(
    knots: &[Knot<T>],
    order: usize,
) -> Vec<Knot<T>> {
    let last = knots.len() - 1;
    let period = knots[last].abscissa() - knots[0].abscissa();
    let needed = order.saturating_sub(knots[0].multiplicity());
    let interior = &knots[1..last];

    let mut leading = Vec::new();
    let mut remaining = needed;
    for knot in interior.iter().rev() {
        if remaining == 0 {
            break;
        }
        let multiplicity = knot.multiplicity().min(remaining);
        leading.push(knot.shifted(-period, multiplicity));
        remaining -= multiplicity;
    }
    leading.reverse();

    let mut trailing = Vec::new();
    let mut remaining = needed;
    for knot in interior {
        if remaining == 0 {
            break;
        }
        let multiplicity = knot.multiplicity().min(remaining);
        trailing.push(knot.shifted(period, multiplicity));
        remaining -= multiplicity;
    }

    let mut wrapped =
        Vec::with_capacity(leading.len() + knots.len() + trailing.len());
    wrapped.extend(leading);
    wrapped.extend_from_slice(knots);
    wrapped.extend(trailing);
    wrapped
}
