//! From configurations to validated knot lists.

use crate::{
    flavor::flavor_name, normalized_basis, Abscissa, Knot, KnotResult,
    KnotSequenceConfig, KnotSequenceError, Layout, Topology,
};
use alloc::{vec, vec::Vec};

/// Knots produced from a configuration, before flavor validation.
pub(super) struct RawKnots<T> {
    pub(super) knots: Vec<Knot<T>>,
    pub(super) up_to_c0_discontinuity: bool,
    /// The knots are one period of a closed curve.
    pub(super) periodic: bool,
}

impl<T> RawKnots<T> {
    fn open(knots: Vec<Knot<T>>) -> Self {
        Self {
            knots,
            up_to_c0_discontinuity: false,
            periodic: false,
        }
    }

    fn periodic(knots: Vec<Knot<T>>) -> Self {
        Self {
            knots,
            up_to_c0_discontinuity: false,
            periodic: true,
        }
    }

    fn up_to_c0(mut self) -> Self {
        self.up_to_c0_discontinuity = true;
        self
    }
}

pub(super) fn raw_knots<T: Abscissa, L: Layout, P: Topology>(
    order: usize,
    config: KnotSequenceConfig<'_, T>,
) -> KnotResult<RawKnots<T>> {
    use KnotSequenceConfig::*;

    let raw = match config {
        NoKnotOpenCurve if !P::PERIODIC => RawKnots::open(vec![
            Knot::new(T::zero(), order)?,
            Knot::new(T::one(), order)?,
        ]),
        NoKnotClosedCurve => {
            RawKnots::periodic(uniform(0..=order.max(3), T::zero())?)
        }
        Uniform { basis_size } => {
            check_basis_size(basis_size, order)?;
            if P::PERIODIC {
                RawKnots::periodic(uniform(0..=basis_size, T::zero())?)
            } else {
                // Shifted so the basis starts at knot `order - 1`.
                let offset = T::from_count(order - 1);
                RawKnots::open(uniform(0..basis_size + order, offset)?)
            }
        }
        UniformlySpreadInterKnots { basis_size } if !P::PERIODIC => {
            check_basis_size(basis_size, order)?;
            let last = basis_size - order + 1;
            let knots = (0..=last)
                .map(|i| {
                    let multiplicity =
                        if i == 0 || i == last { order } else { 1 };
                    Knot::new(T::from_count(i), multiplicity)
                })
                .collect::<KnotResult<_>>()?;
            RawKnots::open(knots)
        }
        IncreasingKnots { knots } if !L::COMPACT && !P::PERIODIC => {
            RawKnots::open(collapse(knots)?)
        }
        IncreasingKnotsUpToC0Discontinuity { knots }
            if !L::COMPACT && !P::PERIODIC =>
        {
            RawKnots::open(collapse(knots)?).up_to_c0()
        }
        PeriodicKnots { knots } if !L::COMPACT => {
            RawKnots::periodic(collapse(knots)?)
        }
        StrictlyIncreasingKnots {
            knots,
            multiplicities,
        } if L::COMPACT && !P::PERIODIC => {
            RawKnots::open(pair(knots, multiplicities, order)?)
        }
        StrictlyIncreasingKnotsUpToC0Discontinuity {
            knots,
            multiplicities,
        } if L::COMPACT && !P::PERIODIC => {
            RawKnots::open(pair(knots, multiplicities, order)?).up_to_c0()
        }
        PeriodicStrictlyIncreasingKnots {
            knots,
            multiplicities,
        } if L::COMPACT => {
            RawKnots::periodic(pair(knots, multiplicities, order)?)
        }
        _ => {
            return Err(KnotSequenceError::UnsupportedConfiguration {
                flavor: flavor_name::<L, P>(),
                config: config.name(),
            })
        }
    };
    Ok(raw)
}

/// Checks shared by construction, renormalization and conversion.
///
/// Returns nothing; bounds are recomputed by the caller once the list is
/// known to be valid.
pub(super) fn validate<T: Abscissa, P: Topology>(
    knots: &[Knot<T>],
    order: usize,
    up_to_c0_discontinuity: bool,
) -> KnotResult<()> {
    if knots.is_empty() {
        return Err(KnotSequenceError::EmptyKnots);
    }

    for (index, knot) in knots.iter().enumerate() {
        if knot.multiplicity() > order {
            return Err(KnotSequenceError::MultiplicityOutOfRange {
                index,
                multiplicity: knot.multiplicity(),
                max: order,
            });
        }
    }

    for (index, knot) in knots.iter().enumerate() {
        let cap = P::multiplicity_cap(
            index,
            knots.len(),
            order,
            up_to_c0_discontinuity,
        );
        if knot.multiplicity() > cap {
            return Err(KnotSequenceError::InteriorMultiplicityTooLarge {
                index,
                multiplicity: knot.multiplicity(),
                cap,
            });
        }
    }

    let bounds = P::bounds(knots, order);
    normalized_basis::require_strictly_normalized(knots, &bounds, order)?;

    let start = bounds.start.knot_index.get();
    let end = bounds.end.knot_index.get();
    let origin = knots[start].abscissa();
    let u_max = knots[end].abscissa();
    if start >= end || u_max - origin <= T::coincidence_tolerance() {
        return Err(KnotSequenceError::NonPositiveBasisWidth {
            origin: origin.to_report(),
            u_max: u_max.to_report(),
        });
    }

    P::validate_structure(knots, order)
}

fn check_basis_size(basis_size: usize, order: usize) -> KnotResult<()> {
    if basis_size < order {
        return Err(KnotSequenceError::InsufficientBasisSize {
            basis_size,
            minimum: order,
        });
    }
    Ok(())
}

/// Knots of multiplicity one at `i - offset` for each `i` in `range`.
fn uniform<T: Abscissa>(
    range: impl Iterator<Item = usize>,
    offset: T,
) -> KnotResult<Vec<Knot<T>>> {
    range
        .map(|i| Knot::new(T::from_count(i) - offset, 1))
        .collect()
}

/// Groups a flat, non-decreasing abscissa list into knots. Abscissae
/// within the coincidence tolerance of their predecessor join its run.
fn collapse<T: Abscissa>(abscissae: &[T]) -> KnotResult<Vec<Knot<T>>> {
    if abscissae.is_empty() {
        return Err(KnotSequenceError::EmptyKnots);
    }

    for (index, pair) in abscissae.windows(2).enumerate() {
        let (previous, current) = (pair[0], pair[1]);
        // Negated so NaN is rejected too.
        if !(current >= previous) && !current.coincides_with(previous) {
            return Err(KnotSequenceError::NotIncreasing {
                index: index + 1,
                previous: previous.to_report(),
                current: current.to_report(),
            });
        }
    }

    let mut knots: Vec<Knot<T>> = Vec::new();
    for &abscissa in abscissae {
        match knots.last_mut() {
            Some(last) if last.abscissa().coincides_with(abscissa) => {
                last.increment_multiplicity(1)
            }
            _ => knots.push(Knot::new(abscissa, 1)?),
        }
    }
    Ok(knots)
}

/// Pairs distinct abscissae with their multiplicities.
fn pair<T: Abscissa>(
    abscissae: &[T],
    multiplicities: &[usize],
    order: usize,
) -> KnotResult<Vec<Knot<T>>> {
    if abscissae.is_empty() || multiplicities.is_empty() {
        return Err(KnotSequenceError::EmptyKnots);
    }
    if abscissae.len() != multiplicities.len() {
        return Err(KnotSequenceError::LengthMismatch {
            knots: abscissae.len(),
            multiplicities: multiplicities.len(),
        });
    }

    for (index, pair) in abscissae.windows(2).enumerate() {
        let (previous, current) = (pair[0], pair[1]);
        if !(current > previous) || current.coincides_with(previous) {
            return Err(KnotSequenceError::NotStrictlyIncreasing {
                index: index + 1,
                previous: previous.to_report(),
                current: current.to_report(),
            });
        }
    }

    abscissae
        .iter()
        .zip(multiplicities)
        .enumerate()
        .map(|(index, (&abscissa, &multiplicity))| {
            if multiplicity == 0 || multiplicity > order {
                return Err(KnotSequenceError::MultiplicityOutOfRange {
                    index,
                    multiplicity,
                    max: order,
                });
            }
            Knot::new(abscissa, multiplicity)
        })
        .collect()
}
