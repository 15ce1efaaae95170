//! Copy-on-write mutators.
//!
//! Each public mutator clones the receiver, applies an in-place primitive
//! to the clone and returns it. The receiver is never modified; on error
//! the clone is dropped.

use super::{build, KnotSequence};
use crate::{
    index, normalized_basis, Abscissa, Knot, KnotResult, KnotSequenceError,
    Layout, Topology,
};
use alloc::vec::Vec;

impl<T: Abscissa, L: Layout, P: Topology> KnotSequence<T, L, P> {
    /// Returns a copy with a new knot of `multiplicity` inserted at
    /// `abscissa`.
    ///
    /// # Errors
    /// * [`KnotSequenceError::UninitializedAbscissa`] or
    ///   [`KnotSequenceError::MultiplicityBelowOne`] for an invalid knot.
    /// * [`KnotSequenceError::KnotCoincidence`] if a knot already sits at
    ///   `abscissa`; raise its multiplicity instead.
    /// * [`KnotSequenceError::AbscissaOutOfRange`] unless `abscissa` lies
    ///   strictly inside the normalized basis.
    /// * [`KnotSequenceError::MultiplicityExceedsMaximum`] if
    ///   `multiplicity` exceeds the interior knot cap.
    pub fn insert_knot(
        &self,
        abscissa: T,
        multiplicity: usize,
    ) -> KnotResult<Self> {
        let mut sequence = self.clone();
        sequence.insert_knot_in_place(abscissa, multiplicity)?;
        Ok(sequence)
    }

    /// Returns a copy with the multiplicity of every knot in `indices`
    /// raised by `amount`.
    ///
    /// With `check_consistency`, knots on or outside the normalized basis
    /// bounds may not change and interior knots may not exceed their cap.
    /// Without it the change is applied verbatim; follow up with
    /// [`update_through_normalized_basis_analysis()`](Self::update_through_normalized_basis_analysis)
    /// to restore a valid basis. An `amount` that would overflow the
    /// occurrence count fails either way.
    ///
    /// # Examples
    /// ```
    /// use knot_sequences::{
    ///     CompactIndex, KnotSequenceError, StrictlyIncreasingOpenKnotSequence,
    ///     KnotSequenceConfig,
    /// };
    ///
    /// let sequence = StrictlyIncreasingOpenKnotSequence::<f64>::new(
    ///     3,
    ///     KnotSequenceConfig::UniformlySpreadInterKnots { basis_size: 5 },
    /// )
    /// .unwrap();
    ///
    /// let raised = sequence
    ///     .raise_knot_multiplicity(&[CompactIndex::new(1)], 1, true)
    ///     .unwrap();
    /// assert_eq!(raised.multiplicities(), vec![3, 2, 1, 3]);
    ///
    /// assert_eq!(
    ///     sequence.raise_knot_multiplicity(&[CompactIndex::new(0)], 1, true),
    ///     Err(KnotSequenceError::ModifyingNormalizedBasis { index: 0 })
    /// );
    /// ```
    pub fn raise_knot_multiplicity(
        &self,
        indices: &[L::Index],
        amount: usize,
        check_consistency: bool,
    ) -> KnotResult<Self> {
        let mut sequence = self.clone();
        sequence.raise_knot_multiplicity_in_place(
            indices,
            amount,
            check_consistency,
        )?;
        Ok(sequence)
    }

    /// Returns a copy with one occurrence of every knot in `indices`
    /// removed. A knot whose multiplicity reaches zero disappears.
    ///
    /// Indices are resolved against the receiver, so removing a knot does
    /// not shift the ones after it. Repeating an index removes one more
    /// occurrence each time.
    ///
    /// Periodic sequences never allow decrementing their first or last
    /// knot. With `check_consistency`, knots on or outside the normalized
    /// basis bounds may not change. The last remaining knot can never be
    /// removed ([`KnotSequenceError::InsufficientInterval`]).
    pub fn decrement_knot_multiplicity(
        &self,
        indices: &[L::Index],
        check_consistency: bool,
    ) -> KnotResult<Self> {
        let mut sequence = self.clone();
        sequence.decrement_knot_multiplicity_in_place(
            indices,
            check_consistency,
        )?;
        Ok(sequence)
    }

    /// Returns the mirror image of the sequence about the middle of its
    /// normalized basis.
    ///
    /// Reverting twice gives back the original sequence up to rounding.
    ///
    /// ```
    /// use knot_sequences::{IncreasingOpenKnotSequence, KnotSequenceConfig};
    ///
    /// let knots = [0.0, 0.0, 0.0, 0.2, 0.7, 1.0, 1.0, 1.0];
    /// let sequence = IncreasingOpenKnotSequence::<f64>::new(
    ///     3,
    ///     KnotSequenceConfig::IncreasingKnots { knots: &knots },
    /// )
    /// .unwrap();
    ///
    /// let mirrored = sequence.revert_knot_sequence();
    /// let abscissae = mirrored.abscissae();
    /// assert!((abscissae[3] - 0.3).abs() < 1.0e-12);
    /// assert!((abscissae[4] - 0.8).abs() < 1.0e-12);
    /// ```
    pub fn revert_knot_sequence(&self) -> Self {
        let mut sequence = self.clone();
        sequence.revert_in_place();
        sequence
    }

    /// Re-establishes a valid sequence after unchecked mutations.
    ///
    /// Open sequences first shed redundant occurrences at over-defined
    /// ends. The result is then fully revalidated and, for open sequences,
    /// shifted back onto the origin.
    ///
    /// # Errors
    /// * [`KnotSequenceError::InsufficientCumulativeMultiplicity`] if no
    ///   basis can be formed.
    /// * [`KnotSequenceError::InsufficientInterval`] if trimming leaves
    ///   too few occurrences for a single span.
    /// * Any validation error of the resulting knot list.
    pub fn update_through_normalized_basis_analysis(
        &self,
    ) -> KnotResult<Self> {
        let order = self.max_multiplicity_order;
        let mut knots = self.knots.clone();
        if !P::PERIODIC {
            let dropped =
                normalized_basis::trim_over_defined(&mut knots, order)?;
            if dropped > 0 {
                log::debug!(
                    "discarded {dropped} knot occurrences outside the normalized basis"
                );
            }
            let remaining = index::occurrence_count(&knots);
            if remaining < 2 * order {
                return Err(KnotSequenceError::InsufficientInterval {
                    remaining,
                    required: 2 * order,
                });
            }
        }
        Self::from_knots(knots, order, self.up_to_c0_discontinuity)
    }

    pub(crate) fn insert_knot_in_place(
        &mut self,
        abscissa: T,
        multiplicity: usize,
    ) -> KnotResult<()> {
        self.require_normalized()?;
        let knot = Knot::new(abscissa, multiplicity)?;

        if let Some(existing) = self
            .knots
            .iter()
            .find(|knot| knot.abscissa().coincides_with(abscissa))
        {
            return Err(KnotSequenceError::KnotCoincidence {
                abscissa: abscissa.to_report(),
                existing: existing.abscissa().to_report(),
            });
        }

        let (origin, u_max) = (self.origin(), self.u_max());
        if !(abscissa > origin && abscissa < u_max) {
            return Err(KnotSequenceError::AbscissaOutOfRange {
                abscissa: abscissa.to_report(),
                origin: origin.to_report(),
                u_max: u_max.to_report(),
            });
        }

        let position =
            self.knots.partition_point(|knot| knot.abscissa() < abscissa);
        let cap = P::multiplicity_cap(
            position,
            self.knots.len() + 1,
            self.max_multiplicity_order,
            self.up_to_c0_discontinuity,
        );
        if multiplicity > cap {
            return Err(KnotSequenceError::MultiplicityExceedsMaximum {
                index: position,
                multiplicity,
                cap,
            });
        }

        self.knots.insert(position, knot);
        self.refresh();
        Ok(())
    }

    pub(crate) fn raise_knot_multiplicity_in_place(
        &mut self,
        indices: &[L::Index],
        amount: usize,
        check_consistency: bool,
    ) -> KnotResult<()> {
        let positions = self.compact_positions(indices)?;
        if check_consistency {
            self.require_normalized()?;
        }

        let len = self.knots.len();
        let mut total = index::occurrence_count(&self.knots);
        for position in positions {
            let current = self.knots[position].multiplicity();
            let multiplicity = current.saturating_add(amount);
            if check_consistency {
                self.check_inside_basis(position)?;
                let cap = P::multiplicity_cap(
                    position,
                    len,
                    self.max_multiplicity_order,
                    self.up_to_c0_discontinuity,
                );
                if multiplicity > cap {
                    return Err(KnotSequenceError::MultiplicityExceedsMaximum {
                        index: position,
                        multiplicity,
                        cap,
                    });
                }
            }
            // The occurrence count must stay representable.
            total = total.checked_add(amount).ok_or(
                KnotSequenceError::MultiplicityExceedsMaximum {
                    index: position,
                    multiplicity,
                    cap: usize::MAX - (total - current),
                },
            )?;
            self.knots[position].increment_multiplicity(amount);
        }

        if check_consistency {
            self.revalidate()?;
        }
        self.refresh();
        Ok(())
    }

    pub(crate) fn decrement_knot_multiplicity_in_place(
        &mut self,
        indices: &[L::Index],
        check_consistency: bool,
    ) -> KnotResult<()> {
        let mut positions = self.compact_positions(indices)?;
        if check_consistency {
            self.require_normalized()?;
        }
        // Highest first so removals leave lower positions in place.
        positions.sort_unstable_by(|a, b| b.cmp(a));

        let len = self.knots.len();
        for group in positions.chunk_by(|a, b| a == b) {
            let (position, count) = (group[0], group.len());
            P::check_decrement(position, len)?;
            if check_consistency {
                self.check_inside_basis(position)?;
            }

            let multiplicity = self.knots[position].multiplicity();
            if count > multiplicity {
                return Err(KnotSequenceError::MultiplicityBelowOne);
            }
            if count == multiplicity {
                if self.knots.len() == 1 {
                    return Err(KnotSequenceError::InsufficientInterval {
                        remaining: 0,
                        required: 2 * self.max_multiplicity_order,
                    });
                }
                self.knots.remove(position);
            } else {
                for _ in 0..count {
                    self.knots[position].decrement_multiplicity()?;
                }
            }
        }

        if check_consistency {
            self.revalidate()?;
        }
        self.refresh();
        Ok(())
    }

    pub(crate) fn revert_in_place(&mut self) {
        let half = T::from_f64(0.5).unwrap_or_else(T::zero);
        let middle = self.origin().lerp(self.u_max(), half);
        self.knots.reverse();
        for knot in &mut self.knots {
            knot.set_abscissa(middle + (middle - knot.abscissa()));
        }
        self.refresh();
    }

    fn compact_positions(
        &self,
        indices: &[L::Index],
    ) -> KnotResult<Vec<usize>> {
        indices
            .iter()
            .map(|&index| L::compact_position(&self.knots, index))
            .collect()
    }

    /// Rejects changes to knots delimiting or lying outside the basis.
    fn check_inside_basis(&self, position: usize) -> KnotResult<()> {
        let start = self.bounds.start.knot_index.get();
        let end = self.bounds.end.knot_index.get();
        if position <= start || position >= end {
            return Err(KnotSequenceError::ModifyingNormalizedBasis {
                index: position,
            });
        }
        Ok(())
    }

    fn revalidate(&self) -> KnotResult<()> {
        build::validate::<T, P>(
            &self.knots,
            self.max_multiplicity_order,
            self.up_to_c0_discontinuity,
        )
    }
}
