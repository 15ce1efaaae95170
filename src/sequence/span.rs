use super::KnotSequence;
use crate::{index, Abscissa, KnotResult, KnotSequenceError, Layout, Topology};

impl<T: Abscissa, L: Layout, P: Topology> KnotSequence<T, L, P> {
    /// Finds the knot span containing `u`, i.e. the index `i` with
    /// `knot[i] <= u < knot[i + 1]` whose basis functions are non-zero at
    /// `u`.
    ///
    /// `u` may lie up to the coincidence tolerance outside
    /// `[origin(), u_max()]`. At `u_max()` the last non-degenerate span is
    /// returned.
    ///
    /// # Errors
    /// * [`KnotSequenceError::AbscissaOutOfRange`] if `u` lies outside the
    ///   normalized basis or is NaN.
    /// * [`KnotSequenceError::InsufficientCumulativeMultiplicity`] if the
    ///   sequence has no normalized basis.
    /// * [`KnotSequenceError::NonPositiveBasisWidth`] if both basis bounds
    ///   sit on the same knot.
    ///
    /// # Examples
    /// ```
    /// use knot_sequences::{
    ///     ExpandedIndex, IncreasingOpenKnotSequence, KnotSequenceConfig,
    /// };
    ///
    /// let knots = [0.0, 0.0, 0.0, 0.0, 0.5, 0.6, 0.7, 0.7, 1.0, 1.0, 1.0, 1.0];
    /// let sequence = IncreasingOpenKnotSequence::<f64>::new(
    ///     4,
    ///     KnotSequenceConfig::IncreasingKnots { knots: &knots },
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(sequence.find_span(0.0), Ok(ExpandedIndex::new(3)));
    /// assert_eq!(sequence.find_span(0.65), Ok(ExpandedIndex::new(5)));
    /// assert_eq!(sequence.find_span(1.0), Ok(ExpandedIndex::new(7)));
    /// ```
    pub fn find_span(&self, u: T) -> KnotResult<L::Index> {
        let span = self.find_expanded_span(u)?;
        L::from_expanded(&self.knots, span)
    }

    /// Span of `u` as an occurrence position.
    pub(crate) fn find_expanded_span(&self, u: T) -> KnotResult<usize> {
        self.require_normalized()?;

        let start = self.bounds.start.knot_index.get();
        let end = self.bounds.end.knot_index.get();
        let (origin, u_max) = (self.origin(), self.u_max());
        let empty_basis = || KnotSequenceError::NonPositiveBasisWidth {
            origin: origin.to_report(),
            u_max: u_max.to_report(),
        };
        // Unchecked mutations can collapse both bounds onto one knot.
        if start >= end {
            return Err(empty_basis());
        }

        let tolerance = T::coincidence_tolerance();
        if u.is_nan() || u < origin - tolerance || u > u_max + tolerance {
            return Err(KnotSequenceError::AbscissaOutOfRange {
                abscissa: u.to_report(),
                origin: origin.to_report(),
                u_max: u_max.to_report(),
            });
        }

        if let Some(coincident) = self.knots[start..=end]
            .iter()
            .position(|knot| knot.abscissa().coincides_with(u))
        {
            return self
                .coincident_span(start + coincident, end)
                .ok_or_else(empty_basis);
        }

        let mut j = end;
        while j > start && u < self.knots[j].abscissa() {
            j -= 1;
        }
        index::cumulative_multiplicity(&self.knots, j)
            .checked_sub(1)
            .ok_or_else(empty_basis)
    }

    /// Span of an abscissa sitting on knot `j` of the basis, `None` if no
    /// span precedes it.
    fn coincident_span(&self, j: usize, end: usize) -> Option<usize> {
        let span =
            index::cumulative_multiplicity(&self.knots, j).checked_sub(1)?;
        if j < end {
            return Some(span);
        }

        let first = index::first_occurrence(&self.knots, j);
        let total = index::occurrence_count(&self.knots);
        if self.is_knot_multiplicity_uniform
            && total.checked_sub(self.max_multiplicity_order) == Some(first)
        {
            // Uniform end: the last span ends on this knot.
            span.checked_sub(1)
        } else {
            // Clamp onto the span ending at u_max.
            first.checked_sub(1)
        }
    }
}
