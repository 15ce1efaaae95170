use crate::{Abscissa, KnotResult, KnotSequenceError};

/// A knot: an abscissa together with its multiplicity.
///
/// The multiplicity is at least `1`. Knots are only created from validated
/// input and only mutated by the sequence that owns them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knot<T> {
    abscissa: T,
    multiplicity: usize,
}

impl<T: Abscissa> Knot<T> {
    /// Creates a knot at `abscissa` occurring `multiplicity` times.
    ///
    /// # Errors
    /// [`KnotSequenceError::MultiplicityBelowOne`] for a zero multiplicity
    /// and, with the `sentinel_check` feature,
    /// [`KnotSequenceError::UninitializedAbscissa`] if `abscissa` equals
    /// [`UNINITIALIZED_ABSCISSA`](crate::UNINITIALIZED_ABSCISSA).
    pub fn new(abscissa: T, multiplicity: usize) -> KnotResult<Self> {
        check_abscissa(abscissa)?;
        if multiplicity == 0 {
            return Err(KnotSequenceError::MultiplicityBelowOne);
        }
        Ok(Self {
            abscissa,
            multiplicity,
        })
    }

    /// Copy of this knot moved by `offset`, occurring `multiplicity` times.
    pub(crate) fn shifted(&self, offset: T, multiplicity: usize) -> Self {
        Self {
            abscissa: self.abscissa + offset,
            multiplicity,
        }
    }
}

impl<T: Copy> Knot<T> {
    #[inline]
    pub fn abscissa(&self) -> T {
        self.abscissa
    }

    #[inline]
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    pub(crate) fn set_abscissa(&mut self, abscissa: T) {
        self.abscissa = abscissa;
    }

    pub(crate) fn increment_multiplicity(&mut self, amount: usize) {
        self.multiplicity += amount;
    }

    /// Lowers the multiplicity by one occurrence.
    ///
    /// Removing the last occurrence is the owning sequence's job.
    pub(crate) fn decrement_multiplicity(&mut self) -> KnotResult<()> {
        if self.multiplicity <= 1 {
            return Err(KnotSequenceError::MultiplicityBelowOne);
        }
        self.multiplicity -= 1;
        Ok(())
    }

    /// Drops `amount` occurrences; the caller guarantees at least one stays.
    pub(crate) fn reduce_multiplicity(&mut self, amount: usize) {
        self.multiplicity -= amount;
    }
}

#[cfg(feature = "sentinel_check")]
pub(crate) fn check_abscissa<T: Abscissa>(abscissa: T) -> KnotResult<()> {
    if abscissa.to_f64() == Some(crate::UNINITIALIZED_ABSCISSA) {
        return Err(KnotSequenceError::UninitializedAbscissa {
            abscissa: abscissa.to_report(),
        });
    }
    Ok(())
}

#[cfg(not(feature = "sentinel_check"))]
#[inline]
pub(crate) fn check_abscissa<T: Abscissa>(_abscissa: T) -> KnotResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_multiplicity_is_rejected() {
        assert_eq!(
            Knot::new(0.5, 0),
            Err(KnotSequenceError::MultiplicityBelowOne)
        );
    }

    #[cfg(feature = "sentinel_check")]
    #[test]
    fn sentinel_abscissa_is_rejected() {
        assert_eq!(
            Knot::new(crate::UNINITIALIZED_ABSCISSA, 1),
            Err(KnotSequenceError::UninitializedAbscissa {
                abscissa: crate::UNINITIALIZED_ABSCISSA
            })
        );
        // Anything else, however close, is a valid position.
        assert!(Knot::new(crate::UNINITIALIZED_ABSCISSA + 1.0e-3, 1).is_ok());
    }

    #[test]
    fn multiplicity_never_drops_below_one() {
        let mut knot = Knot::new(1.0f32, 2).unwrap();
        knot.decrement_multiplicity().unwrap();
        assert_eq!(knot.multiplicity(), 1);
        assert_eq!(
            knot.decrement_multiplicity(),
            Err(KnotSequenceError::MultiplicityBelowOne)
        );
    }
}
