use super::KnotSequence;
use crate::{Abscissa, Compact, Expanded, Knot, Topology};
use alloc::vec::Vec;
use core::{iter::FusedIterator, slice};

/// Iterator over every knot occurrence, repeating each abscissa
/// multiplicity times.
#[derive(Clone, Debug)]
pub struct Abscissae<'a, T> {
    knots: &'a [Knot<T>],
    position: usize,
    emitted: usize,
    remaining: usize,
}

impl<'a, T: Copy> Abscissae<'a, T> {
    fn new(knots: &'a [Knot<T>]) -> Self {
        Self {
            knots,
            position: 0,
            emitted: 0,
            remaining: crate::index::occurrence_count(knots),
        }
    }
}

impl<T: Copy> Iterator for Abscissae<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let knot = self.knots.get(self.position)?;
        self.emitted += 1;
        if self.emitted == knot.multiplicity() {
            self.position += 1;
            self.emitted = 0;
        }
        self.remaining -= 1;
        Some(knot.abscissa())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Copy> ExactSizeIterator for Abscissae<'_, T> {}
impl<T: Copy> FusedIterator for Abscissae<'_, T> {}

/// Iterator over the distinct knots of a sequence.
pub type Knots<'a, T> = core::iter::Copied<slice::Iter<'a, Knot<T>>>;

impl<T: Abscissa, P: Topology> KnotSequence<T, Expanded, P> {
    /// Iterates over all knot occurrences in increasing order.
    pub fn iter(&self) -> Abscissae<'_, T> {
        Abscissae::new(&self.knots)
    }

    /// All knot occurrences, e.g. `[0, 0, 0, 0.5, 1, 1, 1]`.
    pub fn abscissae(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Abscissa, P: Topology> KnotSequence<T, Compact, P> {
    /// Iterates over the distinct knots in increasing order.
    pub fn iter(&self) -> Knots<'_, T> {
        self.knots.iter().copied()
    }

    #[inline]
    pub fn knots(&self) -> &[Knot<T>] {
        &self.knots
    }
}

impl<'a, T: Abscissa, P: Topology> IntoIterator
    for &'a KnotSequence<T, Expanded, P>
{
    type Item = T;
    type IntoIter = Abscissae<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Abscissa, P: Topology> IntoIterator
    for &'a KnotSequence<T, Compact, P>
{
    type Item = Knot<T>;
    type IntoIter = Knots<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
