/// How to build a knot sequence.
///
/// `k` below is the maximal multiplicity order passed next to the
/// configuration. Not every flavor accepts every configuration; a
/// mismatch fails with
/// [`UnsupportedConfiguration`](crate::KnotSequenceError::UnsupportedConfiguration).
///
/// | Configuration | Open flavors | Periodic flavors |
/// |---|---|---|
/// | [`NoKnotOpenCurve`](Self::NoKnotOpenCurve) | `[0 (k), 1 (k)]` | – |
/// | [`NoKnotClosedCurve`](Self::NoKnotClosedCurve) | minimal closed curve with wrap-around knots | uniform `0, 1, ..., max(3, k)` |
/// | [`Uniform`](Self::Uniform) | uniform knots, origin at `0` | uniform period `0, 1, ..., basis_size` |
/// | [`UniformlySpreadInterKnots`](Self::UniformlySpreadInterKnots) | `0 (k), 1, ..., n (k)` | – |
/// | [`IncreasingKnots`](Self::IncreasingKnots) and its C0 variant | increasing flavor only | – |
/// | [`PeriodicKnots`](Self::PeriodicKnots) | increasing flavor, wrap-around knots added | increasing flavor |
/// | [`StrictlyIncreasingKnots`](Self::StrictlyIncreasingKnots) and its C0 variant | strictly increasing flavor only | – |
/// | [`PeriodicStrictlyIncreasingKnots`](Self::PeriodicStrictlyIncreasingKnots) | strictly increasing flavor, wrap-around knots added | strictly increasing flavor |
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KnotSequenceConfig<'a, T> {
    /// The smallest open curve: one span, clamped at both ends.
    NoKnotOpenCurve,
    /// The smallest closed curve.
    NoKnotClosedCurve,
    /// Uniformly spaced knots of multiplicity one.
    Uniform { basis_size: usize },
    /// Uniformly spaced knots with full multiplicity at both ends.
    UniformlySpreadInterKnots { basis_size: usize },
    /// Explicit non-decreasing knots, repeated once per occurrence.
    IncreasingKnots { knots: &'a [T] },
    /// As [`IncreasingKnots`](Self::IncreasingKnots), but interior knots
    /// may reach full multiplicity, splitting the curve into C0-joined
    /// pieces.
    IncreasingKnotsUpToC0Discontinuity { knots: &'a [T] },
    /// One period of a closed curve, repeated once per occurrence. First
    /// and last knot are the closure point.
    PeriodicKnots { knots: &'a [T] },
    /// Explicit strictly increasing knots and their multiplicities.
    StrictlyIncreasingKnots {
        knots: &'a [T],
        multiplicities: &'a [usize],
    },
    /// As [`StrictlyIncreasingKnots`](Self::StrictlyIncreasingKnots), but
    /// interior knots may reach full multiplicity.
    StrictlyIncreasingKnotsUpToC0Discontinuity {
        knots: &'a [T],
        multiplicities: &'a [usize],
    },
    /// One period of a closed curve as distinct knots and multiplicities.
    PeriodicStrictlyIncreasingKnots {
        knots: &'a [T],
        multiplicities: &'a [usize],
    },
}

impl<T> KnotSequenceConfig<'_, T> {
    /// The configuration tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoKnotOpenCurve => "NoKnotOpenCurve",
            Self::NoKnotClosedCurve => "NoKnotClosedCurve",
            Self::Uniform { .. } => "Uniform",
            Self::UniformlySpreadInterKnots { .. } => {
                "UniformlySpreadInterKnots"
            }
            Self::IncreasingKnots { .. } => "IncreasingKnots",
            Self::IncreasingKnotsUpToC0Discontinuity { .. } => {
                "IncreasingKnotsUpToC0Discontinuity"
            }
            Self::PeriodicKnots { .. } => "PeriodicKnots",
            Self::StrictlyIncreasingKnots { .. } => "StrictlyIncreasingKnots",
            Self::StrictlyIncreasingKnotsUpToC0Discontinuity { .. } => {
                "StrictlyIncreasingKnotsUpToC0Discontinuity"
            }
            Self::PeriodicStrictlyIncreasingKnots { .. } => {
                "PeriodicStrictlyIncreasingKnots"
            }
        }
    }
}
