//! Error types for knot sequence operations.

use core::fmt;
use thiserror::Error;

/// One of the two ends of a knot sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extremity {
    Start,
    End,
}

impl fmt::Display for Extremity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extremity::Start => f.write_str("start"),
            Extremity::End => f.write_str("end"),
        }
    }
}

/// Errors that can occur while building, querying or mutating a knot
/// sequence.
///
/// Abscissae are reported as `f64` regardless of the scalar type the
/// sequence was built with.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum KnotSequenceError {
    /// The maximal multiplicity order is too small for the flavor.
    #[error("{flavor}: maximal multiplicity order must be at least {minimum}. Found: {value}")]
    InvalidMaxMultiplicityOrder {
        flavor: &'static str,
        value: usize,
        minimum: usize,
    },

    /// The requested basis has fewer functions than the order.
    #[error("B-spline basis size must be at least {minimum}. Found: {basis_size}")]
    InsufficientBasisSize { basis_size: usize, minimum: usize },

    /// The flavor cannot be built from this configuration.
    #[error("{flavor} does not accept a {config} configuration")]
    UnsupportedConfiguration {
        flavor: &'static str,
        config: &'static str,
    },

    /// No knots were given.
    #[error("The knot array is empty")]
    EmptyKnots,

    /// Abscissa and multiplicity arrays have different lengths.
    #[error("Knot and multiplicity arrays differ in length: {knots} knots, {multiplicities} multiplicities")]
    LengthMismatch { knots: usize, multiplicities: usize },

    /// A flat abscissa list decreases somewhere.
    #[error("Knot abscissae must be non-decreasing: {current} at index {index} follows {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// Distinct abscissae repeat or decrease.
    #[error("Knot abscissae must be strictly increasing: {current} at index {index} follows {previous}")]
    NotStrictlyIncreasing {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// A knot sits on the reserved uninitialized abscissa.
    #[error("Abscissa {abscissa} is the reserved uninitialized value")]
    UninitializedAbscissa { abscissa: f64 },

    /// A multiplicity is zero or exceeds the order.
    #[error("Multiplicity of knot {index} must lie in [1, {max}]. Found: {multiplicity}")]
    MultiplicityOutOfRange {
        index: usize,
        multiplicity: usize,
        max: usize,
    },

    /// An interior knot exceeds its multiplicity cap.
    #[error("Knot {index} has multiplicity {multiplicity}; interior knots are capped at {cap}")]
    InteriorMultiplicityTooLarge {
        index: usize,
        multiplicity: usize,
        cap: usize,
    },

    /// No normalized basis can be formed from one end.
    #[error("Cumulative multiplicity at sequence {extremity} is {cumulative}, a normalized basis needs {required}")]
    InsufficientCumulativeMultiplicity {
        extremity: Extremity,
        cumulative: usize,
        required: usize,
    },

    /// One end carries more occurrences than the basis uses.
    #[error("Normalized basis is over-defined at sequence {extremity}")]
    OverDefinedBasis { extremity: Extremity },

    /// The normalized basis has zero or negative width.
    #[error("Normalized basis [{origin}, {u_max}] has no positive width")]
    NonPositiveBasisWidth { origin: f64, u_max: f64 },

    /// A clamped open sequence does not start at the origin.
    #[error("Knot sequence with full end multiplicities must start at the origin. Found first knot at: {first}")]
    OriginInconsistentWithNonUniformEnds { first: f64 },

    /// The closure point has different multiplicities at both ends.
    #[error("Periodic knot sequence end multiplicities differ: {start} at start, {end} at end")]
    PeriodicEndMultiplicityMismatch { start: usize, end: usize },

    /// An occurrence index lies past the last occurrence.
    #[error("Expanded knot index {index} is out of range. Sequence has {len} knot occurrences")]
    ExpandedIndexOutOfRange { index: usize, len: usize },

    /// A distinct knot index lies past the last knot.
    #[error("Compact knot index {index} is out of range. Sequence has {len} distinct knots")]
    CompactIndexOutOfRange { index: usize, len: usize },

    /// An abscissa lies outside the normalized basis.
    #[error("Abscissa {abscissa} lies outside the normalized basis [{origin}, {u_max}]")]
    AbscissaOutOfRange {
        abscissa: f64,
        origin: f64,
        u_max: f64,
    },

    /// A new knot would coincide with an existing one.
    #[error("Abscissa {abscissa} coincides with the existing knot at {existing}")]
    KnotCoincidence { abscissa: f64, existing: f64 },

    /// Raising a multiplicity would exceed its cap.
    #[error("Multiplicity {multiplicity} of knot {index} would exceed the cap of {cap}")]
    MultiplicityExceedsMaximum {
        index: usize,
        multiplicity: usize,
        cap: usize,
    },

    /// A checked mutation would touch a basis bound or a knot outside the
    /// basis.
    #[error("Changing knot {index} would modify the normalized basis")]
    ModifyingNormalizedBasis { index: usize },

    /// A periodic sequence extremity cannot be decremented.
    #[error("Knot {index} is a periodic sequence extremity and cannot be decremented")]
    SequenceOriginRemoval { index: usize },

    /// More occurrences were removed than the knot carries.
    #[error("Knot multiplicity cannot drop below 1")]
    MultiplicityBelowOne,

    /// A knot is too multiple for the periodic form.
    #[error("Knot {index} has multiplicity {multiplicity}, too large to convert into a periodic sequence")]
    MultiplicityTooLargeForConversion { index: usize, multiplicity: usize },

    /// Too few occurrences remain for a single span.
    #[error("Only {remaining} knot occurrences remain, a normalized basis needs at least {required}")]
    InsufficientInterval { remaining: usize, required: usize },
}

/// Result type for knot sequence operations.
pub type KnotResult<T> = Result<T, KnotSequenceError>;
