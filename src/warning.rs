//! Non-fatal diagnostics.
//!
//! Queries that can answer without failing, like
//! [`multiplicity_at()`](crate::KnotSequence::multiplicity_at), report
//! suspicious input through a [`WarningSink`] instead of an error.

/// Receives warnings emitted by knot sequence queries.
///
/// Closures taking `(component, message)` implement this trait:
/// ```
/// use core::cell::RefCell;
/// use knot_sequences::{IncreasingOpenKnotSequence, KnotSequenceConfig};
///
/// let sequence = IncreasingOpenKnotSequence::<f64>::new(
///     2,
///     KnotSequenceConfig::NoKnotOpenCurve,
/// )
/// .unwrap();
///
/// let warnings = RefCell::new(Vec::new());
/// let sink = |component: &str, message: &str| {
///     warnings.borrow_mut().push(format!("{component}: {message}"))
/// };
/// assert_eq!(sequence.multiplicity_at_with(0.5, &sink), 0);
/// assert_eq!(warnings.borrow().len(), 1);
/// ```
pub trait WarningSink {
    fn warn(&self, component: &str, message: &str);
}

/// Forwards warnings to the [`log`] facade at `warn` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWarnings;

impl WarningSink for LogWarnings {
    fn warn(&self, component: &str, message: &str) {
        log::warn!(target: "knot_sequences", "{component}: {message}");
    }
}

impl<F: Fn(&str, &str)> WarningSink for F {
    #[inline]
    fn warn(&self, component: &str, message: &str) {
        self(component, message)
    }
}
