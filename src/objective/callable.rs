//! Wrapper around user-supplied objective functions.
//!
//! Objective functions take the samples and, optionally, the candidate
//! inputs that produced them. Older code passed functions of the samples
//! alone; those are still accepted through [`ObjectiveFn::single_arg`],
//! which logs a deprecation warning when the wrapper is built.

use core::fmt;
use std::sync::Arc;

use ndarray::{ArrayD, ArrayViewD};

/// Advisory logged when a single-argument objective function is wrapped.
pub const SINGLE_ARG_DEPRECATION: &str = "The `objective` callable of `GenericMCObjective` is \
    expected to take two arguments. Passing a callable that expects a single argument will \
    result in an error in future versions.";

type SingleArgFn = dyn Fn(ArrayViewD<'_, f64>) -> ArrayD<f64> + Send + Sync;
type TwoArgFn = dyn Fn(ArrayViewD<'_, f64>, Option<ArrayViewD<'_, f64>>) -> ArrayD<f64> + Send + Sync;

#[derive(Clone)]
enum Inner {
    SingleArg(Arc<SingleArgFn>),
    TwoArg(Arc<TwoArgFn>),
}

/// An objective function of `(samples, x)`, or of `samples` alone.
///
/// # Examples
///
/// ```
/// use acquisition::objective::ObjectiveFn;
/// use ndarray::{ArrayD, Axis, IxDyn};
///
/// let sum_of_squares = ObjectiveFn::new(|samples, _x| {
///     samples.mapv(|v| v * v).sum_axis(Axis(samples.ndim() - 1))
/// });
///
/// let samples = ArrayD::from_elem(IxDyn(&[3, 2]), 1.0);
/// let out = sum_of_squares.call(samples.view(), None);
/// assert_eq!(out.shape(), &[3]);
/// assert!(!sum_of_squares.is_single_arg());
/// ```
#[derive(Clone)]
pub struct ObjectiveFn {
    inner: Inner,
}

impl ObjectiveFn {
    /// Wraps a function of the samples and the optional candidate inputs.
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(ArrayViewD<'_, f64>, Option<ArrayViewD<'_, f64>>) -> ArrayD<f64>
            + Send
            + Sync
            + 'static,
    {
        Self {
            inner: Inner::TwoArg(Arc::new(f)),
        }
    }

    /// Wraps a legacy function of the samples alone.
    ///
    /// Candidate inputs are ignored when the function is called. Logs
    /// [`SINGLE_ARG_DEPRECATION`] as a `tracing` warning.
    #[must_use]
    #[deprecated(note = "objective functions should accept `(samples, x)`; use `ObjectiveFn::new`")]
    pub fn single_arg<F>(f: F) -> Self
    where
        F: Fn(ArrayViewD<'_, f64>) -> ArrayD<f64> + Send + Sync + 'static,
    {
        tracing::warn!(target: "acquisition::deprecation", "{}", SINGLE_ARG_DEPRECATION);
        Self {
            inner: Inner::SingleArg(Arc::new(f)),
        }
    }

    /// Returns `true` if this wraps a legacy single-argument function.
    #[must_use]
    pub fn is_single_arg(&self) -> bool {
        matches!(self.inner, Inner::SingleArg(_))
    }

    /// Invoke the wrapped function.
    #[must_use]
    pub fn call(
        &self,
        samples: ArrayViewD<'_, f64>,
        x: Option<ArrayViewD<'_, f64>>,
    ) -> ArrayD<f64> {
        match &self.inner {
            Inner::SingleArg(f) => f(samples),
            Inner::TwoArg(f) => f(samples, x),
        }
    }
}

impl fmt::Debug for ObjectiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_single_arg() {
            "single_arg"
        } else {
            "two_arg"
        };
        f.debug_struct("ObjectiveFn").field("kind", &kind).finish()
    }
}
