//! Shape checks and NumPy-style broadcasting shared by the objectives,
//! the posterior transform and the constraint penalty.
//!
//! ndarray only broadcasts one operand against a fixed target, so binary
//! operations here first resolve the common shape with [`broadcast_shape`]
//! and then broadcast both sides to it.

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Zip};

use crate::error::{Error, Result};

/// Resolve the shape two arrays broadcast to.
///
/// Axes are aligned from the right; each pair must be equal or contain a 1.
pub(crate) fn broadcast_shape(left: &[usize], right: &[usize]) -> Result<Vec<usize>> {
    let ndim = left.len().max(right.len());
    let mut shape = vec![0; ndim];
    for (i, out) in shape.iter_mut().enumerate() {
        // Missing leading axes behave like size 1.
        let l = (i + left.len()).checked_sub(ndim).map_or(1, |j| left[j]);
        let r = (i + right.len()).checked_sub(ndim).map_or(1, |j| right[j]);
        *out = match (l, r) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => {
                return Err(Error::Broadcast {
                    left: left.to_vec(),
                    right: right.to_vec(),
                });
            }
        };
    }
    Ok(shape)
}

/// Combine two arrays elementwise after broadcasting them to a common shape.
pub(crate) fn zip_broadcast<F>(
    left: &ArrayViewD<'_, f64>,
    right: &ArrayViewD<'_, f64>,
    f: F,
) -> Result<ArrayD<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    let shape = broadcast_shape(left.shape(), right.shape())?;
    let mismatch = || Error::Broadcast {
        left: left.shape().to_vec(),
        right: right.shape().to_vec(),
    };
    let l = left.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
    let r = right.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
    Ok(Zip::from(&l).and(&r).map_collect(|&a, &b| f(a, b)))
}

/// Ensure the trailing axis of `shape` has exactly `expected` entries.
///
/// Unlike broadcasting, a trailing axis of size 1 is rejected unless
/// `expected == 1`, and a 0-d shape never matches.
pub(crate) fn check_outcome_axis(shape: &[usize], expected: usize) -> Result<()> {
    match shape.last() {
        Some(&m) if m == expected => Ok(()),
        _ => Err(Error::OutcomeMismatch {
            expected,
            shape: shape.to_vec(),
        }),
    }
}

/// Drop the last axis if it has size 1; otherwise return the array unchanged.
pub(crate) fn squeeze_last(samples: ArrayViewD<'_, f64>) -> ArrayD<f64> {
    if samples.shape().last() == Some(&1) {
        let axis = Axis(samples.ndim() - 1);
        samples.index_axis_move(axis, 0).to_owned()
    } else {
        samples.to_owned()
    }
}

/// Index of the last axis. Callers must have checked that `ndim > 0`.
pub(crate) fn last_axis(array: &ArrayViewD<'_, f64>) -> Axis {
    Axis(array.ndim() - 1)
}
