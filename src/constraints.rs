//! Smooth constraint handling for Monte-Carlo objectives.
//!
//! A constraint maps a batch of samples of shape `(..., q, m)` to one value
//! per candidate point, shape `(..., q)`. Values `<= 0` are feasible and
//! values `> 0` are infeasible. Rather than zeroing out infeasible samples,
//! each constraint is turned into a soft indicator
//!
//! ```text
//! s(c) = sigmoid(-c / eta)
//! ```
//!
//! which tends to 1 for strongly feasible and 0 for strongly infeasible
//! values. Smaller `eta` sharpens the step. Because the penalty never
//! branches, the penalized objective stays differentiable in the samples.
//!
//! # Examples
//!
//! ```
//! use acquisition::constraints::{DEFAULT_ETA, apply_constraints, constraint};
//! use ndarray::{ArrayD, Axis, IxDyn};
//!
//! let samples = ArrayD::from_elem(IxDyn(&[4, 3, 2]), 0.5);
//! let obj = ArrayD::from_elem(IxDyn(&[4, 3]), 2.0);
//!
//! // Feasible when the first outcome stays below 1.
//! let below_one = constraint(|s| s.index_axis(Axis(2), 0).mapv(|v| v - 1.0));
//!
//! let penalized = apply_constraints(obj, &[below_one], samples.view(), 0.0, DEFAULT_ETA).unwrap();
//! assert!(penalized.iter().all(|&v| (v - 2.0).abs() < 1e-12));
//! ```

use std::sync::Arc;

use ndarray::{ArrayD, ArrayViewD};

use crate::error::{Error, Result};
use crate::shape::zip_broadcast;

/// Default sharpness of the sigmoid feasibility indicator.
pub const DEFAULT_ETA: f64 = 1e-3;

/// Default value approached by infeasible samples.
pub const DEFAULT_INFEASIBLE_COST: f64 = 0.0;

/// A constraint over Monte-Carlo samples.
///
/// Maps samples of shape `(..., q, m)` to values of shape `(..., q)`, where
/// `<= 0` means feasible.
pub type ConstraintFn = Arc<dyn Fn(ArrayViewD<'_, f64>) -> ArrayD<f64> + Send + Sync>;

/// Wrap a closure as a [`ConstraintFn`].
#[must_use]
pub fn constraint<F>(f: F) -> ConstraintFn
where
    F: Fn(ArrayViewD<'_, f64>) -> ArrayD<f64> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn check_eta(eta: f64) -> Result<()> {
    if eta > 0.0 && eta.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidEta(eta))
    }
}

/// Soft feasibility indicator `sigmoid(-lhs / eta)`, applied elementwise.
///
/// # Errors
///
/// Returns [`Error::InvalidEta`] if `eta` is not positive and finite.
pub fn soft_eval_constraint(lhs: &ArrayD<f64>, eta: f64) -> Result<ArrayD<f64>> {
    check_eta(eta)?;
    Ok(lhs.mapv(|c| sigmoid(-c / eta)))
}

/// Product of the soft indicators of all constraints, or `None` if there
/// are no constraints.
fn feasibility_weight(
    constraints: &[ConstraintFn],
    samples: &ArrayViewD<'_, f64>,
    eta: f64,
) -> Result<Option<ArrayD<f64>>> {
    let mut weight: Option<ArrayD<f64>> = None;
    for c in constraints {
        let indicator = soft_eval_constraint(&c(samples.view()), eta)?;
        weight = Some(match weight {
            None => indicator,
            Some(w) => zip_broadcast(&w.view(), &indicator.view(), |a, b| a * b)?,
        });
    }
    Ok(weight)
}

/// Penalize a non-negative objective by the soft feasibility of `samples`.
///
/// `obj` is clamped at zero and multiplied by every constraint's soft
/// indicator, so infeasible samples are pulled towards zero.
///
/// # Errors
///
/// Returns [`Error::InvalidEta`] for a non-positive `eta` and
/// [`Error::Broadcast`] if a constraint output cannot be broadcast against
/// `obj`.
pub fn apply_constraints_nonnegative_soft(
    obj: ArrayD<f64>,
    constraints: &[ConstraintFn],
    samples: ArrayViewD<'_, f64>,
    eta: f64,
) -> Result<ArrayD<f64>> {
    check_eta(eta)?;
    let obj = obj.mapv_into(|v| v.max(0.0));
    match feasibility_weight(constraints, &samples, eta)? {
        Some(weight) => zip_broadcast(&obj.view(), &weight.view(), |o, w| o * w),
        None => Ok(obj),
    }
}

/// Fold a set of constraints into an objective with a smooth penalty.
///
/// Computes `(obj - infeasible_cost) * w + infeasible_cost`, where `w` is the
/// product of [`soft_eval_constraint`] over all constraints evaluated on
/// `samples`. As any constraint grows towards `+inf` the result approaches
/// `infeasible_cost`; when all constraints tend to `-inf` it approaches
/// `obj`. With no constraints `obj` is returned unchanged.
///
/// # Arguments
///
/// * `obj` - Objective values of shape `(..., q)`.
/// * `constraints` - Constraint callables, each producing shape `(..., q)`.
/// * `samples` - The samples the objective was computed from, `(..., q, m)`.
/// * `infeasible_cost` - Value assigned to fully infeasible samples.
/// * `eta` - Sigmoid temperature; smaller is closer to a hard step.
///
/// # Errors
///
/// Returns [`Error::InvalidEta`] for a non-positive `eta` and
/// [`Error::Broadcast`] if a constraint output cannot be broadcast against
/// `obj`.
pub fn apply_constraints(
    obj: ArrayD<f64>,
    constraints: &[ConstraintFn],
    samples: ArrayViewD<'_, f64>,
    infeasible_cost: f64,
    eta: f64,
) -> Result<ArrayD<f64>> {
    check_eta(eta)?;
    let Some(weight) = feasibility_weight(constraints, &samples, eta)? else {
        return Ok(obj);
    };
    zip_broadcast(&obj.view(), &weight.view(), |o, w| {
        (o - infeasible_cost) * w + infeasible_cost
    })
}

#[cfg(test)]
mod tests {
    use ndarray::{Axis, IxDyn};

    use super::*;

    fn constant(value: f64) -> ConstraintFn {
        constraint(move |s| {
            let shape = &s.shape()[..s.ndim().saturating_sub(1)];
            ArrayD::from_elem(IxDyn(shape), value)
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn samples() -> ArrayD<f64> {
        ArrayD::from_shape_fn(IxDyn(&[4, 3, 2]), |ix| (ix[0] + ix[1] + ix[2]) as f64)
    }

    fn objective() -> ArrayD<f64> {
        samples().sum_axis(Axis(2))
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(-1e6), 0.0);
        assert_eq!(sigmoid(1e6), 1.0);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn soft_eval_rejects_bad_eta() {
        let lhs = ArrayD::zeros(IxDyn(&[2]));
        assert!(matches!(soft_eval_constraint(&lhs, 0.0), Err(Error::InvalidEta(_))));
        assert!(matches!(soft_eval_constraint(&lhs, -1.0), Err(Error::InvalidEta(_))));
        assert!(soft_eval_constraint(&lhs, f64::NAN).is_err());
    }

    #[test]
    fn soft_eval_at_boundary_is_half() {
        let lhs = ArrayD::zeros(IxDyn(&[3]));
        let s = soft_eval_constraint(&lhs, 1e-3).unwrap();
        assert!(s.iter().all(|&v| (v - 0.5).abs() < 1e-15));
    }

    #[test]
    fn no_constraints_returns_objective() {
        let out = apply_constraints(objective(), &[], samples().view(), 5.0, DEFAULT_ETA).unwrap();
        assert_eq!(out, objective());
    }

    #[test]
    fn feasible_constraint_keeps_objective() {
        let out =
            apply_constraints(objective(), &[constant(-1.0)], samples().view(), 0.0, DEFAULT_ETA)
                .unwrap();
        for (a, b) in out.iter().zip(objective().iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn infeasible_constraint_yields_infeasible_cost() {
        let out =
            apply_constraints(objective(), &[constant(1.0)], samples().view(), 5.0, DEFAULT_ETA)
                .unwrap();
        assert_eq!(out.shape(), &[4, 3]);
        assert!(out.iter().all(|&v| (v - 5.0).abs() < 1e-9));
    }

    #[test]
    fn mixed_constraints_are_combined() {
        let out = apply_constraints(
            objective(),
            &[constant(-1.0), constant(1.0)],
            samples().view(),
            0.0,
            DEFAULT_ETA,
        )
        .unwrap();
        assert!(out.iter().all(|&v| v.abs() < 1e-9));
    }

    #[test]
    fn boundary_constraint_halves_shifted_objective() {
        let out =
            apply_constraints(objective(), &[constant(0.0)], samples().view(), 1.0, 0.1).unwrap();
        for (a, b) in out.iter().zip(objective().iter()) {
            assert!((a - ((b - 1.0) * 0.5 + 1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn larger_eta_softens_the_penalty() {
        let sharp =
            apply_constraints(objective(), &[constant(0.01)], samples().view(), 0.0, 1e-3).unwrap();
        let soft =
            apply_constraints(objective(), &[constant(0.01)], samples().view(), 0.0, 1.0).unwrap();
        // Positive objective entries lose more under the sharp penalty.
        for ((s, w), o) in sharp.iter().zip(soft.iter()).zip(objective().iter()) {
            if *o > 0.0 {
                assert!(s < w);
            }
        }
    }

    #[test]
    fn mismatched_constraint_shape_errors() {
        let wrong = constraint(|_| ArrayD::zeros(IxDyn(&[7])));
        let err = apply_constraints(objective(), &[wrong], samples().view(), 0.0, DEFAULT_ETA)
            .unwrap_err();
        assert!(matches!(err, Error::Broadcast { .. }));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn nonnegative_soft_clamps_negative_objective() {
        let obj = ArrayD::from_shape_vec(IxDyn(&[2]), vec![-3.0, 2.0]).unwrap();
        let s = ArrayD::zeros(IxDyn(&[2, 1]));
        let out =
            apply_constraints_nonnegative_soft(obj, &[constant(-1.0)], s.view(), DEFAULT_ETA)
                .unwrap();
        assert_eq!(out[[0]], 0.0);
        assert!((out[[1]] - 2.0).abs() < 1e-12);
    }
}
