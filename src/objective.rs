//! Monte-Carlo acquisition objectives.
//!
//! An objective turns a batch of posterior samples of shape
//! `(sample_shape..., batch_shape..., q, m)` into one utility per candidate
//! point, shape `(sample_shape..., batch_shape..., q)`. Acquisition functions
//! then reduce over the sample dimensions.
//!
//! | Objective | Behaviour |
//! |-----------|-----------|
//! | [`IdentityMCObjective`] | Drops a trailing outcome axis of size 1 |
//! | [`LinearMCObjective`] | Weighted sum over outcomes |
//! | [`GenericMCObjective`] | Arbitrary user function |
//! | [`ConstrainedMCObjective`] | User function with smooth constraint penalty |
//!
//! [`MCAcquisitionObjective`] is a trait, so it cannot be instantiated on
//! its own:
//!
//! ```compile_fail
//! use acquisition::objective::MCAcquisitionObjective;
//!
//! let objective = MCAcquisitionObjective;
//! ```
//!
//! # Implementing a custom objective
//!
//! ```
//! use acquisition::Result;
//! use acquisition::objective::MCAcquisitionObjective;
//! use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
//!
//! /// Best outcome per point.
//! struct MaxOutcome;
//!
//! impl MCAcquisitionObjective for MaxOutcome {
//!     fn forward(
//!         &self,
//!         samples: ArrayViewD<'_, f64>,
//!         _x: Option<ArrayViewD<'_, f64>>,
//!     ) -> Result<ArrayD<f64>> {
//!         let axis = Axis(samples.ndim() - 1);
//!         Ok(samples.map_axis(axis, |lane| lane.fold(f64::NEG_INFINITY, |a, &b| a.max(b))))
//!     }
//! }
//!
//! let samples = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 3.0, 4.0, 2.0]).unwrap();
//! let out = MaxOutcome.evaluate(samples.view(), None).unwrap();
//! assert_eq!(out.as_slice().unwrap(), &[3.0, 4.0]);
//! ```

mod callable;
mod constrained;
mod generic;
mod identity;
mod linear;

pub use callable::{ObjectiveFn, SINGLE_ARG_DEPRECATION};
pub use constrained::{ConstrainedMCObjective, ConstrainedMCObjectiveBuilder};
pub use generic::GenericMCObjective;
pub use identity::IdentityMCObjective;
pub use linear::LinearMCObjective;
use ndarray::{ArrayD, ArrayViewD};

use crate::error::{Error, Result};

/// Scalarizes Monte-Carlo samples into one utility per candidate point.
///
/// Implementors provide [`forward`](MCAcquisitionObjective::forward);
/// callers use [`evaluate`](MCAcquisitionObjective::evaluate), which adds
/// the optional output-shape check against the candidate inputs. The trait
/// requires `Send + Sync` so objectives can be shared across threads.
pub trait MCAcquisitionObjective: Send + Sync {
    /// Compute the objective for `samples` of shape `(..., q, m)`.
    ///
    /// `x` holds the candidate inputs of shape `(..., q, d)` that produced
    /// the samples, if known.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` have a shape the objective cannot
    /// reduce.
    fn forward(
        &self,
        samples: ArrayViewD<'_, f64>,
        x: Option<ArrayViewD<'_, f64>>,
    ) -> Result<ArrayD<f64>>;

    /// Whether [`evaluate`](MCAcquisitionObjective::evaluate) checks the
    /// output's q-batch size against `x`.
    ///
    /// Default: `true`.
    fn verifies_output_shape(&self) -> bool {
        true
    }

    /// Compute the objective and, if enabled, verify its shape.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`forward`](MCAcquisitionObjective::forward).
    /// Returns [`Error::OutputShapeMismatch`] when verification is enabled,
    /// `x` is given, and the output's last axis differs from `x`'s
    /// second-to-last axis.
    fn evaluate(
        &self,
        samples: ArrayViewD<'_, f64>,
        x: Option<ArrayViewD<'_, f64>>,
    ) -> Result<ArrayD<f64>> {
        let output = self.forward(samples, x.clone())?;
        if self.verifies_output_shape()
            && let Some(x) = x
        {
            verify_output_shape(&output, &x)?;
        }
        Ok(output)
    }
}

/// Check that `output` has as many candidate points as `x`.
fn verify_output_shape(output: &ArrayD<f64>, x: &ArrayViewD<'_, f64>) -> Result<()> {
    let q_out = output.shape().last();
    let q_x = x.ndim().checked_sub(2).map(|i| x.shape()[i]);
    match (q_out, q_x) {
        (Some(&a), Some(b)) if a == b => Ok(()),
        _ => Err(Error::OutputShapeMismatch {
            output: output.shape().to_vec(),
            x: x.shape().to_vec(),
        }),
    }
}
