use ndarray::{ArrayD, ArrayViewD};

use super::{MCAcquisitionObjective, ObjectiveFn};
use crate::error::Result;

/// Objective computed by an arbitrary user function.
///
/// # Examples
///
/// ```
/// use acquisition::objective::{GenericMCObjective, MCAcquisitionObjective, ObjectiveFn};
/// use ndarray::{ArrayD, Axis, IxDyn};
///
/// // Log of the squared norm over outcomes.
/// let objective = GenericMCObjective::new(ObjectiveFn::new(|samples, _x| {
///     samples.mapv(|v| v * v).sum_axis(Axis(samples.ndim() - 1)).mapv(f64::ln)
/// }));
///
/// let samples = ArrayD::from_elem(IxDyn(&[4, 3, 2]), 1.0);
/// let out = objective.evaluate(samples.view(), None).unwrap();
/// assert_eq!(out.shape(), &[4, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct GenericMCObjective {
    objective: ObjectiveFn,
    verify_output_shape: bool,
}

impl GenericMCObjective {
    /// Creates an objective that delegates to `objective`.
    #[must_use]
    pub fn new(objective: ObjectiveFn) -> Self {
        Self {
            objective,
            verify_output_shape: true,
        }
    }

    /// Enables or disables the output-shape check against candidate inputs.
    #[must_use]
    pub fn verify_output_shape(mut self, verify: bool) -> Self {
        self.verify_output_shape = verify;
        self
    }

    /// The wrapped objective function.
    #[must_use]
    pub fn objective(&self) -> &ObjectiveFn {
        &self.objective
    }
}

impl MCAcquisitionObjective for GenericMCObjective {
    fn forward(
        &self,
        samples: ArrayViewD<'_, f64>,
        x: Option<ArrayViewD<'_, f64>>,
    ) -> Result<ArrayD<f64>> {
        Ok(self.objective.call(samples, x))
    }

    fn verifies_output_shape(&self) -> bool {
        self.verify_output_shape
    }
}
