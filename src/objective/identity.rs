use ndarray::{ArrayD, ArrayViewD};

use super::MCAcquisitionObjective;
use crate::error::Result;
use crate::shape::squeeze_last;

/// Objective for single-outcome models: removes the trailing outcome axis.
///
/// Samples of shape `(..., q, 1)` become `(..., q)`. If the last axis does
/// not have size 1 the samples are returned unchanged.
///
/// # Examples
///
/// ```
/// use acquisition::objective::{IdentityMCObjective, MCAcquisitionObjective};
/// use ndarray::{ArrayD, IxDyn};
///
/// let samples = ArrayD::<f64>::zeros(IxDyn(&[8, 3, 1]));
/// let out = IdentityMCObjective::new().evaluate(samples.view(), None).unwrap();
/// assert_eq!(out.shape(), &[8, 3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentityMCObjective {
    verify_output_shape: bool,
}

impl IdentityMCObjective {
    /// Creates an identity objective with output-shape verification enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            verify_output_shape: true,
        }
    }

    /// Enables or disables the output-shape check against candidate inputs.
    #[must_use]
    pub fn verify_output_shape(mut self, verify: bool) -> Self {
        self.verify_output_shape = verify;
        self
    }
}

impl Default for IdentityMCObjective {
    fn default() -> Self {
        Self::new()
    }
}

impl MCAcquisitionObjective for IdentityMCObjective {
    fn forward(
        &self,
        samples: ArrayViewD<'_, f64>,
        _x: Option<ArrayViewD<'_, f64>>,
    ) -> Result<ArrayD<f64>> {
        Ok(squeeze_last(samples))
    }

    fn verifies_output_shape(&self) -> bool {
        self.verify_output_shape
    }
}
