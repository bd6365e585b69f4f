use ndarray::{Array, Array1, ArrayD, ArrayViewD, Dimension, Ix1};

use super::MCAcquisitionObjective;
use crate::error::{Error, Result};
use crate::shape::{check_outcome_axis, last_axis};

/// Linear objective: a weighted sum over the outcome axis.
///
/// For samples of shape `(..., q, m)` and weights of length `m`, returns
/// `(samples * weights).sum(-1)` of shape `(..., q)`.
///
/// # Examples
///
/// ```
/// use acquisition::objective::{LinearMCObjective, MCAcquisitionObjective};
/// use ndarray::{ArrayD, IxDyn, array};
///
/// let objective = LinearMCObjective::new(array![0.5, 2.0]).unwrap();
/// let samples = ArrayD::from_shape_vec(IxDyn(&[1, 2]), vec![4.0, 1.0]).unwrap();
/// let out = objective.evaluate(samples.view(), None).unwrap();
/// assert_eq!(out.as_slice().unwrap(), &[4.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearMCObjective {
    weights: Array1<f64>,
    verify_output_shape: bool,
}

impl LinearMCObjective {
    /// Creates a linear objective from a weight vector of length `m`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWeights`] if `weights` is not exactly
    /// one-dimensional.
    pub fn new<D: Dimension>(weights: Array<f64, D>) -> Result<Self> {
        let ndim = weights.ndim();
        let weights = weights
            .into_dimensionality::<Ix1>()
            .map_err(|_| Error::InvalidWeights { ndim })?;
        Ok(Self {
            weights,
            verify_output_shape: true,
        })
    }

    /// Enables or disables the output-shape check against candidate inputs.
    #[must_use]
    pub fn verify_output_shape(mut self, verify: bool) -> Self {
        self.verify_output_shape = verify;
        self
    }

    /// The outcome weights.
    #[must_use]
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }
}

impl MCAcquisitionObjective for LinearMCObjective {
    /// # Errors
    ///
    /// Returns [`Error::OutcomeMismatch`] unless the last axis of `samples`
    /// has exactly as many entries as there are weights.
    fn forward(
        &self,
        samples: ArrayViewD<'_, f64>,
        _x: Option<ArrayViewD<'_, f64>>,
    ) -> Result<ArrayD<f64>> {
        check_outcome_axis(samples.shape(), self.weights.len())?;
        let axis = last_axis(&samples);
        Ok(samples.map_axis(axis, |lane| lane.dot(&self.weights)))
    }

    fn verifies_output_shape(&self) -> bool {
        self.verify_output_shape
    }
}
