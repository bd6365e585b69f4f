//! Transforms that reduce a multi-output posterior to a single output.
//!
//! A [`PosteriorTransform`] is applied either to a full
//! [`GaussianPosterior`] (via [`transform`](PosteriorTransform::transform))
//! or to raw outcome samples (via [`evaluate`](PosteriorTransform::evaluate))
//! when only point samples are available.
//!
//! The trait itself is abstract and cannot be constructed:
//!
//! ```compile_fail
//! use acquisition::posterior_transform::PosteriorTransform;
//!
//! let transform = PosteriorTransform;
//! ```
//!
//! # Examples
//!
//! ```
//! use acquisition::posterior::{GaussianPosterior, Posterior};
//! use acquisition::posterior_transform::{PosteriorTransform, ScalarizedPosteriorTransform};
//! use ndarray::{ArrayD, IxDyn, array};
//!
//! let transform = ScalarizedPosteriorTransform::new(array![1.0, 2.0])
//!     .unwrap()
//!     .with_offset(0.5);
//!
//! let mean = ArrayD::from_shape_vec(IxDyn(&[1, 2]), vec![1.0, 1.0]).unwrap();
//! let covariance = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 0.0, 0.0, 1.0]).unwrap();
//! let posterior = GaussianPosterior::new(mean, covariance).unwrap();
//!
//! let scalarized = transform.transform(&posterior).unwrap();
//! assert_eq!(scalarized.mean().shape(), &[1, 1]);
//! assert!((scalarized.mean()[[0, 0]] - 3.5).abs() < 1e-12);
//! assert!((scalarized.variance()[[0, 0]] - 5.0).abs() < 1e-12);
//! ```

use nalgebra::DMatrix;
use ndarray::{Array, Array1, Array3, ArrayD, ArrayViewD, Axis, Dimension, Ix1, IxDyn};

use crate::error::{Error, Result};
use crate::posterior::{GaussianPosterior, Posterior};
use crate::shape::{check_outcome_axis, last_axis};

/// Maps a posterior, or raw outcome samples, to a transformed version.
///
/// Implementations must be pure: the same input always yields the same
/// output and nothing is mutated.
pub trait PosteriorTransform: Send + Sync {
    /// Apply the transform to raw outcome samples `y` of shape `(..., m)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `y` does not have the trailing shape the
    /// transform expects.
    fn evaluate(&self, y: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>>;

    /// Apply the transform to a full posterior.
    ///
    /// # Errors
    ///
    /// Returns an error if the posterior's outcome count is incompatible
    /// with the transform.
    fn transform(&self, posterior: &GaussianPosterior) -> Result<GaussianPosterior>;
}

/// Scalarizes a posterior with a fixed linear combination of its outcomes.
///
/// For weights `w` and offset `c`, the transformed posterior has mean
/// `c + mean · w` and covariance `Aᵀ Σ A` with `A = I_q ⊗ w`. For a single
/// point this is the variance `wᵀ Σ w`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarizedPosteriorTransform {
    weights: Array1<f64>,
    offset: f64,
}

impl ScalarizedPosteriorTransform {
    /// Creates a scalarization with the given outcome weights and zero offset.
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
        tracing::debug!(n_outcomes = weights.len(), "scalarized posterior transform created");
        Ok(Self {
            weights,
            offset: 0.0,
        })
    }

    /// Sets the constant added to every scalarized value.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// The outcome weights.
    #[must_use]
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// The additive offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Block matrix `I_q ⊗ w` of shape `(q * m, q)`.
    fn lift(&self, q: usize) -> DMatrix<f64> {
        let m = self.weights.len();
        DMatrix::from_fn(q * m, q, |row, col| {
            if row / m == col { self.weights[row % m] } else { 0.0 }
        })
    }
}

impl PosteriorTransform for ScalarizedPosteriorTransform {
    fn evaluate(&self, y: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
        check_outcome_axis(y.shape(), self.weights.len())?;
        let axis = last_axis(&y);
        Ok(y.map_axis(axis, |lane| self.offset + lane.dot(&self.weights)))
    }

    fn transform(&self, posterior: &GaussianPosterior) -> Result<GaussianPosterior> {
        let m = self.weights.len();
        check_outcome_axis(posterior.mean().shape(), m)?;

        let q = posterior.num_points();
        let batch_shape = posterior.batch_shape().to_vec();
        let n_batch: usize = batch_shape.iter().product();

        let mean = posterior.mean().to_shape((n_batch, q, m))?;
        let covariance = posterior.covariance().to_shape((n_batch, q * m, q * m))?;
        let lift = self.lift(q);

        let mut new_mean = Array3::<f64>::zeros((n_batch, q, 1));
        let mut new_covariance = Array3::<f64>::zeros((n_batch, q, q));
        for b in 0..n_batch {
            let batch_mean = mean.index_axis(Axis(0), b);
            for i in 0..q {
                new_mean[[b, i, 0]] = self.offset + batch_mean.row(i).dot(&self.weights);
            }
            let sigma = DMatrix::from_fn(q * m, q * m, |row, col| covariance[[b, row, col]]);
            let reduced = lift.transpose() * sigma * &lift;
            for i in 0..q {
                for j in 0..q {
                    new_covariance[[b, i, j]] = reduced[(i, j)];
                }
            }
        }

        let mut mean_shape = batch_shape.clone();
        mean_shape.extend([q, 1]);
        let mut covariance_shape = batch_shape;
        covariance_shape.extend([q, q]);

        GaussianPosterior::new(
            new_mean.into_shape_with_order(IxDyn(&mean_shape))?,
            new_covariance.into_shape_with_order(IxDyn(&covariance_shape))?,
        )
    }
}
