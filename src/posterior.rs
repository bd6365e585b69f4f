//! Gaussian posterior carrier consumed and produced by posterior transforms.
//!
//! A [`GaussianPosterior`] describes the joint distribution of `m` outcomes
//! at `q` candidate points for every element of a (possibly empty) batch:
//!
//! | Field | Shape |
//! |-------|-------|
//! | mean | `(..., q, m)` |
//! | covariance | `(..., q * m, q * m)` |
//!
//! The covariance is ordered point-major: entry `i * m + j` refers to
//! outcome `j` at point `i`.

use ndarray::{ArrayD, Dimension};

use crate::error::{Error, Result};

/// Read access to the first two moments of a posterior.
///
/// This is an accessor contract only: code that just needs moments can be
/// generic over it. [`PosteriorTransform`] itself takes and returns the
/// concrete [`GaussianPosterior`], since it needs the joint covariance and
/// must stay usable as a trait object.
///
/// [`PosteriorTransform`]: crate::posterior_transform::PosteriorTransform
pub trait Posterior {
    /// Posterior mean, shape `(..., q, m)`.
    fn mean(&self) -> &ArrayD<f64>;

    /// Marginal variances, shape `(..., q, m)`.
    fn variance(&self) -> ArrayD<f64>;
}

/// A multivariate normal posterior over `q` points and `m` outcomes.
///
/// With the `serde` feature, deserialization goes through
/// [`GaussianPosterior::new`], so inconsistent payloads are rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGaussianPosterior"))]
pub struct GaussianPosterior {
    mean: ArrayD<f64>,
    covariance: ArrayD<f64>,
}

/// Unchecked wire form of [`GaussianPosterior`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGaussianPosterior {
    mean: ArrayD<f64>,
    covariance: ArrayD<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGaussianPosterior> for GaussianPosterior {
    type Error = Error;

    fn try_from(raw: RawGaussianPosterior) -> Result<Self> {
        Self::new(raw.mean, raw.covariance)
    }
}

impl GaussianPosterior {
    /// Creates a posterior from its mean and joint covariance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosterior`] if `mean` has fewer than two axes,
    /// if the batch shapes differ, or if the covariance is not
    /// `(q * m) x (q * m)`.
    pub fn new(mean: ArrayD<f64>, covariance: ArrayD<f64>) -> Result<Self> {
        if mean.ndim() < 2 {
            return Err(Error::InvalidPosterior(format!(
                "mean must have shape (..., q, m), got {:?}",
                mean.shape()
            )));
        }
        let batch = &mean.shape()[..mean.ndim() - 2];
        let qm = mean.shape()[mean.ndim() - 2] * mean.shape()[mean.ndim() - 1];
        let mut expected = batch.to_vec();
        expected.extend([qm, qm]);
        if covariance.shape() != expected.as_slice() {
            return Err(Error::InvalidPosterior(format!(
                "covariance must have shape {expected:?} for mean of shape {:?}, got {:?}",
                mean.shape(),
                covariance.shape()
            )));
        }
        Ok(Self { mean, covariance })
    }

    /// Joint covariance, shape `(..., q * m, q * m)`.
    #[must_use]
    pub fn covariance(&self) -> &ArrayD<f64> {
        &self.covariance
    }

    /// Leading batch dimensions shared by mean and covariance.
    #[must_use]
    pub fn batch_shape(&self) -> &[usize] {
        &self.mean.shape()[..self.mean.ndim() - 2]
    }

    /// Number of candidate points `q`.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.mean.shape()[self.mean.ndim() - 2]
    }

    /// Number of outcomes `m`.
    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.mean.shape()[self.mean.ndim() - 1]
    }
}

impl Posterior for GaussianPosterior {
    fn mean(&self) -> &ArrayD<f64> {
        &self.mean
    }

    fn variance(&self) -> ArrayD<f64> {
        let nd = self.mean.ndim();
        let m = self.num_outputs();
        ArrayD::from_shape_fn(self.mean.raw_dim(), |ix| {
            let mut at = ix.slice().to_vec();
            let k = at[nd - 2] * m + at[nd - 1];
            at[nd - 2] = k;
            at[nd - 1] = k;
            self.covariance[at.as_slice()]
        })
    }
}
