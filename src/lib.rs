#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Acquisition objectives and posterior transforms for Bayesian
//! optimization. Objectives turn Monte-Carlo samples drawn from a model's
//! posterior into one scalar utility per candidate point; posterior
//! transforms reduce a multi-output Gaussian posterior to a single output.
//! Feasibility constraints are folded into any objective with a smooth,
//! differentiable penalty.
//!
//! # Getting Started
//!
//! ```
//! use acquisition::prelude::*;
//! use ndarray::{ArrayD, Axis, IxDyn, array};
//!
//! // 16 MC samples, 3 candidate points, 2 outcomes.
//! let samples = ArrayD::from_elem(IxDyn(&[16, 3, 2]), 0.25);
//!
//! // Weighted sum of the two outcomes.
//! let linear = LinearMCObjective::new(array![1.0, -0.5]).unwrap();
//! let utility = linear.evaluate(samples.view(), None).unwrap();
//! assert_eq!(utility.shape(), &[16, 3]);
//!
//! // Same, but the second outcome must stay below 1.
//! let constrained = ConstrainedMCObjective::builder(ObjectiveFn::new(move |s, _x| {
//!     s.map_axis(Axis(s.ndim() - 1), |lane| lane[0] - 0.5 * lane[1])
//! }))
//! .constraint(constraint(|s| s.index_axis(Axis(s.ndim() - 1), 1).mapv(|v| v - 1.0)))
//! .build()
//! .unwrap();
//! let penalized = constrained.evaluate(samples.view(), None).unwrap();
//! assert_eq!(penalized.shape(), &[16, 3]);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`MCAcquisitionObjective`](objective::MCAcquisitionObjective) | Scalarize samples `(..., q, m)` into utilities `(..., q)`. |
//! | [`PosteriorTransform`](posterior_transform::PosteriorTransform) | Reduce a posterior, or raw outcome samples, to a single output. |
//! | [`GaussianPosterior`](posterior::GaussianPosterior) | Mean and joint covariance over `q` points and `m` outcomes. |
//! | [`apply_constraints`](constraints::apply_constraints) | Smoothly push infeasible samples towards a fixed cost. |
//!
//! # Objectives
//!
//! | Objective | Output |
//! |-----------|--------|
//! | [`IdentityMCObjective`](objective::IdentityMCObjective) | Samples with a unit outcome axis removed |
//! | [`LinearMCObjective`](objective::LinearMCObjective) | `(samples * w).sum(-1)` |
//! | [`GenericMCObjective`](objective::GenericMCObjective) | `f(samples, x)` |
//! | [`ConstrainedMCObjective`](objective::ConstrainedMCObjective) | `f(samples, x)` with a feasibility penalty |
//!
//! # Logging
//!
//! Events are emitted through [`tracing`](https://docs.rs/tracing). Wrapping
//! a single-argument objective function logs a deprecation warning under the
//! `acquisition::deprecation` target.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on transforms, linear and identity objectives, and posteriors | off |

pub mod constraints;
mod error;
pub mod objective;
pub mod posterior;
pub mod posterior_transform;
mod shape;

pub use error::{Error, Result};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use acquisition::prelude::*;
/// ```
pub mod prelude {
    pub use crate::constraints::{
        ConstraintFn, DEFAULT_ETA, DEFAULT_INFEASIBLE_COST, apply_constraints, constraint,
        soft_eval_constraint,
    };
    pub use crate::error::{Error, Result};
    pub use crate::objective::{
        ConstrainedMCObjective, GenericMCObjective, IdentityMCObjective, LinearMCObjective,
        MCAcquisitionObjective, ObjectiveFn,
    };
    pub use crate::posterior::{GaussianPosterior, Posterior};
    pub use crate::posterior_transform::{PosteriorTransform, ScalarizedPosteriorTransform};
}
