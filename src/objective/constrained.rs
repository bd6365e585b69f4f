use core::fmt;

use ndarray::{ArrayD, ArrayViewD};

use super::{MCAcquisitionObjective, ObjectiveFn};
use crate::constraints::{
    ConstraintFn, DEFAULT_ETA, DEFAULT_INFEASIBLE_COST, apply_constraints, check_eta,
};
use crate::error::Result;

/// Feasibility-weighted objective.
///
/// Evaluates a base objective and folds the constraints into it with
/// [`apply_constraints`]: samples that violate a constraint are pushed
/// smoothly towards `infeasible_cost`.
///
/// # Examples
///
/// ```
/// use acquisition::constraints::constraint;
/// use acquisition::objective::{ConstrainedMCObjective, MCAcquisitionObjective, ObjectiveFn};
/// use ndarray::{ArrayD, Axis, IxDyn};
///
/// let objective = ConstrainedMCObjective::builder(ObjectiveFn::new(|samples, _x| {
///     samples.index_axis(Axis(samples.ndim() - 1), 0).to_owned()
/// }))
/// // Second outcome must be non-positive.
/// .constraint(constraint(|samples| samples.index_axis(Axis(samples.ndim() - 1), 1).to_owned()))
/// .infeasible_cost(-10.0)
/// .build()
/// .unwrap();
///
/// let samples = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![3.0, -1.0, 3.0, 1.0]).unwrap();
/// let out = objective.evaluate(samples.view(), None).unwrap();
/// assert!((out[[0]] - 3.0).abs() < 1e-9);
/// assert!((out[[1]] + 10.0).abs() < 1e-9);
/// ```
#[derive(Clone)]
pub struct ConstrainedMCObjective {
    objective: ObjectiveFn,
    constraints: Vec<ConstraintFn>,
    infeasible_cost: f64,
    eta: f64,
    verify_output_shape: bool,
}

impl ConstrainedMCObjective {
    /// Creates a constrained objective with the default `infeasible_cost`
    /// (0) and `eta` (1e-3).
    #[must_use]
    pub fn new(objective: ObjectiveFn, constraints: Vec<ConstraintFn>) -> Self {
        Self {
            objective,
            constraints,
            infeasible_cost: DEFAULT_INFEASIBLE_COST,
            eta: DEFAULT_ETA,
            verify_output_shape: true,
        }
    }

    /// Creates a builder for configuring a `ConstrainedMCObjective`.
    #[must_use]
    pub fn builder(objective: ObjectiveFn) -> ConstrainedMCObjectiveBuilder {
        ConstrainedMCObjectiveBuilder::new(objective)
    }

    /// Enables or disables the output-shape check against candidate inputs.
    #[must_use]
    pub fn verify_output_shape(mut self, verify: bool) -> Self {
        self.verify_output_shape = verify;
        self
    }

    /// The value infeasible samples are pushed towards.
    #[must_use]
    pub fn infeasible_cost(&self) -> f64 {
        self.infeasible_cost
    }

    /// Sharpness of the sigmoid feasibility indicator.
    #[must_use]
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// The constraints, in evaluation order.
    #[must_use]
    pub fn constraints(&self) -> &[ConstraintFn] {
        &self.constraints
    }
}

impl fmt::Debug for ConstrainedMCObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedMCObjective")
            .field("objective", &self.objective)
            .field("n_constraints", &self.constraints.len())
            .field("infeasible_cost", &self.infeasible_cost)
            .field("eta", &self.eta)
            .field("verify_output_shape", &self.verify_output_shape)
            .finish()
    }
}

impl MCAcquisitionObjective for ConstrainedMCObjective {
    fn forward(
        &self,
        samples: ArrayViewD<'_, f64>,
        x: Option<ArrayViewD<'_, f64>>,
    ) -> Result<ArrayD<f64>> {
        let raw = self.objective.call(samples.view(), x);
        apply_constraints(raw, &self.constraints, samples, self.infeasible_cost, self.eta)
    }

    fn verifies_output_shape(&self) -> bool {
        self.verify_output_shape
    }
}

/// Builder for configuring a [`ConstrainedMCObjective`].
///
/// Defaults:
/// - `constraints`: none
/// - `infeasible_cost`: 0.0
/// - `eta`: 1e-3
/// - `verify_output_shape`: true
#[derive(Clone)]
pub struct ConstrainedMCObjectiveBuilder {
    objective: ObjectiveFn,
    constraints: Vec<ConstraintFn>,
    infeasible_cost: Option<f64>,
    eta: Option<f64>,
    verify_output_shape: Option<bool>,
}

impl ConstrainedMCObjectiveBuilder {
    /// Creates a builder around the base objective.
    #[must_use]
    pub fn new(objective: ObjectiveFn) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
            infeasible_cost: None,
            eta: None,
            verify_output_shape: None,
        }
    }

    /// Appends a constraint. Constraints are evaluated in insertion order.
    #[must_use]
    pub fn constraint(mut self, constraint: ConstraintFn) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends several constraints.
    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = ConstraintFn>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Sets the value infeasible samples are pushed towards.
    ///
    /// Default: 0.0.
    #[must_use]
    pub fn infeasible_cost(mut self, cost: f64) -> Self {
        self.infeasible_cost = Some(cost);
        self
    }

    /// Sets the sigmoid temperature. Smaller values approximate a hard
    /// feasibility step more closely.
    ///
    /// Default: 1e-3.
    #[must_use]
    pub fn eta(mut self, eta: f64) -> Self {
        self.eta = Some(eta);
        self
    }

    /// Enables or disables the output-shape check against candidate inputs.
    ///
    /// Default: true.
    #[must_use]
    pub fn verify_output_shape(mut self, verify: bool) -> Self {
        self.verify_output_shape = Some(verify);
        self
    }

    /// Builds the configured [`ConstrainedMCObjective`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEta`](crate::Error::InvalidEta) if `eta` is not positive and finite.
    pub fn build(self) -> Result<ConstrainedMCObjective> {
        let eta = self.eta.unwrap_or(DEFAULT_ETA);
        check_eta(eta)?;
        let infeasible_cost = self.infeasible_cost.unwrap_or(DEFAULT_INFEASIBLE_COST);
        tracing::debug!(
            n_constraints = self.constraints.len(),
            infeasible_cost,
            eta,
            "constrained objective built"
        );
        Ok(ConstrainedMCObjective {
            objective: self.objective,
            constraints: self.constraints,
            infeasible_cost,
            eta,
            verify_output_shape: self.verify_output_shape.unwrap_or(true),
        })
    }
}

impl fmt::Debug for ConstrainedMCObjectiveBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedMCObjectiveBuilder")
            .field("objective", &self.objective)
            .field("n_constraints", &self.constraints.len())
            .field("infeasible_cost", &self.infeasible_cost)
            .field("eta", &self.eta)
            .finish_non_exhaustive()
    }
}
