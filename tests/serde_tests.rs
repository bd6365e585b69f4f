#![cfg(feature = "serde")]

use acquisition::objective::{IdentityMCObjective, LinearMCObjective, MCAcquisitionObjective};
use acquisition::posterior::{GaussianPosterior, Posterior};
use acquisition::posterior_transform::{PosteriorTransform, ScalarizedPosteriorTransform};
use ndarray::{ArrayD, IxDyn, array};

#[test]
fn scalarized_transform_survives_json() {
    let transform = ScalarizedPosteriorTransform::new(array![0.25, -1.5, 2.0])
        .unwrap()
        .with_offset(0.75);
    let json = serde_json::to_string(&transform).unwrap();
    let loaded: ScalarizedPosteriorTransform = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, transform);

    let y = ArrayD::from_elem(IxDyn(&[2, 3]), 1.0);
    assert_eq!(
        loaded.evaluate(y.view()).unwrap(),
        transform.evaluate(y.view()).unwrap()
    );
}

#[test]
fn linear_objective_keeps_verification_flag() {
    let obj = LinearMCObjective::new(array![1.0, 2.0])
        .unwrap()
        .verify_output_shape(false);
    let json = serde_json::to_string(&obj).unwrap();
    let loaded: LinearMCObjective = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, obj);
    assert!(!loaded.verifies_output_shape());
}

#[test]
fn identity_objective_round_trips() {
    let obj = IdentityMCObjective::new();
    let json = serde_json::to_string(&obj).unwrap();
    let loaded: IdentityMCObjective = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, obj);
}

#[test]
fn posterior_round_trips() {
    let mean = ArrayD::from_shape_vec(IxDyn(&[1, 2]), vec![0.5, -0.5]).unwrap();
    let covariance = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 0.2, 0.2, 2.0]).unwrap();
    let posterior = GaussianPosterior::new(mean, covariance).unwrap();

    let json = serde_json::to_string(&posterior).unwrap();
    let loaded: GaussianPosterior = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, posterior);
    assert_eq!(loaded.variance(), posterior.variance());
}

#[test]
fn posterior_with_inconsistent_shapes_is_rejected() {
    // Mean without a q axis.
    let payload = r#"{
        "mean": {"v": 1, "dim": [2], "data": [0.0, 1.0]},
        "covariance": {"v": 1, "dim": [1], "data": [1.0]}
    }"#;
    let err = serde_json::from_str::<GaussianPosterior>(payload).unwrap_err();
    assert!(err.to_string().contains("invalid posterior"));

    // Covariance not (q * m) x (q * m).
    let payload = r#"{
        "mean": {"v": 1, "dim": [1, 2], "data": [0.0, 1.0]},
        "covariance": {"v": 1, "dim": [1, 1], "data": [1.0]}
    }"#;
    assert!(serde_json::from_str::<GaussianPosterior>(payload).is_err());
}
