use super::*;

use std::sync::Arc;

use approx::assert_relative_eq;
use ndarray::array;
use umbra_core::{MatrixSampler, OutputKind, SingleProcess, Surrogate, SurrogateError};

use crate::ModelOutput;

/// Sums the input features.
struct Sum;

impl Surrogate for Sum {
    fn evaluate(&self, x: &[f64]) -> Result<f64, SurrogateError> {
        Ok(x.iter().sum())
    }
}

/// Echoes the input features as a vector.
struct Echo;

impl Surrogate for Echo {
    fn evaluate(&self, x: &[f64]) -> Result<f64, SurrogateError> {
        Ok(x[0])
    }

    fn evaluate_vector(&self, x: &[f64]) -> Result<Vec<f64>, SurrogateError> {
        Ok(x.to_vec())
    }
}

fn sampler() -> MatrixSampler {
    MatrixSampler::new(array![[1.0, 2.0], [3.0, 4.0]])
}

fn roster() -> Roster {
    Roster::new()
        .with_model("sum", OutputKind::Scalar, Arc::new(Sum))
        .and_then(|r| r.with_model("echo", OutputKind::Vector, Arc::new(Echo)))
        .unwrap()
}

fn responses() -> ReporterStore {
    let mut store = ReporterStore::new();
    store.declare("truth/sum", Values::Real(vec![2.0, 5.0]));
    store.declare(
        "truth/echo",
        Values::VectorReal(vec![vec![0.0, 2.0], vec![3.0, 3.0]]),
    );
    store
}

fn config(compute_rmse: bool) -> ErrorConfig {
    ErrorConfig {
        response: vec!["truth/sum".to_string(), "truth/echo".to_string()],
        compute_rmse,
        ..ErrorConfig::default()
    }
}

#[test]
fn residuals_are_prediction_minus_response() {
    let sampler = sampler();
    let roster = roster();
    let store = responses();

    let report = ErrorEvaluator::new(&sampler, &roster, &store, &config(false))
        .unwrap()
        .execute(&SingleProcess)
        .unwrap();

    // Predictions are [3, 7] and [[1, 2], [3, 4]].
    assert_eq!(
        report.residuals.errors()[0],
        ModelOutput::Scalar(vec![1.0, 2.0])
    );
    assert_eq!(
        report.residuals.errors()[1],
        ModelOutput::Vector(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
    );
    assert!(report.rmse.is_none());
}

#[test]
fn rmse_divides_by_global_row_count() {
    let sampler = sampler();
    let roster = roster();
    let store = responses();

    let report = ErrorEvaluator::new(&sampler, &roster, &store, &config(true))
        .unwrap()
        .execute(&SingleProcess)
        .unwrap();

    let rmse = report.rmse.unwrap();
    assert_eq!(rmse.len(), 2);
    assert_relative_eq!(rmse[0], (5.0_f64 / 2.0).sqrt());
    // Every vector component counts, but N stays the row count.
    assert_relative_eq!(rmse[1], 1.0);
}

#[test]
fn publish_declares_errors_and_rmse() {
    let sampler = sampler();
    let roster = roster();
    let store = responses();

    let report = ErrorEvaluator::new(&sampler, &roster, &store, &config(true))
        .unwrap()
        .execute(&SingleProcess)
        .unwrap();

    let mut out = ReporterStore::new();
    report.publish(&roster, &mut out);

    assert_eq!(out.names().collect::<Vec<_>>(), vec!["echo", "rmse", "sum"]);
    assert_eq!(out.get_real("sum"), Some(&[1.0, 2.0][..]));
    assert_eq!(out.get_real(RMSE_SLOT).map(<[f64]>::len), Some(2));
}

#[test]
fn publish_without_rmse_omits_the_slot() {
    let sampler = sampler();
    let roster = roster();
    let store = responses();

    let report = ErrorEvaluator::new(&sampler, &roster, &store, &config(false))
        .unwrap()
        .execute(&SingleProcess)
        .unwrap();

    let mut out = ReporterStore::new();
    report.publish(&roster, &mut out);
    assert!(out.get(RMSE_SLOT).is_none());
}

#[test]
fn sampler_column_serves_as_response() {
    let sampler = sampler();
    let roster = Roster::new()
        .with_model("sum", OutputKind::Scalar, Arc::new(Sum))
        .unwrap();
    let store = ReporterStore::new();
    let config = ErrorConfig {
        response: vec!["sampler/col_0".to_string()],
        compute_rmse: true,
        ..ErrorConfig::default()
    };

    let report = ErrorEvaluator::new(&sampler, &roster, &store, &config)
        .unwrap()
        .execute(&SingleProcess)
        .unwrap();

    // Sum minus the first column leaves the second column.
    assert_eq!(
        report.residuals.errors()[0],
        ModelOutput::Scalar(vec![2.0, 4.0])
    );
    assert_relative_eq!(report.rmse.unwrap()[0], 10.0_f64.sqrt());
}

#[test]
fn response_count_must_match_roster() {
    let sampler = sampler();
    let roster = roster();
    let store = responses();
    let config = ErrorConfig {
        response: vec!["truth/sum".to_string()],
        ..ErrorConfig::default()
    };

    let err = ErrorEvaluator::new(&sampler, &roster, &store, &config)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::ParamLength {
            field: "response",
            expected: 2,
            actual: 1,
        }
    ));
}

#[test]
fn missing_response_fails_at_construction() {
    let sampler = sampler();
    let roster = roster();
    let store = responses();
    let config = ErrorConfig {
        response: vec!["truth/sum".to_string(), "truth/nothing".to_string()],
        ..ErrorConfig::default()
    };

    let err = ErrorEvaluator::new(&sampler, &roster, &store, &config)
        .err()
        .unwrap();
    assert!(matches!(err, Error::MissingResponse { name } if name == "truth/nothing"));
}

#[test]
fn response_kind_must_match_model_kind() {
    let sampler = sampler();
    let roster = roster();
    let store = responses();
    let config = ErrorConfig {
        response_type: vec![OutputKind::Vector, OutputKind::Vector],
        ..config(false)
    };

    let err = ErrorEvaluator::new(&sampler, &roster, &store, &config)
        .err()
        .unwrap();
    assert!(matches!(err, Error::MismatchedResponse { model, .. } if model == "sum"));
}

#[test]
fn short_response_fails_the_pass() {
    let sampler = sampler();
    let roster = roster();
    let mut store = responses();
    store.declare("truth/sum", Values::Real(vec![2.0]));

    let err = ErrorEvaluator::new(&sampler, &roster, &store, &config(true))
        .unwrap()
        .execute(&SingleProcess)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ResponseLength {
            expected: 2,
            actual: 1,
            ..
        }
    ));
}

#[test]
fn reduce_rmse_takes_root_of_summed_partials() {
    let rmse = reduce_rmse(vec![4.0, 0.25, 0.0], &SingleProcess).unwrap();
    assert_eq!(rmse, vec![2.0, 0.5, 0.0]);
}
