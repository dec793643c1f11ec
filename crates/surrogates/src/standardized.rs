use std::sync::Arc;

use ndarray::{Array1, ArrayView1};
use thiserror::Error;
use umbra_core::{Surrogate, SurrogateError};

use crate::network::FeedForward;

/// Errors that can occur when constructing a [`StandardizedFeedForward`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The trained state carries no network to evaluate.
    #[error("trained state has no feed-forward network; the inference engine is unavailable")]
    EngineUnavailable,

    /// A moment vector does not cover every input plus the response.
    #[error("`{name}` has {actual} entries but the network needs {expected}")]
    MomentLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// The training-derived data a [`StandardizedFeedForward`] is built from.
///
/// `means` and `stddevs` hold one entry per input feature followed by one
/// trailing entry for the response.
#[derive(Clone, Default)]
pub struct TrainedState {
    pub means: Vec<f64>,
    pub stddevs: Vec<f64>,
    pub network: Option<Arc<dyn FeedForward>>,
}

/// A surrogate that evaluates a feed-forward network on standardized inputs.
///
/// Each input feature is centered and scaled with the training moments before
/// the forward pass, and the network output is mapped back to response units:
///
/// ```text
/// x_i' = (x_i - mean_i) / stddev_i
/// y    = stddev_D * network(x') + mean_D
/// ```
///
/// Standard deviations are not checked for zero. A zero entry divides by zero
/// in the forward pass, so construction logs a warning when one is present.
pub struct StandardizedFeedForward {
    input_means: Array1<f64>,
    input_stddevs: Array1<f64>,
    response_mean: f64,
    response_stddev: f64,
    network: Arc<dyn FeedForward>,
}

impl StandardizedFeedForward {
    /// Creates the surrogate from trained state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineUnavailable`] if `state` has no network, or
    /// [`Error::MomentLength`] if the moment vectors do not have one entry per
    /// network input plus one for the response.
    pub fn new(state: TrainedState) -> Result<Self, Error> {
        let TrainedState {
            means,
            stddevs,
            network,
        } = state;

        let network = network.ok_or(Error::EngineUnavailable)?;
        let expected = network.num_inputs() + 1;

        let (input_means, response_mean) = split_moments("means", means, expected)?;
        let (input_stddevs, response_stddev) = split_moments("stddevs", stddevs, expected)?;

        let degenerate = input_stddevs
            .iter()
            .chain(std::iter::once(&response_stddev))
            .filter(|s| **s == 0.0 || !s.is_finite())
            .count();
        if degenerate > 0 {
            tracing::warn!(
                count = degenerate,
                "zero or non-finite standard deviations; predictions will not be finite"
            );
        }

        Ok(Self {
            input_means,
            input_stddevs,
            response_mean,
            response_stddev,
            network,
        })
    }

    /// Returns the number of input features.
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.network.num_inputs()
    }
}

impl Surrogate for StandardizedFeedForward {
    fn evaluate(&self, x: &[f64]) -> Result<f64, SurrogateError> {
        let expected = self.num_inputs();
        if x.len() != expected {
            return Err(SurrogateError::DimensionMismatch {
                expected,
                actual: x.len(),
            });
        }

        let scaled = (&ArrayView1::from(x) - &self.input_means) / &self.input_stddevs;
        let raw = self
            .network
            .forward(scaled.view())
            .map_err(|e| SurrogateError::Failed(e.to_string()))?;

        Ok(self.response_stddev * raw + self.response_mean)
    }
}

/// Splits a moment vector into its input entries and the trailing response entry.
fn split_moments(
    name: &'static str,
    mut moments: Vec<f64>,
    expected: usize,
) -> Result<(Array1<f64>, f64), Error> {
    if moments.len() != expected {
        return Err(Error::MomentLength {
            name,
            expected,
            actual: moments.len(),
        });
    }

    // Length was just checked against `inputs + 1`.
    let response = moments.pop().unwrap_or_default();
    Ok((Array1::from(moments), response))
}
