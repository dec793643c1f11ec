use thiserror::Error;

/// Errors that can occur when evaluating a surrogate model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurrogateError {
    /// The input point does not match the dimensionality the model was trained on.
    #[error("input point has {actual} features but the model was trained on {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The model cannot report a standard deviation alongside its prediction.
    #[error("model does not support standard deviation evaluation")]
    StdUnsupported,

    /// The model failed for a reason specific to its implementation.
    #[error("evaluation failed: {0}")]
    Failed(String),
}

/// A trained approximation of an expensive model.
///
/// Surrogates must be pure: the same input always produces the same output,
/// and evaluation never mutates the trained state. This lets drivers evaluate
/// a shared roster of models from any rank or thread.
///
/// Every surrogate provides [`evaluate`](Surrogate::evaluate). Models with
/// vector-valued responses override [`evaluate_vector`](Surrogate::evaluate_vector),
/// whose default wraps the scalar prediction in a one-element vector, so drivers
/// can treat every model through the same sequence-valued contract.
pub trait Surrogate: Send + Sync {
    /// Evaluates the model at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::DimensionMismatch`] if `x` has the wrong
    /// length, or another error if the model itself fails.
    fn evaluate(&self, x: &[f64]) -> Result<f64, SurrogateError>;

    /// Evaluates the model at `x`, returning every output component.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`evaluate`](Surrogate::evaluate).
    fn evaluate_vector(&self, x: &[f64]) -> Result<Vec<f64>, SurrogateError> {
        Ok(vec![self.evaluate(x)?])
    }

    /// Evaluates the model at `x` along with the standard deviation of the prediction.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::StdUnsupported`] unless the model overrides
    /// this method.
    fn evaluate_with_std(&self, _x: &[f64]) -> Result<(f64, f64), SurrogateError> {
        Err(SurrogateError::StdUnsupported)
    }
}
