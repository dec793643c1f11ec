use thiserror::Error;
use umbra_core::{CommError, OutputKind, SamplerError, SurrogateError};

/// Errors that can occur when configuring or running an evaluation driver.
///
/// Every variant aborts the pass: drivers never publish partial results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("roster already contains a model named `{0}`")]
    DuplicateModel(String),

    #[error("`{field}` has {actual} entries but the roster has {expected} models")]
    ParamLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("`evaluate_std` is enabled for vector-valued model `{model}`")]
    StdForVector { model: String },

    #[error("model `{model}` failed on local row {row}")]
    Surrogate {
        model: String,
        row: usize,
        #[source]
        source: SurrogateError,
    },

    #[error("scalar model `{model}` returned {width} values on local row {row}")]
    ScalarWidth {
        model: String,
        row: usize,
        width: usize,
    },

    #[error("failed to read sample row")]
    Sampler(#[from] SamplerError),

    #[error("response `{name}` is not declared")]
    MissingResponse { name: String },

    #[error("response `{name}` does not name a valid sampler column")]
    InvalidColumn { name: String },

    #[error("response `{name}` holds `{actual}` values but `response_type` is `{expected}`")]
    ResponseKind {
        name: String,
        expected: OutputKind,
        actual: OutputKind,
    },

    #[error(
        "mismatched response types for model `{model}`: model produces `{model_kind}` but the response is `{response_kind}`"
    )]
    MismatchedResponse {
        model: String,
        model_kind: OutputKind,
        response_kind: OutputKind,
    },

    #[error("response for model `{model}` has {actual} rows but there are {expected} local rows")]
    ResponseLength {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "response for model `{model}` on local row {row} has {actual} values but the prediction has {expected}"
    )]
    ResponseWidth {
        model: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("collective sum failed")]
    Comm(#[from] CommError),
}
