use umbra_core::OutputKind;

use crate::{Error, Roster};

/// Configuration for the [`SampleEvaluator`](crate::SampleEvaluator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EvaluateConfig {
    /// Whether to also evaluate each model's standard deviation.
    ///
    /// Empty disables it for every model, a single entry applies to every
    /// model, and otherwise there must be one entry per model.
    pub evaluate_std: Vec<bool>,
}

impl EvaluateConfig {
    /// Resolves the per-model `evaluate_std` flags for `roster`.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag count does not fit the roster or if a
    /// vector-valued model has standard deviation evaluation enabled.
    pub fn resolve(&self, roster: &Roster) -> Result<Vec<bool>, Error> {
        let flags = broadcast("evaluate_std", &self.evaluate_std, roster.len(), false)?;

        for (entry, enabled) in roster.iter().zip(&flags) {
            if *enabled && entry.kind() == OutputKind::Vector {
                return Err(Error::StdForVector {
                    model: entry.name().to_string(),
                });
            }
        }

        Ok(flags)
    }
}

/// Configuration for the [`ErrorEvaluator`](crate::ErrorEvaluator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ErrorConfig {
    /// Names of the known responses, one per model.
    ///
    /// A name of the form `sampler/col_<index>` reads the response from that
    /// column of the sampler; any other name is looked up among the declared
    /// response values.
    pub response: Vec<String>,

    /// Kinds of the responses.
    ///
    /// Empty takes each model's output kind, a single entry applies to every
    /// model, and otherwise there must be one entry per model.
    pub response_type: Vec<OutputKind>,

    /// Whether to reduce the errors into a root-mean-square error per model.
    pub compute_rmse: bool,
}

impl ErrorConfig {
    /// Resolves the per-model response kinds for `roster`.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind count does not fit the roster or if a
    /// response kind differs from its model's output kind.
    pub fn resolve_types(&self, roster: &Roster) -> Result<Vec<OutputKind>, Error> {
        let kinds = if self.response_type.is_empty() {
            roster.iter().map(|entry| entry.kind()).collect()
        } else {
            broadcast(
                "response_type",
                &self.response_type,
                roster.len(),
                OutputKind::Scalar,
            )?
        };

        for (entry, kind) in roster.iter().zip(&kinds) {
            if entry.kind() != *kind {
                return Err(Error::MismatchedResponse {
                    model: entry.name().to_string(),
                    model_kind: entry.kind(),
                    response_kind: *kind,
                });
            }
        }

        Ok(kinds)
    }
}

/// Expands a per-model parameter to one entry per model.
fn broadcast<T: Clone>(
    field: &'static str,
    values: &[T],
    models: usize,
    default: T,
) -> Result<Vec<T>, Error> {
    match values {
        [] => Ok(vec![default; models]),
        [value] => Ok(vec![value.clone(); models]),
        values if values.len() == models => Ok(values.to_vec()),
        values => Err(Error::ParamLength {
            field,
            expected: models,
            actual: values.len(),
        }),
    }
}
