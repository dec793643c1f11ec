//! Per-model results of one evaluation pass.
//!
//! A pass first produces [`Predictions`]: raw model outputs for each local
//! row. [`Predictions::into_residuals`] consumes them and subtracts the known
//! responses in place, yielding [`Residuals`] that hold signed error
//! (`prediction - response`). The two stages are separate types so a value
//! read from a reporter slot is never ambiguous about which one it holds.

use umbra_core::{OutputKind, Reporter, Values};

use crate::{Error, ResponseRows, Roster};

/// The values one model produced for each local row.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Scalar(Vec<f64>),
    Vector(Vec<Vec<f64>>),
}

impl ModelOutput {
    pub(crate) fn with_capacity(kind: OutputKind, rows: usize) -> Self {
        match kind {
            OutputKind::Scalar => Self::Scalar(Vec::with_capacity(rows)),
            OutputKind::Vector => Self::Vector(Vec::with_capacity(rows)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> OutputKind {
        match self {
            Self::Scalar(_) => OutputKind::Scalar,
            Self::Vector(_) => OutputKind::Vector,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(rows) => rows.len(),
            Self::Vector(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(rows) => Some(rows),
            Self::Vector(_) => None,
        }
    }

    #[must_use]
    pub fn as_vector(&self) -> Option<&[Vec<f64>]> {
        match self {
            Self::Scalar(_) => None,
            Self::Vector(rows) => Some(rows),
        }
    }

    /// Sums `value² / n` over every stored value.
    pub(crate) fn scaled_sum_of_squares(&self, n: f64) -> f64 {
        match self {
            Self::Scalar(rows) => rows.iter().map(|e| e.powi(2) / n).sum(),
            Self::Vector(rows) => rows.iter().flatten().map(|e| e.powi(2) / n).sum(),
        }
    }

    /// Subtracts `response` row by row, in place.
    fn subtract(&mut self, response: &ResponseRows<'_>, model: &str) -> Result<(), Error> {
        if self.len() != response.len() {
            return Err(Error::ResponseLength {
                model: model.to_string(),
                expected: self.len(),
                actual: response.len(),
            });
        }

        match (self, response) {
            (Self::Scalar(rows), ResponseRows::Real(truth)) => {
                for (value, truth) in rows.iter_mut().zip(truth.iter()) {
                    *value -= truth;
                }
                Ok(())
            }
            (Self::Vector(rows), ResponseRows::VectorReal(truth)) => {
                for (row, (values, truth)) in rows.iter_mut().zip(truth.iter()).enumerate() {
                    if values.len() != truth.len() {
                        return Err(Error::ResponseWidth {
                            model: model.to_string(),
                            row,
                            expected: values.len(),
                            actual: truth.len(),
                        });
                    }
                    for (value, truth) in values.iter_mut().zip(truth) {
                        *value -= truth;
                    }
                }
                Ok(())
            }
            (output, response) => Err(Error::MismatchedResponse {
                model: model.to_string(),
                model_kind: output.kind(),
                response_kind: response.kind(),
            }),
        }
    }
}

impl From<ModelOutput> for Values {
    fn from(output: ModelOutput) -> Self {
        match output {
            ModelOutput::Scalar(rows) => Values::Real(rows),
            ModelOutput::Vector(rows) => Values::VectorReal(rows),
        }
    }
}

/// Raw predictions from one pass, one [`ModelOutput`] per roster entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    outputs: Vec<ModelOutput>,
    stds: Vec<Option<Vec<f64>>>,
}

impl Predictions {
    pub(crate) fn new(outputs: Vec<ModelOutput>, stds: Vec<Option<Vec<f64>>>) -> Self {
        Self { outputs, stds }
    }

    /// Returns the predictions in roster order.
    #[must_use]
    pub fn outputs(&self) -> &[ModelOutput] {
        &self.outputs
    }

    /// Returns the per-row standard deviations of model `index`, if evaluated.
    #[must_use]
    pub fn std(&self, index: usize) -> Option<&[f64]> {
        self.stds.get(index).and_then(Option::as_deref)
    }

    /// Declares one slot per model, plus a `<model>_std` slot for each model
    /// evaluated with standard deviation.
    pub fn publish(&self, roster: &Roster, reporter: &mut impl Reporter) {
        for ((entry, output), std) in roster.iter().zip(&self.outputs).zip(&self.stds) {
            reporter.declare(entry.name(), output.clone().into());
            if let Some(std) = std {
                reporter.declare(&format!("{}_std", entry.name()), Values::Real(std.clone()));
            }
        }
    }

    /// Converts the predictions into residuals by subtracting `responses`.
    ///
    /// `responses` holds one entry per roster model. Standard deviations are
    /// discarded since they do not describe the residual.
    ///
    /// # Errors
    ///
    /// Returns an error if a response's kind, row count, or per-row width
    /// differs from its model's predictions.
    pub fn into_residuals(
        self,
        roster: &Roster,
        responses: &[ResponseRows<'_>],
    ) -> Result<Residuals, Error> {
        if responses.len() != self.outputs.len() {
            return Err(Error::ParamLength {
                field: "response",
                expected: self.outputs.len(),
                actual: responses.len(),
            });
        }

        let mut errors = self.outputs;
        for ((output, response), entry) in errors.iter_mut().zip(responses).zip(roster.iter()) {
            output.subtract(response, entry.name())?;
        }

        Ok(Residuals { errors })
    }
}

/// Signed errors (`prediction - response`) from one pass, in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct Residuals {
    errors: Vec<ModelOutput>,
}

impl Residuals {
    #[must_use]
    pub fn errors(&self) -> &[ModelOutput] {
        &self.errors
    }

    /// Declares one slot per model holding its signed errors.
    pub fn publish(&self, roster: &Roster, reporter: &mut impl Reporter) {
        for (entry, errors) in roster.iter().zip(&self.errors) {
            reporter.declare(entry.name(), errors.clone().into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{borrow::Cow, sync::Arc};

    use approx::assert_relative_eq;
    use umbra_core::{ReporterStore, Surrogate, SurrogateError};

    struct Zero;

    impl Surrogate for Zero {
        fn evaluate(&self, _x: &[f64]) -> Result<f64, SurrogateError> {
            Ok(0.0)
        }
    }

    fn roster() -> Roster {
        Roster::new()
            .with_model("s", OutputKind::Scalar, Arc::new(Zero))
            .and_then(|r| r.with_model("v", OutputKind::Vector, Arc::new(Zero)))
            .unwrap()
    }

    fn predictions() -> Predictions {
        Predictions::new(
            vec![
                ModelOutput::Scalar(vec![3.0, 5.0]),
                ModelOutput::Vector(vec![vec![1.0, 2.0], vec![4.0]]),
            ],
            vec![Some(vec![0.1, 0.2]), None],
        )
    }

    #[test]
    fn residuals_subtract_responses_elementwise() {
        let truth = vec![vec![0.5, 2.5], vec![1.0]];
        let responses = [
            ResponseRows::Real(Cow::Owned(vec![1.0, 7.0])),
            ResponseRows::VectorReal(&truth),
        ];

        let residuals = predictions().into_residuals(&roster(), &responses).unwrap();

        assert_eq!(residuals.errors()[0], ModelOutput::Scalar(vec![2.0, -2.0]));
        assert_eq!(
            residuals.errors()[1],
            ModelOutput::Vector(vec![vec![0.5, -0.5], vec![3.0]])
        );
    }

    #[test]
    fn residuals_reject_swapped_kinds() {
        let truth = vec![vec![0.0], vec![0.0]];
        let responses = [
            ResponseRows::VectorReal(&truth),
            ResponseRows::Real(Cow::Owned(vec![0.0, 0.0])),
        ];

        let err = predictions()
            .into_residuals(&roster(), &responses)
            .unwrap_err();
        assert!(matches!(err, Error::MismatchedResponse { model, .. } if model == "s"));
    }

    #[test]
    fn residuals_reject_wrong_row_count_and_width() {
        let truth = vec![vec![0.0, 0.0], vec![0.0]];
        let short = [
            ResponseRows::Real(Cow::Owned(vec![0.0])),
            ResponseRows::VectorReal(&truth),
        ];
        let err = predictions().into_residuals(&roster(), &short).unwrap_err();
        assert!(matches!(
            err,
            Error::ResponseLength {
                expected: 2,
                actual: 1,
                ..
            }
        ));

        let narrow_truth = vec![vec![0.0], vec![0.0]];
        let narrow = [
            ResponseRows::Real(Cow::Owned(vec![0.0, 0.0])),
            ResponseRows::VectorReal(&narrow_truth),
        ];
        let err = predictions().into_residuals(&roster(), &narrow).unwrap_err();
        assert!(matches!(
            err,
            Error::ResponseWidth {
                row: 0,
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn scaled_sum_of_squares_covers_every_component() {
        let output = ModelOutput::Vector(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_relative_eq!(output.scaled_sum_of_squares(2.0), 7.0);
    }

    #[test]
    fn publish_declares_model_and_std_slots() {
        let mut store = ReporterStore::new();
        predictions().publish(&roster(), &mut store);

        assert_eq!(store.names().collect::<Vec<_>>(), vec!["s", "s_std", "v"]);
        assert_eq!(store.get_real("s_std"), Some(&[0.1, 0.2][..]));
    }
}
