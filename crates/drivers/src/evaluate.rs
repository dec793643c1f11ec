use umbra_core::{OutputKind, Sampler};

use crate::{EvaluateConfig, Error, ModelOutput, Predictions, Roster, RosterEntry};

/// Evaluates every roster model on each of a sampler's local rows.
///
/// Rows are visited in increasing local index, and each row is passed to
/// every model in roster order. A scalar model must return exactly one value
/// per row. A vector model may return any width, and the width may vary by
/// row.
pub struct SampleEvaluator<'a, S: ?Sized> {
    sampler: &'a S,
    roster: &'a Roster,
    evaluate_std: Vec<bool>,
}

impl<'a, S: Sampler + ?Sized> SampleEvaluator<'a, S> {
    /// Creates an evaluator over `sampler`'s local rows.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not fit the roster.
    pub fn new(sampler: &'a S, roster: &'a Roster, config: &EvaluateConfig) -> Result<Self, Error> {
        let evaluate_std = config.resolve(roster)?;
        Ok(Self {
            sampler,
            roster,
            evaluate_std,
        })
    }

    #[must_use]
    pub fn sampler(&self) -> &'a S {
        self.sampler
    }

    #[must_use]
    pub fn roster(&self) -> &'a Roster {
        self.roster
    }

    /// Runs one pass over the local rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a row cannot be read, a model fails, or a scalar
    /// model returns other than one value.
    pub fn execute(&self) -> Result<Predictions, Error> {
        let rows = self.sampler.num_local_rows();
        tracing::debug!(
            local_rows = rows,
            global_rows = self.sampler.num_rows(),
            models = self.roster.len(),
            "evaluating surrogates"
        );

        let mut outputs: Vec<_> = self
            .roster
            .iter()
            .map(|entry| ModelOutput::with_capacity(entry.kind(), rows))
            .collect();
        let mut stds: Vec<_> = self
            .evaluate_std
            .iter()
            .map(|enabled| enabled.then(|| Vec::with_capacity(rows)))
            .collect();

        for row in 0..rows {
            let x = self.sampler.local_row(row)?;

            for (((entry, output), std_out), with_std) in self
                .roster
                .iter()
                .zip(&mut outputs)
                .zip(&mut stds)
                .zip(&self.evaluate_std)
            {
                let values = evaluate(entry, &x, row, *with_std)?;
                match (output, values) {
                    (ModelOutput::Scalar(out), Evaluated::Scalar { value, std }) => {
                        out.push(value);
                        if let (Some(std_out), Some(std)) = (std_out.as_mut(), std) {
                            std_out.push(std);
                        }
                    }
                    (ModelOutput::Vector(out), Evaluated::Vector(values)) => out.push(values),
                    // Both sides were built from the entry's kind.
                    (output, _) => {
                        unreachable!("output kind {} diverged from roster", output.kind())
                    }
                }
            }
        }

        tracing::debug!(local_rows = rows, "surrogate evaluation complete");
        Ok(Predictions::new(outputs, stds))
    }
}

enum Evaluated {
    Scalar { value: f64, std: Option<f64> },
    Vector(Vec<f64>),
}

/// Evaluates one model on one row, dispatching on its declared kind.
fn evaluate(
    entry: &RosterEntry,
    x: &[f64],
    row: usize,
    with_std: bool,
) -> Result<Evaluated, Error> {
    let failed = |source| Error::Surrogate {
        model: entry.name().to_string(),
        row,
        source,
    };

    match entry.kind() {
        OutputKind::Scalar if with_std => {
            let (value, std) = entry.model().evaluate_with_std(x).map_err(failed)?;
            Ok(Evaluated::Scalar {
                value,
                std: Some(std),
            })
        }
        OutputKind::Scalar => {
            let values = entry.model().evaluate_vector(x).map_err(failed)?;
            match values.as_slice() {
                [value] => Ok(Evaluated::Scalar {
                    value: *value,
                    std: None,
                }),
                _ => Err(Error::ScalarWidth {
                    model: entry.name().to_string(),
                    row,
                    width: values.len(),
                }),
            }
        }
        OutputKind::Vector => entry
            .model()
            .evaluate_vector(x)
            .map(Evaluated::Vector)
            .map_err(failed),
    }
}
