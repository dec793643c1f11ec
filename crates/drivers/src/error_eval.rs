//! Surrogate error against known responses.
//!
//! An [`ErrorEvaluator`] runs a full [`SampleEvaluator`] pass, subtracts the
//! known response from every prediction, and optionally reduces the squared
//! errors into a root-mean-square error per model:
//!
//! ```text
//! partial[m] = Σ_local rows Σ_components error² / N
//! rmse[m]    = sqrt(Σ_ranks partial[m])
//! ```
//!
//! `N` is the global row count, so each rank's partial sum already carries
//! its share of the mean and the collective sum yields the global mean square
//! error regardless of how rows are partitioned.

#[cfg(test)]
mod tests;

use umbra_core::{Communicator, Reporter, ReporterStore, Sampler, Values};

use crate::{
    Error, ErrorConfig, EvaluateConfig, Residuals, Roster, SampleEvaluator, response::Response,
};

/// The name of the reporter slot holding the per-model RMSE.
pub const RMSE_SLOT: &str = "rmse";

/// Evaluates surrogate error relative to known responses.
///
/// Standard deviation outputs are never evaluated, since they carry no
/// meaning once predictions become errors.
pub struct ErrorEvaluator<'a, S: ?Sized> {
    evaluator: SampleEvaluator<'a, S>,
    responses: Vec<Response<'a>>,
    compute_rmse: bool,
}

/// The outcome of one [`ErrorEvaluator`] pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    /// Signed errors per model and local row.
    pub residuals: Residuals,

    /// Global RMSE per model in roster order, when enabled.
    pub rmse: Option<Vec<f64>>,
}

impl ErrorReport {
    /// Declares the per-model error slots and, when computed, the `rmse` slot.
    pub fn publish(&self, roster: &Roster, reporter: &mut impl Reporter) {
        self.residuals.publish(roster, reporter);
        if let Some(rmse) = &self.rmse {
            reporter.declare(RMSE_SLOT, Values::Real(rmse.clone()));
        }
    }
}

impl<'a, S: Sampler + ?Sized> ErrorEvaluator<'a, S> {
    /// Creates an error evaluator, looking up each model's response by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the response names or kinds do not fit the roster,
    /// or if a response is missing from `responses` or holds the wrong kind.
    pub fn new(
        sampler: &'a S,
        roster: &'a Roster,
        responses: &'a ReporterStore,
        config: &ErrorConfig,
    ) -> Result<Self, Error> {
        let evaluator = SampleEvaluator::new(sampler, roster, &EvaluateConfig::default())?;

        if config.response.len() != roster.len() {
            return Err(Error::ParamLength {
                field: "response",
                expected: roster.len(),
                actual: config.response.len(),
            });
        }

        let kinds = config.resolve_types(roster)?;
        let resolved = config
            .response
            .iter()
            .zip(kinds)
            .map(|(name, kind)| Response::resolve(name, kind, responses, sampler.num_columns()))
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            evaluator,
            responses: resolved,
            compute_rmse: config.compute_rmse,
        })
    }

    /// Runs one pass: predict, subtract responses, and reduce the RMSE if enabled.
    ///
    /// With RMSE enabled this is a collective call: every rank in `comm`
    /// must run its pass for any of them to return.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails, a response does not match its
    /// model's predictions, or the collective sum fails.
    pub fn execute<C: Communicator + ?Sized>(&self, comm: &C) -> Result<ErrorReport, Error> {
        let sampler = self.evaluator.sampler();
        let roster = self.evaluator.roster();

        let predictions = self.evaluator.execute()?;
        let responses = self
            .responses
            .iter()
            .map(|response| response.rows(sampler))
            .collect::<Result<Vec<_>, _>>()?;
        let residuals = predictions.into_residuals(roster, &responses)?;

        let rmse = if self.compute_rmse {
            let partial = accumulate_squares(&residuals, sampler.num_rows());
            let rmse = reduce_rmse(partial, comm)?;
            for (entry, value) in roster.iter().zip(&rmse) {
                tracing::info!(model = entry.name(), rmse = *value, "surrogate error");
            }
            Some(rmse)
        } else {
            None
        };

        Ok(ErrorReport { residuals, rmse })
    }
}

/// Sums each model's squared errors over the local rows, divided by `num_rows`.
///
/// `num_rows` must be the global row count so that the per-rank sums add up
/// to the global mean square error.
#[must_use]
pub fn accumulate_squares(residuals: &Residuals, num_rows: usize) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let n = num_rows as f64;
    residuals
        .errors()
        .iter()
        .map(|errors| errors.scaled_sum_of_squares(n))
        .collect()
}

/// Sums `partial` across every rank in `comm` and takes the element-wise square root.
///
/// # Errors
///
/// Returns an error if the collective sum fails.
pub fn reduce_rmse<C: Communicator + ?Sized>(
    mut partial: Vec<f64>,
    comm: &C,
) -> Result<Vec<f64>, Error> {
    comm.sum(&mut partial)?;
    for value in &mut partial {
        *value = value.sqrt();
    }
    Ok(partial)
}
