//! Evaluation drivers for surrogate models.
//!
//! A driver runs every model in a [`Roster`] over the rows a [`Sampler`]
//! assigns to the calling rank and publishes the results to a [`Reporter`]:
//!
//! - [`SampleEvaluator`] stores each model's predictions, with optional
//!   standard deviations for scalar models.
//! - [`ErrorEvaluator`] turns the predictions into signed errors against
//!   known responses and can reduce them into a global RMSE per model
//!   through a [`Communicator`].
//!
//! Both drivers are configured with plain structs ([`EvaluateConfig`],
//! [`ErrorConfig`]) that deserialize from TOML when the `serde` feature is
//! enabled.
//!
//! [`Sampler`]: umbra_core::Sampler
//! [`Reporter`]: umbra_core::Reporter
//! [`Communicator`]: umbra_core::Communicator

mod config;
mod error;
mod error_eval;
mod evaluate;
mod output;
mod response;
mod roster;

pub use config::{ErrorConfig, EvaluateConfig};
pub use error::Error;
pub use error_eval::{ErrorEvaluator, ErrorReport, RMSE_SLOT, accumulate_squares, reduce_rmse};
pub use evaluate::SampleEvaluator;
pub use output::{ModelOutput, Predictions, Residuals};
pub use response::ResponseRows;
pub use roster::{Roster, RosterEntry};
