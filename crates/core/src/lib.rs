//! Core traits and types for the Umbra framework.
//!
//! This crate defines the contracts that surrogate models, samplers, and
//! evaluation drivers build on:
//!
//! - [`Surrogate`]: a trained model mapping an input point to a prediction
//! - [`OutputKind`]: whether a model produces one value or a vector per row
//! - [`Sampler`]: a globally indexed sample set partitioned across ranks
//! - [`Communicator`]: the collective sum used to combine per-rank results
//! - [`Reporter`]: a sink for named result slots, with [`ReporterStore`] as
//!   the in-memory implementation
//! - [`Values`]: the shape-tagged payload stored in a reporter slot

mod comm;
mod kind;
mod reporter;
mod sampler;
mod surrogate;
mod values;

pub use comm::{CommError, Communicator, SingleProcess, ThreadGroup};
pub use kind::{KindError, OutputKind};
pub use reporter::{Reporter, ReporterStore};
pub use sampler::{MatrixSampler, Sampler, SamplerError};
pub use surrogate::{Surrogate, SurrogateError};
pub use values::Values;
