//! Surrogate model implementations for the Umbra framework.
//!
//! - [`network`]: dense feed-forward networks and the [`FeedForward`]
//!   contract for trained function approximators
//! - [`standardized`]: [`StandardizedFeedForward`], which wraps a network
//!   with training-derived input and response standardization
//!
//! [`FeedForward`]: network::FeedForward
//! [`StandardizedFeedForward`]: standardized::StandardizedFeedForward

pub mod network;
pub mod standardized;

pub use network::{Activation, DenseNetwork, FeedForward, Layer, NetworkError};
pub use standardized::{StandardizedFeedForward, TrainedState};
