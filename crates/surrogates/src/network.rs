//! Dense feed-forward networks.
//!
//! A [`DenseNetwork`] is a stack of fully connected [`Layer`]s. Hidden layers
//! apply an [`Activation`] after their affine transform, and the output layer
//! is linear with a single neuron, so a forward pass maps an input vector to
//! one real value.

use std::{fmt, str::FromStr};

use ndarray::{Array1, Array2, ArrayView1};
use thiserror::Error;

/// Errors that can occur when building or evaluating a network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("unknown activation `{0}`")]
    UnknownActivation(String),

    #[error("layer bias has {bias} entries but weights have {rows} rows")]
    BiasShape { rows: usize, bias: usize },

    #[error("layer {layer} expects {expected} inputs but the previous layer produces {actual}")]
    LayerShape {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("output layer must have exactly one neuron, found {0}")]
    OutputWidth(usize),

    #[error("output layer must be linear, found `{0}`")]
    OutputActivation(Activation),

    #[error("network expects {expected} inputs, got {actual}")]
    InputLength { expected: usize, actual: usize },
}

/// A trained function approximator that maps a fixed-length input to one value.
///
/// Implementations are immutable once loaded.
pub trait FeedForward: Send + Sync {
    /// Returns the number of inputs the network was trained on.
    fn num_inputs(&self) -> usize;

    /// Evaluates the network at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InputLength`] if `x` has the wrong length.
    fn forward(&self, x: ArrayView1<'_, f64>) -> Result<f64, NetworkError>;
}

/// Element-wise activation applied after a layer's affine transform.
///
/// Activations are named `relu`, `sigmoid`, `tanh`, `elu`, and `linear`.
/// With the `serde` feature they are read and written by those names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Activation {
    #[default]
    Relu,
    Sigmoid,
    Tanh,
    Elu,
    Linear,
}

impl Activation {
    /// Applies the activation to a single value.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Relu => value.max(0.0),
            Self::Sigmoid => 1.0 / (1.0 + (-value).exp()),
            Self::Tanh => value.tanh(),
            Self::Elu => {
                if value > 0.0 {
                    value
                } else {
                    value.exp_m1()
                }
            }
            Self::Linear => value,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Relu => "relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::Elu => "elu",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Activation {
    type Error = NetworkError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Activation> for String {
    fn from(activation: Activation) -> Self {
        activation.name().to_string()
    }
}

impl FromStr for Activation {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relu" => Ok(Self::Relu),
            "sigmoid" => Ok(Self::Sigmoid),
            "tanh" => Ok(Self::Tanh),
            "elu" => Ok(Self::Elu),
            "linear" => Ok(Self::Linear),
            other => Err(NetworkError::UnknownActivation(other.to_string())),
        }
    }
}

/// A fully connected layer computing `activation(weights · x + bias)`.
///
/// `weights` has one row per neuron and one column per input.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

impl Layer {
    /// Creates a layer from its trained weights and bias.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::BiasShape`] if `bias` does not have one entry
    /// per row of `weights`.
    pub fn new(
        weights: Array2<f64>,
        bias: Array1<f64>,
        activation: Activation,
    ) -> Result<Self, NetworkError> {
        if bias.len() != weights.nrows() {
            return Err(NetworkError::BiasShape {
                rows: weights.nrows(),
                bias: bias.len(),
            });
        }
        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    /// Creates a layer with no activation.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::BiasShape`] if the shapes disagree.
    pub fn linear(weights: Array2<f64>, bias: Array1<f64>) -> Result<Self, NetworkError> {
        Self::new(weights, bias, Activation::Linear)
    }

    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.weights.ncols()
    }

    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.weights.nrows()
    }

    fn apply(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        let activation = self.activation;
        let mut out = self.weights.dot(&x) + &self.bias;
        out.mapv_inplace(|v| activation.apply(v));
        out
    }
}

/// A dense feed-forward network with a single linear output.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseNetwork {
    layers: Vec<Layer>,
}

impl DenseNetwork {
    /// Creates a network from hidden layers followed by a linear output layer.
    ///
    /// # Errors
    ///
    /// Returns an error if consecutive layer shapes disagree or if `output`
    /// is not a single linear neuron.
    pub fn new(hidden: Vec<Layer>, output: Layer) -> Result<Self, NetworkError> {
        if output.num_outputs() != 1 {
            return Err(NetworkError::OutputWidth(output.num_outputs()));
        }
        if output.activation != Activation::Linear {
            return Err(NetworkError::OutputActivation(output.activation));
        }

        let mut layers = hidden;
        layers.push(output);

        for (index, pair) in layers.windows(2).enumerate() {
            let [prev, next] = pair else { continue };
            if next.num_inputs() != prev.num_outputs() {
                return Err(NetworkError::LayerShape {
                    layer: index + 1,
                    expected: next.num_inputs(),
                    actual: prev.num_outputs(),
                });
            }
        }

        Ok(Self { layers })
    }

    /// Returns the network's layers, output layer last.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl FeedForward for DenseNetwork {
    fn num_inputs(&self) -> usize {
        self.layers.first().map_or(0, Layer::num_inputs)
    }

    fn forward(&self, x: ArrayView1<'_, f64>) -> Result<f64, NetworkError> {
        let expected = self.num_inputs();
        if x.len() != expected {
            return Err(NetworkError::InputLength {
                expected,
                actual: x.len(),
            });
        }

        let mut activations = x.to_owned();
        for layer in &self.layers {
            activations = layer.apply(activations.view());
        }

        // The output layer has exactly one neuron.
        Ok(activations[0])
    }
}
