use std::{fmt, str::FromStr};

use thiserror::Error;

/// The shape of the values a model produces for each sample row.
///
/// Configuration files name the kinds `real` and `vector_real`; with the
/// `serde` feature both directions go through [`FromStr`] and [`Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum OutputKind {
    /// One real value per row.
    Scalar,

    /// A sequence of real values per row.
    Vector,
}

/// Error returned when parsing an unknown output kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output kind `{0}`, expected `real` or `vector_real`")]
pub struct KindError(pub String);

impl OutputKind {
    /// Returns the configuration name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "real",
            Self::Vector => "vector_real",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for OutputKind {
    type Error = KindError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<OutputKind> for String {
    fn from(kind: OutputKind) -> Self {
        kind.name().to_string()
    }
}

impl FromStr for OutputKind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real" => Ok(Self::Scalar),
            "vector_real" => Ok(Self::Vector),
            other => Err(KindError(other.to_string())),
        }
    }
}
