use std::borrow::Cow;

use umbra_core::{OutputKind, ReporterStore, Sampler};

use crate::Error;

const SAMPLER_COLUMN_PREFIX: &str = "sampler/col_";

/// Known response values for one model, indexed by local row.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseRows<'a> {
    Real(Cow<'a, [f64]>),
    VectorReal(&'a [Vec<f64>]),
}

impl ResponseRows<'_> {
    #[must_use]
    pub fn kind(&self) -> OutputKind {
        match self {
            Self::Real(_) => OutputKind::Scalar,
            Self::VectorReal(_) => OutputKind::Vector,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Real(rows) => rows.len(),
            Self::VectorReal(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a model's known response comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Response<'a> {
    Real(&'a [f64]),
    VectorReal(&'a [Vec<f64>]),
    SamplerColumn(usize),
}

impl<'a> Response<'a> {
    /// Looks up the response `name` with the configured `kind`.
    pub(crate) fn resolve(
        name: &str,
        kind: OutputKind,
        store: &'a ReporterStore,
        num_columns: usize,
    ) -> Result<Self, Error> {
        if let Some(index) = name.strip_prefix(SAMPLER_COLUMN_PREFIX) {
            let column = index
                .parse::<usize>()
                .ok()
                .filter(|column| *column < num_columns)
                .ok_or_else(|| Error::InvalidColumn {
                    name: name.to_string(),
                })?;
            if kind != OutputKind::Scalar {
                return Err(Error::ResponseKind {
                    name: name.to_string(),
                    expected: kind,
                    actual: OutputKind::Scalar,
                });
            }
            return Ok(Self::SamplerColumn(column));
        }

        let values = store.get(name).ok_or_else(|| Error::MissingResponse {
            name: name.to_string(),
        })?;

        match (kind, values.as_real(), values.as_vector_real()) {
            (OutputKind::Scalar, Some(rows), _) => Ok(Self::Real(rows)),
            (OutputKind::Vector, _, Some(rows)) => Ok(Self::VectorReal(rows)),
            _ => Err(Error::ResponseKind {
                name: name.to_string(),
                expected: kind,
                actual: values.kind(),
            }),
        }
    }

    /// Returns the response rows for the sampler's local rows.
    pub(crate) fn rows<S: Sampler + ?Sized>(&self, sampler: &S) -> Result<ResponseRows<'a>, Error> {
        match *self {
            Self::Real(rows) => Ok(ResponseRows::Real(Cow::Borrowed(rows))),
            Self::VectorReal(rows) => Ok(ResponseRows::VectorReal(rows)),
            Self::SamplerColumn(column) => {
                let rows = (0..sampler.num_local_rows())
                    .map(|index| -> Result<f64, Error> {
                        let row = sampler.local_row(index)?;
                        Ok(row.get(column).copied().unwrap_or(f64::NAN))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok(ResponseRows::Real(Cow::Owned(rows)))
            }
        }
    }
}
