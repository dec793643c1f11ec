use crate::OutputKind;

/// Per-row values stored in a reporter slot.
///
/// With the `serde` feature a slot is tagged by its kind name
/// (`real = [...]` or `vector_real = [[...]]`), so an empty slot keeps its kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Values {
    /// One value per row.
    #[cfg_attr(feature = "serde", serde(rename = "real"))]
    Real(Vec<f64>),

    /// A sequence of values per row.
    #[cfg_attr(feature = "serde", serde(rename = "vector_real"))]
    VectorReal(Vec<Vec<f64>>),
}

impl Values {
    /// Returns the output kind matching this shape.
    #[must_use]
    pub fn kind(&self) -> OutputKind {
        match self {
            Self::Real(_) => OutputKind::Scalar,
            Self::VectorReal(_) => OutputKind::Vector,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Real(values) => values.len(),
            Self::VectorReal(values) => values.len(),
        }
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the scalar rows, or `None` for vector-valued slots.
    #[must_use]
    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            Self::Real(values) => Some(values),
            Self::VectorReal(_) => None,
        }
    }

    /// Returns the vector rows, or `None` for scalar slots.
    #[must_use]
    pub fn as_vector_real(&self) -> Option<&[Vec<f64>]> {
        match self {
            Self::Real(_) => None,
            Self::VectorReal(values) => Some(values),
        }
    }
}

impl From<Vec<f64>> for Values {
    fn from(values: Vec<f64>) -> Self {
        Self::Real(values)
    }
}

impl From<Vec<Vec<f64>>> for Values {
    fn from(values: Vec<Vec<f64>>) -> Self {
        Self::VectorReal(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_the_shape() {
        let values = Values::from(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(values.kind(), OutputKind::Vector);
        assert_eq!(values.len(), 2);
        assert!(values.as_real().is_none());
    }

    #[cfg(feature = "serde")]
    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Slot {
        values: Values,
    }

    #[cfg(feature = "serde")]
    #[test]
    fn empty_slots_keep_their_kind_through_toml() {
        for values in [Values::Real(Vec::new()), Values::VectorReal(Vec::new())] {
            let slot = Slot { values };
            let text = toml::to_string(&slot).unwrap();
            let back: Slot = toml::from_str(&text).unwrap();
            assert_eq!(back, slot, "{text}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_tagged_slots_from_toml() {
        let slot: Slot = toml::from_str("values.vector_real = [[1.0, 2.0], [3.0]]").unwrap();
        assert_eq!(
            slot.values,
            Values::VectorReal(vec![vec![1.0, 2.0], vec![3.0]])
        );

        let slot: Slot = toml::from_str("values.real = [0.5]").unwrap();
        assert_eq!(slot.values.kind(), OutputKind::Scalar);
    }
}
