use ndarray::Array2;
use thiserror::Error;

/// Errors that can occur when building or reading a sampler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    #[error("rank {rank} is outside a group of {size}")]
    InvalidRank { rank: usize, size: usize },

    #[error("local row {index} is out of range for {count} local rows")]
    RowOutOfRange { index: usize, count: usize },
}

/// A globally indexed sample set, partitioned disjointly across ranks.
///
/// Each rank owns a contiguous block of rows starting at
/// [`local_row_begin`](Sampler::local_row_begin). Local indices run from zero
/// to [`num_local_rows`](Sampler::num_local_rows) and map to stable global
/// indices for the duration of an evaluation pass.
pub trait Sampler {
    /// Returns the number of rows across all ranks.
    fn num_rows(&self) -> usize;

    /// Returns the number of rows owned by this rank.
    fn num_local_rows(&self) -> usize;

    /// Returns the number of columns (input features) per row.
    fn num_columns(&self) -> usize;

    /// Returns the global index of this rank's first row.
    fn local_row_begin(&self) -> usize;

    /// Returns the input features of local row `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::RowOutOfRange`] if `index` is not a local row.
    fn local_row(&self, index: usize) -> Result<Vec<f64>, SamplerError>;
}

/// A sampler backed by an in-memory matrix with one sample per row.
///
/// Rows are split into contiguous blocks as evenly as possible, with the
/// first `rows % size` ranks owning one extra row.
#[derive(Debug, Clone)]
pub struct MatrixSampler {
    data: Array2<f64>,
    begin: usize,
    end: usize,
}

impl MatrixSampler {
    /// Creates a sampler that owns every row of `data`.
    #[must_use]
    pub fn new(data: Array2<f64>) -> Self {
        let end = data.nrows();
        Self {
            data,
            begin: 0,
            end,
        }
    }

    /// Creates the view of `data` owned by `rank` in a group of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidRank`] if `rank >= size`.
    pub fn partitioned(data: Array2<f64>, rank: usize, size: usize) -> Result<Self, SamplerError> {
        if rank >= size {
            return Err(SamplerError::InvalidRank { rank, size });
        }

        let rows = data.nrows();
        let base = rows / size;
        let extra = rows % size;

        let begin = rank * base + rank.min(extra);
        let end = begin + base + usize::from(rank < extra);

        Ok(Self { data, begin, end })
    }

    /// Returns the global row range owned by this sampler.
    #[must_use]
    pub fn local_range(&self) -> std::ops::Range<usize> {
        self.begin..self.end
    }
}

impl Sampler for MatrixSampler {
    fn num_rows(&self) -> usize {
        self.data.nrows()
    }

    fn num_local_rows(&self) -> usize {
        self.end - self.begin
    }

    fn num_columns(&self) -> usize {
        self.data.ncols()
    }

    fn local_row_begin(&self) -> usize {
        self.begin
    }

    fn local_row(&self, index: usize) -> Result<Vec<f64>, SamplerError> {
        let count = self.num_local_rows();
        if index >= count {
            return Err(SamplerError::RowOutOfRange { index, count });
        }
        Ok(self.data.row(self.begin + index).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    fn matrix(rows: usize) -> Array2<f64> {
        Array2::from_shape_fn((rows, 2), |(i, j)| (10 * i + j) as f64)
    }

    #[test]
    fn single_rank_owns_all_rows() {
        let sampler = MatrixSampler::new(array![[1.0, 2.0], [3.0, 4.0]]);

        assert_eq!(sampler.num_rows(), 2);
        assert_eq!(sampler.num_local_rows(), 2);
        assert_eq!(sampler.num_columns(), 2);
        assert_eq!(sampler.local_row(1), Ok(vec![3.0, 4.0]));
    }

    #[test]
    fn partitions_cover_rows_disjointly() {
        let size = 3;
        let ranges: Vec<_> = (0..size)
            .map(|rank| {
                MatrixSampler::partitioned(matrix(7), rank, size)
                    .unwrap()
                    .local_range()
            })
            .collect();

        assert_eq!(ranges, vec![0..3, 3..5, 5..7]);
    }

    #[test]
    fn local_rows_map_to_global_rows() {
        let sampler = MatrixSampler::partitioned(matrix(4), 1, 2).unwrap();

        assert_eq!(sampler.num_rows(), 4);
        assert_eq!(sampler.num_local_rows(), 2);
        assert_eq!(sampler.local_row_begin(), 2);
        assert_eq!(sampler.local_row(0), Ok(vec![20.0, 21.0]));
    }

    #[test]
    fn more_ranks_than_rows_leaves_some_empty() {
        let sampler = MatrixSampler::partitioned(matrix(1), 1, 2).unwrap();
        assert_eq!(sampler.num_local_rows(), 0);
    }

    #[test]
    fn errors_on_invalid_rank_and_row() {
        assert_eq!(
            MatrixSampler::partitioned(matrix(2), 2, 2).unwrap_err(),
            SamplerError::InvalidRank { rank: 2, size: 2 }
        );

        let sampler = MatrixSampler::partitioned(matrix(4), 0, 2).unwrap();
        assert_eq!(
            sampler.local_row(2),
            Err(SamplerError::RowOutOfRange { index: 2, count: 2 })
        );
    }
}
