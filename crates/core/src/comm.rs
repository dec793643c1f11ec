use std::sync::{Arc, Barrier, Mutex, PoisonError};

use thiserror::Error;

/// Errors that can occur during a collective operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommError {
    #[error("ranks contributed buffers of different lengths to a collective sum")]
    LengthMismatch,

    #[error("another rank panicked during a collective operation")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for CommError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// A group of ranks that can combine per-rank values.
///
/// [`sum`](Communicator::sum) is a blocking collective: every rank in the
/// group must call it with a buffer of the same length. When it returns, each
/// rank's buffer holds the element-wise sum over all ranks. A rank that never
/// reaches the call blocks the others indefinitely.
pub trait Communicator {
    /// Returns this rank's index within the group.
    fn rank(&self) -> usize;

    /// Returns the number of ranks in the group.
    fn size(&self) -> usize;

    /// Replaces `values` with the element-wise sum of every rank's `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ranks disagree on the buffer length or if the
    /// collective cannot complete.
    fn sum(&self, values: &mut [f64]) -> Result<(), CommError>;
}

/// A group containing only the calling process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleProcess;

impl Communicator for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn sum(&self, _values: &mut [f64]) -> Result<(), CommError> {
        Ok(())
    }
}

/// A group of ranks running as threads within one process.
///
/// [`ThreadGroup::new`] returns one handle per rank; move each handle onto
/// its own thread. Handles share a barrier and an accumulation buffer, so
/// every handle must take part in each collective call.
#[derive(Debug, Clone)]
pub struct ThreadGroup {
    rank: usize,
    size: usize,
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    barrier: Barrier,
    round: Mutex<Round>,
}

#[derive(Debug, Default)]
struct Round {
    sum: Option<Vec<f64>>,
    mismatch: bool,
}

impl ThreadGroup {
    /// Creates handles for a group of `size` ranks, ordered by rank.
    #[must_use]
    pub fn new(size: usize) -> Vec<Self> {
        let shared = Arc::new(Shared {
            barrier: Barrier::new(size),
            round: Mutex::new(Round::default()),
        });

        (0..size)
            .map(|rank| Self {
                rank,
                size,
                shared: Arc::clone(&shared),
            })
            .collect()
    }
}

impl Communicator for ThreadGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn sum(&self, values: &mut [f64]) -> Result<(), CommError> {
        // Every rank has finished reading the previous round before the leader resets it.
        if self.shared.barrier.wait().is_leader() {
            *self.shared.round.lock()? = Round::default();
        }
        self.shared.barrier.wait();

        {
            let mut round = self.shared.round.lock()?;
            let Round { sum, mismatch } = &mut *round;
            match sum {
                None => *sum = Some(values.to_vec()),
                Some(totals) => {
                    if totals.len() == values.len() {
                        for (total, value) in totals.iter_mut().zip(values.iter()) {
                            *total += value;
                        }
                    } else {
                        *mismatch = true;
                    }
                }
            }
        }
        self.shared.barrier.wait();

        let round = self.shared.round.lock()?;
        if round.mismatch {
            return Err(CommError::LengthMismatch);
        }
        if let Some(sum) = &round.sum {
            values.copy_from_slice(sum);
        }
        Ok(())
    }
}
