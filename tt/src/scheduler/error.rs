//! Queue error types

use thiserror::Error;

/// Errors raised when there is nothing to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A FIFO or priority queue had no pending entries
    #[error("The queue is empty.")]
    Empty,

    /// The turn scheduler had no participants left
    #[error("No one in the queue.")]
    NoParticipants,
}

impl QueueError {
    pub fn is_empty(&self) -> bool {
        matches!(self, QueueError::Empty)
    }

    pub fn is_no_participants(&self) -> bool {
        matches!(self, QueueError::NoParticipants)
    }
}
