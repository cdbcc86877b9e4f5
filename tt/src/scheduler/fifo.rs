//! FIFO participant queue backing the round-robin scheduler

use std::collections::VecDeque;

use crate::domain::Participant;

use super::error::QueueError;

/// Ordered participant storage: front is oldest, back is newest.
///
/// Duplicate names are kept as distinct entries.
#[derive(Debug, Clone, Default)]
pub struct ParticipantQueue {
    queue: VecDeque<Participant>,
}

impl ParticipantQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant to the back
    pub fn enqueue(&mut self, participant: Participant) {
        self.queue.push_back(participant);
    }

    /// Remove the participant at the front
    pub fn dequeue(&mut self) -> Result<Participant, QueueError> {
        self.queue.pop_front().ok_or(QueueError::Empty)
    }

    pub fn front(&self) -> Option<&Participant> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate front to back
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.queue.iter()
    }
}

impl std::fmt::Display for ParticipantQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self.queue.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", entries.join(", "))
    }
}
