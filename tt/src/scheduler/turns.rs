//! Round-robin turn scheduler

use serde::Serialize;
use tracing::debug;

use crate::domain::Participant;

use super::error::QueueError;
use super::fifo::ParticipantQueue;

/// Counters for the turn scheduler
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TurnStats {
    /// Turns handed out so far
    pub total_served: u64,
    /// Participants that used up their budget
    pub total_retired: u64,
    /// Most participants in rotation at once
    pub peak_len: usize,
}

/// Circular scheduler that hands out turns until each budget runs out.
///
/// Participants are served front to back. After its turn a participant goes
/// to the back of the line, unless that turn was its last one.
#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    queue: ParticipantQueue,
    stats: TurnStats,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant at the back of the line; `turns <= 0` means unlimited
    pub fn add_participant(&mut self, name: impl Into<String>, turns: i64) {
        let participant = Participant::new(name, turns);
        debug!(name = %participant.name(), budget = %participant.budget(), "TurnScheduler::add_participant: called");
        self.queue.enqueue(participant);
        self.stats.peak_len = self.stats.peak_len.max(self.queue.len());
    }

    /// Serve the participant at the front and return it.
    ///
    /// Finite budgets come back already decremented; a returned budget of
    /// `Finite(0)` means that was the participant's last turn.
    pub fn serve_next(&mut self) -> Result<Participant, QueueError> {
        debug!(len = self.queue.len(), "TurnScheduler::serve_next: called");
        if self.queue.is_empty() {
            debug!("TurnScheduler::serve_next: no participants");
            return Err(QueueError::NoParticipants);
        }

        let mut participant = self.queue.dequeue().map_err(|_| QueueError::NoParticipants)?;
        self.stats.total_served += 1;

        if participant.is_unlimited() {
            debug!(name = %participant.name(), "TurnScheduler::serve_next: unlimited branch, requeueing");
            self.queue.enqueue(participant.clone());
            return Ok(participant);
        }

        if participant.take_turn() {
            debug!(name = %participant.name(), budget = %participant.budget(), "TurnScheduler::serve_next: turns left, requeueing");
            self.queue.enqueue(participant.clone());
        } else {
            debug!(name = %participant.name(), "TurnScheduler::serve_next: budget exhausted, retiring");
            self.stats.total_retired += 1;
        }

        Ok(participant)
    }

    /// The participant `serve_next` would serve, before its turn is taken
    pub fn peek(&self) -> Option<&Participant> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Participants in serving order
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.queue.iter()
    }

    pub fn stats(&self) -> &TurnStats {
        &self.stats
    }
}

impl std::fmt::Display for TurnScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.queue)
    }
}
