//! Turn allocation and priority ordering
//!
//! Two independent structures that both serve entries deterministically:
//! a round-robin [`TurnScheduler`] built on a FIFO [`ParticipantQueue`],
//! and a [`PriorityQueue`] that breaks priority ties by arrival order.
//!
//! Neither structure locks internally; mutation goes through `&mut self`.

mod error;
mod fifo;
mod priority_queue;
mod turns;

pub use error::QueueError;
pub use fifo::ParticipantQueue;
pub use priority_queue::{Backend, PriorityItem, PriorityQueue};
pub use turns::{TurnScheduler, TurnStats};
