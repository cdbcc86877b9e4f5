//! Domain types for Turnstile
//!
//! Participants and their turn budgets for the round-robin scheduler, and
//! the named priority scale used with the priority queue.

mod participant;
mod priority;

pub use participant::{Participant, ParticipantSpec, TurnBudget};
pub use priority::{Priority, parse_level};
