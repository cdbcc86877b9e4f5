//! Turnstile - round-robin turns and FIFO-fair priorities
//!
//! Turnstile provides two small deterministic serving structures:
//!
//! - [`TurnScheduler`] hands out turns in a circle. Each participant has a
//!   turn budget; finite budgets shrink by one per turn and the participant
//!   leaves the rotation after its last turn, unlimited budgets never change.
//! - [`PriorityQueue`] always yields the most urgent payload and breaks ties
//!   by arrival order, whichever storage [`Backend`] it uses.
//!
//! # Example
//!
//! ```
//! use turnstile::{PriorityQueue, TurnScheduler};
//!
//! let mut turns = TurnScheduler::new();
//! turns.add_participant("Alice", 2);
//! turns.add_participant("Bob", 0);
//! assert_eq!(turns.serve_next()?.name(), "Alice");
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("A", 1);
//! queue.enqueue("B", 3);
//! assert_eq!(queue.dequeue()?, "B");
//! # Ok::<(), turnstile::QueueError>(())
//! ```
//!
//! # Modules
//!
//! - [`scheduler`] - FIFO queue, turn scheduler and priority queue
//! - [`domain`] - Participants, turn budgets and named priorities
//! - [`scenario`] - YAML scripts driving both structures
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod scenario;
pub mod scheduler;

// Re-export commonly used types
pub use config::{Config, PriorityConfig, SchedulerConfig};
pub use domain::{Participant, ParticipantSpec, Priority, TurnBudget};
pub use scenario::{Outcome, Scenario, Step};
pub use scheduler::{Backend, ParticipantQueue, PriorityItem, PriorityQueue, QueueError, TurnScheduler, TurnStats};
