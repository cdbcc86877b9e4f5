//! Scripted scenarios
//!
//! A scenario is a YAML list of steps run against one turn scheduler and one
//! priority queue:
//!
//! ```yaml
//! backend: scan
//! steps:
//!   - add: { name: Alice, turns: 2 }
//!   - add: { name: Bob }
//!   - serve: 5
//!   - push: { value: deploy, priority: high }
//!   - push: { value: page, priority: 9 }
//!   - pop: 3
//! ```
//!
//! Failures from an empty structure are recorded as outcomes and the script
//! keeps going.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{Participant, ParticipantSpec, Priority};
use crate::scheduler::{Backend, PriorityQueue, TurnScheduler};

/// A parsed scenario file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    /// Priority queue backend, overriding config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,

    /// Budget for `add` steps without `turns`, overriding config
    #[serde(default, rename = "default-turns", skip_serializing_if = "Option::is_none")]
    pub default_turns: Option<i64>,

    /// Steps are single-key maps (`- serve: 2`) rather than YAML `!tags`
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// One scripted operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Register a participant with the turn scheduler
    Add(ParticipantSpec),
    /// Serve this many turns
    Serve(usize),
    /// Enqueue a payload on the priority queue
    Push(PushSpec),
    /// Dequeue this many payloads
    Pop(usize),
}

/// Payload and optional priority for a `push` step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSpec {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityValue>,
}

/// A priority written either as a named level or a raw integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriorityValue {
    Raw(i64),
    Named(Priority),
}

impl PriorityValue {
    pub fn level(self) -> i64 {
        match self {
            Self::Raw(level) => level,
            Self::Named(priority) => priority.weight(),
        }
    }
}

/// What happened when a step ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Outcome {
    Added { participant: Participant },
    Served { participant: Participant, retired: bool },
    Pushed { value: String, priority: i64 },
    Popped { value: String },
    Error { op: String, message: String },
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).context(format!("Failed to read scenario {}", path.display()))?;
        let scenario = Self::from_yaml(&content).context(format!("Failed to parse scenario {}", path.display()))?;
        info!(path = %path.display(), steps = scenario.steps.len(), "Loaded scenario");
        Ok(scenario)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        Ok(scenario)
    }

    /// Run every step in order and collect the outcomes
    pub fn run(&self, config: &Config) -> Vec<Outcome> {
        let backend = self.backend.unwrap_or(config.priority.backend);
        let default_turns = self.default_turns.unwrap_or(config.scheduler.default_turns);
        let default_priority = config.priority.default_priority.weight();
        debug!(%backend, default_turns, default_priority, "Scenario::run: called");

        let mut scheduler = TurnScheduler::new();
        let mut queue: PriorityQueue<String> = PriorityQueue::with_backend(backend);
        let mut outcomes = Vec::new();

        for step in &self.steps {
            match step {
                Step::Add(spec) => {
                    let turns = spec.turns_or(default_turns);
                    scheduler.add_participant(spec.name.clone(), turns);
                    outcomes.push(Outcome::Added {
                        participant: Participant::new(spec.name.clone(), turns),
                    });
                }
                Step::Serve(count) => {
                    for _ in 0..*count {
                        match scheduler.serve_next() {
                            Ok(participant) => {
                                let retired = participant.is_retired();
                                outcomes.push(Outcome::Served { participant, retired });
                            }
                            Err(e) => {
                                debug!(error = %e, "Scenario::run: serve failed, skipping rest of step");
                                outcomes.push(Outcome::Error {
                                    op: "serve".to_string(),
                                    message: e.to_string(),
                                });
                                break;
                            }
                        }
                    }
                }
                Step::Push(push) => {
                    let priority = push.priority.map(PriorityValue::level).unwrap_or(default_priority);
                    queue.enqueue(push.value.clone(), priority);
                    outcomes.push(Outcome::Pushed {
                        value: push.value.clone(),
                        priority,
                    });
                }
                Step::Pop(count) => {
                    for _ in 0..*count {
                        match queue.dequeue() {
                            Ok(value) => outcomes.push(Outcome::Popped { value }),
                            Err(e) => {
                                debug!(error = %e, "Scenario::run: pop failed, skipping rest of step");
                                outcomes.push(Outcome::Error {
                                    op: "pop".to_string(),
                                    message: e.to_string(),
                                });
                                break;
                            }
                        }
                    }
                }
            }
        }

        outcomes
    }
}
