//! Turnstile - round-robin turns and FIFO-fair priorities
//!
//! CLI entry point: builds a scheduler or priority queue from arguments or a
//! scenario file and prints what was served.

use std::fs;
use std::path::Path;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use turnstile::cli::{Cli, Command, ItemSpec, OutputFormat};
use turnstile::config::Config;
use turnstile::domain::ParticipantSpec;
use turnstile::scenario::{Outcome, Scenario};
use turnstile::scheduler::{Backend, PriorityQueue, TurnScheduler};

fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("Failed to create log directory")?;
            }
            let file = fs::File::create(path).context("Failed to create log file")?;
            tracing_subscriber::fmt()
                .with_writer(file)
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config is loaded before logging so `log-file` can take effect
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.verbose, config.log_file.as_deref()).context("Failed to setup logging")?;

    let outcomes = match cli.command {
        Command::Turns {
            participants,
            rounds,
            max_rounds,
        } => cmd_turns(&config, &participants, rounds, max_rounds),
        Command::Priority { items, backend } => cmd_priority(&config, &items, backend),
        Command::Run { path } => cmd_run(&config, &path)?,
    };

    render(&outcomes, &cli.format)
}

/// Serve round-robin turns
fn cmd_turns(
    config: &Config,
    participants: &[ParticipantSpec],
    rounds: Option<usize>,
    max_rounds: Option<usize>,
) -> Vec<Outcome> {
    debug!(count = participants.len(), ?rounds, ?max_rounds, "cmd_turns: called");
    let mut scheduler = TurnScheduler::new();
    for spec in participants {
        scheduler.add_participant(spec.name.clone(), spec.turns_or(config.scheduler.default_turns));
    }

    // Without an explicit count, drain until empty but never past the cap
    let (limit, drain) = match rounds {
        Some(n) => (n, false),
        None => (max_rounds.unwrap_or(config.scheduler.max_rounds), true),
    };

    let mut outcomes = Vec::new();
    for _ in 0..limit {
        if drain && scheduler.is_empty() {
            break;
        }
        match scheduler.serve_next() {
            Ok(participant) => {
                let retired = participant.is_retired();
                outcomes.push(Outcome::Served { participant, retired });
            }
            Err(e) => {
                outcomes.push(Outcome::Error {
                    op: "serve".to_string(),
                    message: e.to_string(),
                });
                break;
            }
        }
    }

    info!(served = scheduler.stats().total_served, remaining = scheduler.len(), "Turns served");
    outcomes
}

/// Drain a priority queue
fn cmd_priority(config: &Config, items: &[ItemSpec], backend: Option<Backend>) -> Vec<Outcome> {
    let backend = backend.unwrap_or(config.priority.backend);
    debug!(count = items.len(), %backend, "cmd_priority: called");

    let default_priority = config.priority.default_priority.weight();
    let mut queue = PriorityQueue::with_backend(backend);
    for item in items {
        queue.enqueue(item.value.clone(), item.priority.unwrap_or(default_priority));
    }

    queue
        .into_sorted_vec()
        .into_iter()
        .map(|value| Outcome::Popped { value })
        .collect()
}

/// Run a scenario file
fn cmd_run(config: &Config, path: &Path) -> Result<Vec<Outcome>> {
    let scenario = Scenario::load(path)?;
    Ok(scenario.run(config))
}

fn render(outcomes: &[Outcome], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(outcomes).context("Failed to serialize outcomes")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for outcome in outcomes {
                println!("{}", render_text(outcome));
            }
        }
    }
    Ok(())
}

fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added { participant } => format!("{} {}", "+".green(), participant),
        Outcome::Served { participant, retired } => {
            let line = format!("{} {}", "→".cyan(), participant);
            if *retired {
                format!("{} {}", line, "(done)".dimmed())
            } else {
                line
            }
        }
        Outcome::Pushed { value, priority } => {
            format!("{} {} {}", "+".green(), value, format!("[{}]", priority).dimmed())
        }
        Outcome::Popped { value } => format!("{} {}", "←".cyan(), value),
        Outcome::Error { op, message } => format!("{} {}: {}", "✗".red(), op, message),
    }
}
