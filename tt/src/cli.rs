//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::ParticipantSpec;
use crate::scheduler::Backend;

/// Turnstile - round-robin turns and FIFO-fair priorities
#[derive(Parser)]
#[command(
    name = "tt",
    about = "Round-robin turn scheduler and FIFO-fair priority queue",
    version,
    after_help = "Set RUST_LOG or pass --verbose to see scheduling decisions on stderr"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Hand out round-robin turns
    Turns {
        /// Participants as NAME or NAME:TURNS (TURNS <= 0 means unlimited)
        #[arg(short, long = "participant", value_name = "NAME[:TURNS]", required = true)]
        participants: Vec<ParticipantSpec>,

        /// Number of turns to serve (default: until everyone is out of turns)
        #[arg(short = 'n', long)]
        rounds: Option<usize>,

        /// Stop after this many turns when draining
        #[arg(long, conflicts_with = "rounds")]
        max_rounds: Option<usize>,
    },

    /// Drain a priority queue in priority order
    Priority {
        /// Items as VALUE or VALUE:PRIORITY (low, normal, high, critical or an integer).
        /// A suffix that is not a priority stays part of VALUE
        #[arg(short, long = "item", value_name = "VALUE[:PRIORITY]", required = true)]
        items: Vec<ItemSpec>,

        /// Queue backend
        #[arg(short, long)]
        backend: Option<Backend>,
    },

    /// Run a YAML scenario script
    Run {
        /// Scenario file
        #[arg(value_name = "SCENARIO")]
        path: PathBuf,
    },
}

/// A `value[:priority]` item from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub value: String,
    pub priority: Option<i64>,
}

impl std::str::FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // The suffix after the last ':' is a priority only if it parses as one
        let (value, priority) = match s.rsplit_once(':') {
            Some((value, suffix)) => match crate::domain::parse_level(suffix) {
                Ok(priority) => (value.trim(), Some(priority)),
                Err(_) => (s, None),
            },
            None => (s, None),
        };

        if value.is_empty() {
            return Err(format!("Missing item value in '{}'", s));
        }

        Ok(Self {
            value: value.to_string(),
            priority,
        })
    }
}

/// Output format for results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
