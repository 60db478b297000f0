//! Command-line interface components.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use crate::RosterParser;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Parse a student grade roster file and print it as tab-separated columns")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the roster text file (one student per line)
    #[arg(value_name = "ROSTER_PATH")]
    pub roster_path: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Log level implied by the verbosity flag
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Set up structured logging on stderr, keeping stdout for the roster table
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roster_processor={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Parse the roster file and print one tab-separated line per student
///
/// Students are printed in ascending identifier order so repeated runs over
/// the same file produce identical output.
pub fn run(args: &Args) -> Result<()> {
    let result = RosterParser::new()
        .parse_file(&args.roster_path)
        .with_context(|| format!("Failed to parse roster {}", args.roster_path.display()))?;

    let mut students: Vec<_> = result.roster.values().collect();
    students.sort_by_key(|student| student.num_id);

    for student in students {
        println!("{student}");
    }

    let summary = format!(
        "{} students parsed from {} lines ({} skipped)",
        result.stats.records_parsed, result.stats.lines_total, result.stats.lines_skipped
    );
    if result.stats.lines_skipped == 0 {
        eprintln!("{}", summary.green());
    } else {
        eprintln!("{}", summary.yellow());
    }

    Ok(())
}
