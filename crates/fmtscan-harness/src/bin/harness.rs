//! CLI entrypoint for the fmtscan conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fmtscan_harness::fixtures::FixtureSet;
use fmtscan_harness::runner::{run_set, scan_with_inferred};
use fmtscan_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

/// Conformance tooling for fmtscan.
#[derive(Debug, Parser)]
#[command(name = "fmtscan-harness")]
#[command(about = "Conformance testing harness for fmtscan")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the scanner against a JSON fixture set.
    Verify {
        /// Fixture JSON file.
        #[arg(long)]
        fixture: PathBuf,
        /// Optional structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Scan ad hoc input with a format string and print the results.
    Scan {
        /// Format string (sscanf syntax).
        #[arg(long)]
        format: String,
        /// Input text.
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify { fixture, log } => {
            let set = FixtureSet::from_file(&fixture)?;
            eprintln!(
                "Verifying {} case(s) from {} (family={})",
                set.cases.len(),
                fixture.display(),
                set.family
            );

            let mut emitter = match &log {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    Some(LogEmitter::to_file(path, &set.family)?)
                }
                None => None,
            };

            let results = run_set(&set)?;
            let mut failed = 0usize;
            for result in &results {
                let outcome = if result.passed {
                    Outcome::Pass
                } else {
                    failed += 1;
                    eprintln!("FAIL {}", result.case_name);
                    if let Some(diff) = &result.diff {
                        eprintln!("{diff}");
                    }
                    Outcome::Fail
                };
                if let Some(emitter) = &mut emitter {
                    let level = if result.passed {
                        LogLevel::Info
                    } else {
                        LogLevel::Error
                    };
                    let mut entry = LogEntry::new(String::new(), level, "case_result")
                        .with_case(&result.case_name)
                        .with_outcome(outcome);
                    if let Some(diff) = &result.diff {
                        entry = entry.with_detail(diff.clone());
                    }
                    emitter.emit_entry(entry)?;
                }
            }
            if let Some(emitter) = &mut emitter {
                emitter.flush()?;
            }

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                results.len(),
                results.len() - failed,
                failed
            );
            if failed != 0 {
                return Err(format!("{failed} fixture case(s) failed").into());
            }
        }
        Command::Scan { format, input } => {
            let (count, values) = scan_with_inferred(&input, &format)?;
            let body = serde_json::to_string_pretty(&serde_json::json!({
                "count": count,
                "values": values,
            }))?;
            println!("{body}");
        }
    }

    Ok(())
}
