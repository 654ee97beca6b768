use std::process::Command;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;

use crate::errors::PapirunError;
use crate::types::RunOutcome;

/// Run the benchmark command through the shell and block until it exits.
///
/// The command goes through `sh -c` so users can pass anything they would run
/// interactively (`./tiling_alpha`, `taskset -c 0-7 ./tiling_alpha`, ...).
/// The exit status is returned, not judged here: the aggregator decides what
/// a non-zero exit means for the run.
pub fn run_benchmark(command: &str) -> Result<RunOutcome> {
    let started_at = Utc::now();
    let start = Instant::now();

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|source| PapirunError::BenchmarkSpawn {
            command: command.to_string(),
            source,
        })?;

    Ok(RunOutcome {
        exit_code: status.code(),
        started_at,
        duration: start.elapsed(),
    })
}
