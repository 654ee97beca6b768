use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use papirun::aggregate::{self, RunPlan};
use papirun::config;
use papirun::csv;
use papirun::display;
use papirun::report;

#[derive(Parser)]
#[command(
    name = "papirun",
    version,
    about = "Run a PAPI-instrumented benchmark repeatedly and aggregate counter reports into CSV"
)]
struct Cli {
    /// Benchmark command to run each iteration (passed to `sh -c`)
    command: Option<String>,

    /// Number of benchmark runs
    #[arg(short = 'n', long)]
    runs: Option<usize>,

    /// Directory the benchmark writes its PAPI report into
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// CSV output path
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// PAPI region name to read counters from
    #[arg(long)]
    region: Option<String>,

    /// Counter summed across threads for the run summary
    #[arg(long)]
    counter: Option<String>,

    /// Config file (default lookup: ./papirun.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the run summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let file = config::load(cli.config.as_deref())?;

    // CLI beats config file beats built-in defaults (original tool's values).
    let runs = cli.runs.or(file.runs).unwrap_or(3);
    let command = cli
        .command
        .or(file.command)
        .unwrap_or_else(|| "./tiling_alpha".to_string());
    let report_dir = cli
        .report_dir
        .or(file.report_dir)
        .unwrap_or_else(|| PathBuf::from("./output"));
    let out = cli
        .out
        .or(file.out)
        .unwrap_or_else(|| PathBuf::from("papi_data.csv"));
    let region = cli
        .region
        .or(file.region)
        .unwrap_or_else(|| report::DEFAULT_REGION.to_string());
    let counter = cli
        .counter
        .or(file.counter)
        .unwrap_or_else(|| report::DEFAULT_COUNTER.to_string());

    let plan = RunPlan {
        runs,
        command,
        region,
        counter,
    };

    let (table, summaries) = aggregate::run_and_aggregate(&plan, &report_dir)?;
    csv::write_csv(&table, &out)?;

    for summary in &summaries {
        match summary.exit_code {
            Some(0) => {}
            Some(code) => eprintln!(
                "warning: {} benchmark exited with code {}; its report was still aggregated",
                summary.key, code
            ),
            None => eprintln!(
                "warning: {} benchmark was killed by a signal; its report was still aggregated",
                summary.key
            ),
        }
    }

    let output = if cli.json {
        display::format_json(&summaries)
    } else {
        display::format_summary(&summaries, &out, table.column_union().len())
    };
    print!("{}", output);

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
