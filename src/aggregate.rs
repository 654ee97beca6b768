use std::path::Path;

use anyhow::Result;

use crate::errors::PapirunError;
use crate::types::{AggregateTable, RunSummary};
use crate::{discover, report, runner};

/// Everything one aggregation session needs, resolved from CLI + config.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub runs: usize,
    pub command: String,
    pub region: String,
    pub counter: String,
}

/// Drive the benchmark `runs` times and collect one flattened record per run.
///
/// The report directory is created up front if absent. Each iteration blocks
/// on the benchmark, resolves the freshest report file, and extracts both the
/// cross-thread counter total (kept in the run summary) and the flattened
/// first-region record (keyed `iter<i>` in the table). Any report failure
/// aborts immediately so no partial record enters the table; a non-zero
/// benchmark exit is recorded in the summary instead of aborting, since the
/// report it left behind may still be valid.
pub fn run_and_aggregate(
    plan: &RunPlan,
    report_dir: &Path,
) -> Result<(AggregateTable, Vec<RunSummary>)> {
    std::fs::create_dir_all(report_dir).map_err(|source| PapirunError::ReportDirCreate {
        path: report_dir.to_path_buf(),
        source,
    })?;

    let mut table = AggregateTable::new();
    let mut summaries = Vec::with_capacity(plan.runs);

    for i in 0..plan.runs {
        let outcome = runner::run_benchmark(&plan.command)?;

        let candidate = discover::locate_report(report_dir)?;
        let parsed = report::read_report(&candidate.path)?;

        let counter_total = report::sum_counter(&parsed, &plan.region, &plan.counter)?;
        let record = report::flatten_first_region(&parsed)?;

        let key = format!("iter{i}");
        summaries.push(RunSummary {
            key: key.clone(),
            exit_code: outcome.exit_code,
            started_at: outcome.started_at,
            duration_secs: outcome.duration.as_secs_f64(),
            counter: plan.counter.clone(),
            counter_total,
            report_path: candidate.path,
        });
        table.insert(key, record);
    }

    Ok((table, summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const REPORT: &str = r#"{
        "threads": [
            {"id": "0", "regions": [{"cpu_multicore": {"region_count": "1", "PAPI_SP_OPS": "10"}}]},
            {"id": "1", "regions": [{"cpu_multicore": {"region_count": "1", "PAPI_SP_OPS": "20"}}]}
        ]
    }"#;

    fn plan(command: String, runs: usize) -> RunPlan {
        RunPlan {
            runs,
            command,
            region: "cpu_multicore".to_string(),
            counter: "PAPI_SP_OPS".to_string(),
        }
    }

    /// Stub benchmark: copies a canned report into the report dir via the shell.
    fn stub_command(tmp: &std::path::Path, report_dir: &std::path::Path) -> String {
        let fixture = tmp.join("canned.json");
        fs::write(&fixture, REPORT).unwrap();
        format!(
            "cp {} {}",
            fixture.display(),
            report_dir.join("rank_000000").display()
        )
    }

    #[test]
    fn three_runs_yield_three_identical_rows() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let report_dir = tmp.path().join("output");
        let cmd = stub_command(tmp.path(), &report_dir);

        let (table, summaries) = run_and_aggregate(&plan(cmd, 3), &report_dir).unwrap();

        let keys: Vec<&str> = table.rows().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["iter0", "iter1", "iter2"]);

        // Identical reports mean pairwise-equal rows.
        assert_eq!(table.rows()[0].1, table.rows()[1].1);
        assert_eq!(table.rows()[1].1, table.rows()[2].1);

        assert_eq!(summaries.len(), 3);
        for summary in &summaries {
            assert_eq!(summary.exit_code, Some(0));
            assert_eq!(summary.counter_total, 30);
        }
    }

    #[test]
    fn report_dir_created_before_first_run() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let report_dir = tmp.path().join("not").join("yet").join("there");
        let cmd = stub_command(tmp.path(), &report_dir);

        assert!(!report_dir.exists());
        let (table, _) = run_and_aggregate(&plan(cmd, 1), &report_dir).unwrap();
        assert!(report_dir.is_dir());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn benchmark_that_writes_nothing_fails_with_no_report() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let report_dir = tmp.path().join("output");

        let err = run_and_aggregate(&plan("true".to_string(), 1), &report_dir).unwrap_err();
        assert!(err.to_string().contains("No report file found"));
    }

    #[test]
    fn nonzero_exit_is_recorded_not_fatal() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let report_dir = tmp.path().join("output");
        let cmd = format!("{} && exit 3", stub_command(tmp.path(), &report_dir));

        let (table, summaries) = run_and_aggregate(&plan(cmd, 2), &report_dir).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(summaries[0].exit_code, Some(3));
        assert_eq!(summaries[1].exit_code, Some(3));
    }

    #[test]
    fn malformed_report_aborts_the_session() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let report_dir = tmp.path().join("output");
        fs::create_dir_all(&report_dir).unwrap();
        let fixture = tmp.path().join("bad.json");
        fs::write(&fixture, "{ broken").unwrap();
        let cmd = format!(
            "cp {} {}",
            fixture.display(),
            report_dir.join("rank_000000").display()
        );

        let err = run_and_aggregate(&plan(cmd, 3), &report_dir).unwrap_err();
        assert!(err.to_string().contains("Failed to parse report file"));
    }
}
