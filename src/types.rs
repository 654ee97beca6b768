use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cheap stat-only candidate picked out of the report directory before parsing
#[derive(Debug, Clone)]
pub struct ReportCandidate {
    pub path: PathBuf,
    pub mtime: SystemTime,
}

/// A PAPI high-level report for one benchmark run.
///
/// Top-level metadata keys (`cpu in mhz`, hostname, ...) are ignored; only the
/// per-thread region data is consumed.
#[derive(Debug, Deserialize)]
pub struct Report {
    pub threads: Vec<ThreadEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadEntry {
    pub id: Option<String>,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

/// One region entry as PAPI emits it: a mapping from the region name chosen at
/// instrumentation time (e.g. `cpu_multicore`) to its counter map.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct RegionEntry(pub Map<String, Value>);

impl RegionEntry {
    /// Look up the counter map recorded under the given region name.
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(|v| v.as_object())
    }
}

/// Single-row flattening of one region: dotted column names in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedRecord {
    columns: Vec<(String, String)>,
}

impl FlattenedRecord {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        FlattenedRecord { columns }
    }

    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, val)| val.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Row-labelled table of flattened records, one row per run, in insertion
/// order. Built locally by the aggregator and returned, never global state.
#[derive(Debug, Default)]
pub struct AggregateTable {
    rows: Vec<(String, FlattenedRecord)>,
}

impl AggregateTable {
    pub fn new() -> Self {
        AggregateTable::default()
    }

    pub fn insert(&mut self, key: String, record: FlattenedRecord) {
        self.rows.push((key, record));
    }

    pub fn rows(&self) -> &[(String, FlattenedRecord)] {
        &self.rows
    }

    /// Union of all rows' column names, in first-seen order.
    pub fn column_union(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for (_, record) in &self.rows {
            for (col, _) in record.columns() {
                if !columns.iter().any(|c| c == col) {
                    columns.push(col.clone());
                }
            }
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of one blocking benchmark invocation.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Exit code, or `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Per-run record shown in the summary output (human table or `--json`).
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub key: String,
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub counter: String,
    pub counter_total: u64,
    pub report_path: PathBuf,
}
