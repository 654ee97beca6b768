use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::errors::PapirunError;
use crate::types::{FlattenedRecord, Report};

/// Region name used by the instrumented benchmarks
/// (`PAPI_hl_region_begin("cpu_multicore")`).
pub const DEFAULT_REGION: &str = "cpu_multicore";

/// Single-precision FP operations counter.
pub const DEFAULT_COUNTER: &str = "PAPI_SP_OPS";

/// Parse a PAPI high-level report file.
pub fn read_report(path: &Path) -> Result<Report> {
    let file = std::fs::File::open(path).map_err(|source| PapirunError::ReportReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = std::io::BufReader::new(file);

    let report: Report =
        serde_json::from_reader(reader).map_err(|err| PapirunError::ReportParseError {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;

    Ok(report)
}

/// Sum `counter` across every thread's first region's `region` section.
///
/// PAPI records counters per thread; the totals across all threads are what
/// matter for a whole-run figure like PAPI_SP_OPS.
pub fn sum_counter(report: &Report, region: &str, counter: &str) -> Result<u64> {
    let mut total: u64 = 0;

    for (i, thread) in report.threads.iter().enumerate() {
        let first_region = thread.regions.first().ok_or_else(|| PapirunError::MissingField {
            field: format!("threads[{i}].regions[0]"),
        })?;

        let section = first_region
            .section(region)
            .ok_or_else(|| PapirunError::MissingField {
                field: format!("threads[{i}].regions[0].{region}"),
            })?;

        let value = section.get(counter).ok_or_else(|| PapirunError::MissingField {
            field: format!("threads[{i}].regions[0].{region}.{counter}"),
        })?;

        total += counter_value(counter, value)?;
    }

    Ok(total)
}

/// Flatten thread 0's first region into a single record with dotted column
/// names (`cpu_multicore.PAPI_SP_OPS`), preserving report key order. Later
/// regions never contribute columns.
pub fn flatten_first_region(report: &Report) -> Result<FlattenedRecord> {
    let thread = report.threads.first().ok_or_else(|| PapirunError::MissingField {
        field: "threads[0]".to_string(),
    })?;

    let region = thread.regions.first().ok_or_else(|| PapirunError::MissingField {
        field: "threads[0].regions[0]".to_string(),
    })?;

    let mut columns = Vec::new();
    flatten_object(&region.0, None, &mut columns);
    Ok(FlattenedRecord::new(columns))
}

fn flatten_object(map: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let column = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) => flatten_object(inner, Some(&column), out),
            Value::String(s) => out.push((column, s.clone())),
            Value::Null => out.push((column, String::new())),
            other => out.push((column, other.to_string())),
        }
    }
}

/// Coerce a counter value to u64. PAPI emits counters as decimal strings but
/// plain JSON numbers are accepted too.
fn counter_value(counter: &str, value: &Value) -> Result<u64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        PapirunError::CounterNotNumeric {
            counter: counter.to_string(),
            value: scalar_display(value),
        }
        .into()
    })
}

fn scalar_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
