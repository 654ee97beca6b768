use std::path::Path;

use anyhow::Result;

use crate::errors::PapirunError;
use crate::types::AggregateTable;

/// Render the aggregate table as CSV.
///
/// Layout matches pandas `DataFrame.to_csv` with a row index: the header
/// starts with an empty index cell, each data row starts with its `iter<N>`
/// label. Columns are the union across rows in first-seen order; cells a row
/// lacks are left empty.
pub fn format_csv(table: &AggregateTable) -> String {
    let columns = table.column_union();

    let mut out = String::new();

    let mut header: Vec<String> = Vec::with_capacity(columns.len() + 1);
    header.push(String::new());
    header.extend(columns.iter().map(|c| escape_csv(c)));
    out.push_str(&header.join(","));
    out.push('\n');

    for (key, record) in table.rows() {
        let mut row: Vec<String> = Vec::with_capacity(columns.len() + 1);
        row.push(escape_csv(key));
        for col in &columns {
            row.push(record.get(col).map(escape_csv).unwrap_or_default());
        }
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

pub fn write_csv(table: &AggregateTable, path: &Path) -> Result<()> {
    std::fs::write(path, format_csv(table)).map_err(|source| PapirunError::CsvWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
