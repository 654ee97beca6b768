use std::path::Path;

use owo_colors::{OwoColorize, Stream, Style};

use crate::types::RunSummary;

fn style_key() -> Style {
    Style::new().cyan().bold()
}

fn style_failed() -> Style {
    Style::new().yellow().bold()
}

fn status_label(summary: &RunSummary) -> String {
    match summary.exit_code {
        Some(0) => "ok".to_string(),
        Some(code) => format!("exit {code}"),
        None => "signal".to_string(),
    }
}

/// Human-readable run summary: one line per run with exit status, duration
/// and the cross-thread counter total, plus a footer naming the CSV output.
pub fn format_summary(summaries: &[RunSummary], out_path: &Path, column_count: usize) -> String {
    let mut out = String::new();

    let header = "Benchmark runs:";
    out.push_str(
        &header
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push_str("\n\n");

    let key_width = summaries.iter().map(|s| s.key.len()).max().unwrap_or(0);
    let status_width = summaries
        .iter()
        .map(|s| status_label(s).len())
        .max()
        .unwrap_or(0);

    for summary in summaries {
        let key = format!("{:<key_width$}", summary.key);
        let status = format!("{:<status_width$}", status_label(summary));

        out.push_str("  ");
        out.push_str(
            &key.if_supports_color(Stream::Stdout, |s| s.style(style_key()))
                .to_string(),
        );
        out.push_str("  ");
        if summary.exit_code == Some(0) {
            out.push_str(&status);
        } else {
            out.push_str(
                &status
                    .if_supports_color(Stream::Stdout, |s| s.style(style_failed()))
                    .to_string(),
            );
        }
        out.push_str(&format!(
            "  {:>8.2}s  {}={}\n",
            summary.duration_secs, summary.counter, summary.counter_total
        ));
    }

    out.push('\n');
    let footer = format!(
        "Wrote {} ({} rows, {} columns)",
        out_path.display(),
        summaries.len(),
        column_count
    );
    out.push_str(
        &footer
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push('\n');

    out
}

/// Machine-readable summary for `--json`.
pub fn format_json(summaries: &[RunSummary]) -> String {
    let mut out = serde_json::to_string_pretty(summaries).unwrap_or_else(|_| "[]".to_string());
    out.push('\n');
    out
}
