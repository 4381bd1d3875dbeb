//! `bcs parse` command implementation
//!
//! Scans a saved bulk file and prints what it contains.

use bcs_client::bulk::{parse_bulk_file, BulkResults, ScanOptions};
use colored::Colorize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CliError, Result};

/// Parse `filename` and print the report to stdout
pub async fn run(filename: PathBuf, max_line_bytes: usize, json: Option<PathBuf>) -> Result<()> {
    let options = ScanOptions::default().with_max_line_bytes(max_line_bytes);

    let results = parse_bulk_file(&filename, options)
        .await
        .map_err(|err| match err {
            bcs_client::BcsError::Io(io) if io.kind() == io::ErrorKind::NotFound => {
                CliError::FileNotFound(filename.display().to_string())
            },
            other => other.into(),
        })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &results)?;

    if let Some(path) = json {
        save_json(&path, &results)?;
        writeln!(out, "Results written to {}", path.display())?;
    }

    Ok(())
}

/// Write the human readable summary.
///
/// Decode errors come first, then the totals. Kinds are listed by name so
/// the output is stable between runs.
pub fn write_report<W: Write>(out: &mut W, results: &BulkResults) -> io::Result<()> {
    for err in &results.decode_errors {
        writeln!(out, "{}", format!("error in results: {err}").red())?;
    }
    if !results.decode_errors.is_empty() {
        writeln!(
            out,
            "{}",
            format!("{} errors above", results.decode_errors.len()).yellow()
        )?;
    }

    writeln!(out, "{}", format!("{} lines processed:", results.line_count).bold())?;

    let mut counts: Vec<_> = results
        .count_of_types
        .iter()
        .map(|(kind, count)| (kind.as_str(), *count))
        .collect();
    counts.sort_unstable();
    for (kind, count) in counts {
        writeln!(out, "  * {kind}: {count}")?;
    }

    for (kind, count) in &results.unrecognised_types {
        writeln!(
            out,
            "{}",
            format!("unrecognised type: {kind}: {count}").yellow()
        )?;
    }

    Ok(())
}

/// Save the full results as pretty-printed JSON
fn save_json(path: &Path, results: &BulkResults) -> Result<()> {
    debug!(path = %path.display(), "Writing results as JSON");
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use bcs_client::bulk::scan_bulk;

    async fn report(input: &str) -> String {
        colored::control::set_override(false);
        let results = scan_bulk(input.as_bytes(), ScanOptions::default())
            .await
            .unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &results).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_report_lists_kinds_sorted_by_name() {
        let input = concat!(
            "{\"type\":\"track_summary\"}\n",
            "{\"type\":\"device\"}\n",
            "{\"type\":\"psirt_bulletin\"}\n",
            "{\"type\":\"device\"}\n",
        );
        let output = report(input).await;
        assert_eq!(
            output,
            "4 lines processed:\n  * device: 2\n  * psirt_bulletin: 1\n  * track_summary: 1\n"
        );
    }

    #[tokio::test]
    async fn test_report_shows_errors_and_unrecognised() {
        let input = concat!(
            "{\"type\":\"track_summary\",\"trackRecommendationDate\":\"yesterday\"}\n",
            "{\"type\":\"contract\"}\n",
        );
        let output = report(input).await;
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[0].starts_with("error in results: track_summary: line 1:"));
        assert_eq!(lines[1], "1 errors above");
        assert_eq!(lines[2], "2 lines processed:");
        assert_eq!(lines[3], "  * track_summary: 1");
        assert_eq!(lines[4], "unrecognised type: contract: 1");
    }

    #[tokio::test]
    async fn test_missing_file_is_file_not_found() {
        let err = run(
            PathBuf::from("/nonexistent/bcs_bulk.jsonl"),
            ScanOptions::default().max_line_bytes,
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bulk.jsonl");
        let output = dir.path().join("results.json");
        std::fs::write(
            &input,
            "{\"type\":\"track_summary\",\"trackId\":1,\"trackLastModifiedDate\":\"2021-03-04\"}\n",
        )
        .unwrap();

        run(input, ScanOptions::default().max_line_bytes, Some(output.clone()))
            .await
            .unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(saved["line_count"], 1);
        assert_eq!(
            saved["track_summaries"][0]["trackLastModifiedDate"],
            "2021-03-04"
        );
    }
}
