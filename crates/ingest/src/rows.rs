//! Row files: a JSON array of records, or one JSON record per line.

use std::fs;
use std::path::Path;

use tracing::info;

use adpulse_core::{MetricRecord, PulseError, Result};

/// Reads [`MetricRecord`]s from JSON or JSON-lines text.
pub struct RowImporter;

impl RowImporter {
    /// Read and parse a row file.
    pub fn import(path: &Path) -> Result<Vec<MetricRecord>> {
        let text = fs::read_to_string(path)?;
        let rows = Self::parse(&text)?;
        info!(path = %path.display(), rows = rows.len(), "imported metric rows");
        Ok(rows)
    }

    /// Parse rows; the format is picked by whether the text opens with `[`.
    pub fn parse(text: &str) -> Result<Vec<MetricRecord>> {
        let trimmed = text.trim_start();
        if trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        let mut rows = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: MetricRecord = serde_json::from_str(line).map_err(|e| {
                PulseError::Serialize(format!("line {}: {}", idx + 1, e))
            })?;
            rows.push(record);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LINE_A: &str = concat!(
        r#"{"timestamp":"2025-03-01T11:45:00Z","#,
        r#""spend":500.0,"impressions":5000,"clicks":150,"conversions":2}"#
    );
    const LINE_B: &str = concat!(
        r#"{"timestamp":"2025-03-01T12:00:00Z","#,
        r#""spend":520.5,"impressions":4800,"clicks":140,"conversions":0}"#
    );

    #[test]
    fn parses_json_array() {
        let text = format!("  [{}, {}]", LINE_A, LINE_B);
        let rows = RowImporter::parse(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].spend, 520.5);
        assert_eq!(rows[0].conversions, 2);
    }

    #[test]
    fn parses_json_lines_with_blank_lines() {
        let text = format!("{}\n\n{}\n", LINE_A, LINE_B);
        let rows = RowImporter::parse(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].conversions, 0);
    }

    #[test]
    fn bad_line_reports_line_number() {
        let text = format!("{}\n{{\"timestamp\": 1}}\n", LINE_A);
        match RowImporter::parse(&text) {
            Err(PulseError::Serialize(message)) => assert!(message.starts_with("line 2:")),
            other => panic!("expected serialize error, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(RowImporter::parse("").unwrap().is_empty());
    }

    #[test]
    fn imports_from_file() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, "{}", LINE_A).unwrap();
        writeln!(file, "{}", LINE_B).unwrap();
        let rows = RowImporter::import(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RowImporter::import(Path::new("/nonexistent/rows.json")).unwrap_err();
        assert!(matches!(err, PulseError::Io(_)));
    }
}
