//! Delimited tabular output.

use std::io::Write;

use csv::WriterBuilder;
use tracing::{debug, warn};

use hvf_model::{FlatRecord, RejectedRecord};

use crate::error::{OutputError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Outcome of writing a record set.
#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    pub header: Vec<String>,
    pub rows_written: usize,
    /// Records whose columns disagreed with the header.
    pub rejected: Vec<RejectedRecord>,
}

impl WriteSummary {
    /// True when every record was written.
    pub fn success(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Writes flat records as delimited text.
///
/// The first record fixes the header: its columns, in its order. Each later
/// record must have exactly those columns (in any order); one that does not is
/// skipped and returned as a write rejection while the rest are written.
#[derive(Debug, Clone, Default)]
pub struct TabularWriter {
    options: WriterOptions,
}

impl TabularWriter {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    pub fn write<W: Write>(&self, records: &[FlatRecord], writer: W) -> Result<WriteSummary> {
        let first = records.first().ok_or(OutputError::EmptyOutput)?;
        let header: Vec<String> = first.columns().map(str::to_string).collect();

        let mut csv = WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .from_writer(writer);
        csv.write_record(&header)?;

        let mut summary = WriteSummary::default();
        for (index, record) in records.iter().enumerate() {
            if !record.matches_header(&header) {
                warn!(
                    row = index,
                    columns = record.len(),
                    header_columns = header.len(),
                    "row columns differ from header, skipping"
                );
                summary.rejected.push(RejectedRecord::Write(record.clone()));
                continue;
            }
            csv.write_record(
                header
                    .iter()
                    .map(|column| record.get(column).unwrap_or_default()),
            )?;
            summary.rows_written += 1;
        }
        csv.flush()?;

        debug!(
            rows = summary.rows_written,
            rejected = summary.rejected.len(),
            "tabular output written"
        );
        summary.header = header;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        pairs.iter().copied().collect()
    }

    fn write(records: &[FlatRecord], options: WriterOptions) -> (String, WriteSummary) {
        let mut buffer = Vec::new();
        let summary = TabularWriter::new(options)
            .write(records, &mut buffer)
            .unwrap();
        (String::from_utf8(buffer).unwrap(), summary)
    }

    #[test]
    fn rows_follow_header_order() {
        let (text, summary) = write(
            &[
                record(&[("A", "1"), ("B", "x")]),
                record(&[("B", "y"), ("A", "2")]),
            ],
            WriterOptions::default(),
        );
        assert_eq!(text, "A,B\n1,x\n2,y\n");
        assert!(summary.success());
        assert_eq!(summary.rows_written, 2);
    }

    #[test]
    fn mismatched_rows_are_rejected_not_fatal() {
        let (text, summary) = write(
            &[
                record(&[("A", "1")]),
                record(&[("A", "2"), ("B", "extra")]),
                record(&[("C", "3")]),
                record(&[("A", "4")]),
            ],
            WriterOptions::default(),
        );
        assert_eq!(text, "A\n1\n4\n");
        assert!(!summary.success());
        assert_eq!(summary.rejected.len(), 2);
        assert_eq!(summary.rejected[0].to_line(), r#"{"A":"2","B":"extra"}"#);
    }

    #[test]
    fn values_are_quoted_when_needed() {
        let (text, _) = write(
            &[record(&[("NAME", "Doe, Jane"), ("NOTE", "said \"hi\"")])],
            WriterOptions::default(),
        );
        assert_eq!(text, "NAME,NOTE\n\"Doe, Jane\",\"said \"\"hi\"\"\"\n");
    }

    #[test]
    fn custom_delimiter() {
        let (text, _) = write(
            &[record(&[("A", "1"), ("B", "2")])],
            WriterOptions { delimiter: b'\t' },
        );
        assert_eq!(text, "A\tB\n1\t2\n");
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = TabularWriter::default().write(&[], Vec::new());
        assert!(matches!(result, Err(OutputError::EmptyOutput)));
    }
}
