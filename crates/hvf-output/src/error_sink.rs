//! Collection and persistence of rejected records.

use std::io::Write;

use tracing::warn;

use hvf_model::RejectedRecord;

use crate::error::Result;
use crate::sink::Sink;

/// Accumulates rejected records and writes them one per line.
///
/// Persistence is best effort: an item that fails to write is logged and
/// skipped.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    items: Vec<RejectedRecord>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item: RejectedRecord) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[RejectedRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn structural_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_structural()).count()
    }

    pub fn write_count(&self) -> usize {
        self.len() - self.structural_count()
    }

    /// Write every item to `writer`, returning how many were written.
    pub fn flush<W: Write>(&self, mut writer: W) -> usize {
        let mut written = 0;
        for (index, item) in self.items.iter().enumerate() {
            match writeln!(writer, "{}", item.to_line()) {
                Ok(()) => written += 1,
                Err(error) => warn!(item = index, %error, "failed to write rejected record"),
            }
        }
        if let Err(error) = writer.flush() {
            warn!(%error, "failed to flush rejected records");
        }
        written
    }

    /// Open `sink` and write every item to it.
    ///
    /// Fails only when the destination cannot be opened.
    pub fn flush_to(&self, sink: &Sink) -> Result<usize> {
        let writer = sink.open()?;
        Ok(self.flush(writer))
    }
}

impl Extend<RejectedRecord> for ErrorSink {
    fn extend<I: IntoIterator<Item = RejectedRecord>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use hvf_model::{FlatRecord, InvalidReason};

    fn structural(id: &str) -> RejectedRecord {
        RejectedRecord::Structural {
            identity: [("PATIENT_ID", id)].into_iter().collect(),
            reason: InvalidReason::MissingTestNode,
        }
    }

    /// Fails every other write call.
    struct Flaky {
        calls: usize,
        out: Vec<u8>,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls.is_multiple_of(2) {
                return Err(io::Error::other("disk hiccup"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_item() {
        let mut sink = ErrorSink::new();
        sink.record(structural("1"));
        sink.record(RejectedRecord::Write(
            [("A", "x")].into_iter().collect::<FlatRecord>(),
        ));
        let mut buffer = Vec::new();
        assert_eq!(sink.flush(&mut buffer), 2);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"PATIENT_ID\":\"1\"}\n{\"A\":\"x\"}\n"
        );
        assert_eq!(sink.structural_count(), 1);
        assert_eq!(sink.write_count(), 1);
    }

    #[test]
    fn write_failures_are_skipped() {
        let mut sink = ErrorSink::new();
        sink.extend([structural("1"), structural("2"), structural("3")]);
        let mut flaky = Flaky {
            calls: 0,
            out: Vec::new(),
        };
        let written = sink.flush(&mut flaky);
        assert!(written < 3);
        assert!(!flaky.out.is_empty());
        // Failed writes are not dropped from the sink.
        assert_eq!(sink.items().len(), 3);
        assert_eq!(sink.items()[2], structural("3"));
    }
}
