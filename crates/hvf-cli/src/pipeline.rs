//! Conversion pipeline with explicit stages.
//!
//! 1. **Ingest**: read and parse the XML export
//! 2. **Extract**: one flat record per patient, or a structural rejection
//! 3. **Output**: write the table, then the rejected-record sidecar

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use hvf_core::process_export;
use hvf_ingest::read_export;
use hvf_model::{ExportLayout, RejectedRecord};
use hvf_output::{ErrorSink, OutputError, Sink, TabularWriter, WriterOptions};

use crate::logging::redact_value;

/// Everything one conversion run needs.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: Sink,
    pub errors: Sink,
    pub layout: ExportLayout,
    pub writer: WriterOptions,
}

/// Counts and destinations of a finished run.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: Sink,
    /// Set when at least one rejected record was written.
    pub errors: Option<Sink>,
    pub patient_count: usize,
    pub accepted: usize,
    pub rows_written: usize,
    pub structural_rejections: usize,
    pub write_rejections: usize,
}

impl ConvertResult {
    pub fn rejected(&self) -> usize {
        self.structural_rejections + self.write_rejections
    }
}

/// Run a full conversion.
///
/// Rejected exams and rows do not fail the run. It fails when the export
/// cannot be read, has no patient list, or yields no valid record at all; in
/// the last case the sidecar is still written.
pub fn run_convert(request: &ConvertRequest) -> Result<ConvertResult> {
    let ingest_start = Instant::now();
    let document = info_span!("ingest", input = %request.input.display())
        .in_scope(|| read_export(&request.input))
        .with_context(|| format!("read export {}", request.input.display()))?;
    info!(
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let batch = process_export(&document, &request.layout).context("extract exams")?;

    let mut errors = ErrorSink::new();
    for rejected in batch.rejected {
        log_rejection(&rejected, &request.layout);
        errors.record(rejected);
    }

    info!(
        valid = batch.accepted.len(),
        "found valid test results to output"
    );
    let output_span = info_span!("output", output = %request.output);
    let _output_guard = output_span.enter();

    let summary = if batch.accepted.is_empty() {
        None
    } else {
        info!(output = %request.output, "writing results");
        let writer = request.output.open().context("open tabular output")?;
        let summary = TabularWriter::new(request.writer)
            .write(&batch.accepted, writer)
            .context("write tabular output")?;
        for rejected in &summary.rejected {
            log_rejection(rejected, &request.layout);
        }
        errors.extend(summary.rejected.iter().cloned());
        Some(summary)
    };

    let errors_sink = if errors.is_empty() {
        None
    } else {
        info!(
            bad_records = errors.len(),
            errors = %request.errors,
            "writing bad records"
        );
        let written = errors
            .flush_to(&request.errors)
            .context("open error sidecar")?;
        info!(written, "bad records written");
        Some(request.errors.clone())
    };

    let Some(summary) = summary else {
        let patients = batch.patient_count;
        let context = format!("{patients} patients, none with a complete threshold test");
        return Err(OutputError::EmptyOutput).context(context);
    };

    Ok(ConvertResult {
        input: request.input.clone(),
        output: request.output.clone(),
        errors: errors_sink,
        patient_count: batch.patient_count,
        accepted: batch.accepted.len(),
        rows_written: summary.rows_written,
        structural_rejections: errors.structural_count(),
        write_rejections: errors.write_count(),
    })
}

/// The configured identity column of a rejected record, or `""` when absent.
fn patient_id<'a>(rejected: &'a RejectedRecord, layout: &ExportLayout) -> &'a str {
    rejected.record().get(&layout.patient_id).unwrap_or_default()
}

fn log_rejection(rejected: &RejectedRecord, layout: &ExportLayout) {
    let record = rejected.record();
    let id = patient_id(rejected, layout);
    match rejected {
        RejectedRecord::Structural { reason, .. } => trace!(
            patient_id = redact_value(id),
            reason = %reason,
            "structural rejection"
        ),
        RejectedRecord::Write(_) => trace!(
            patient_id = redact_value(id),
            columns = record.len(),
            "write rejection"
        ),
    }
}
