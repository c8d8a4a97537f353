//! Export adapter: archive bytes + sequence text in, report bytes out

use dsf_core::{
    aggregate, validate, EntryFailure, EntrySource, ReportWarning, SequenceList, WarningCode,
    ZipEntrySource,
};
use dsf_sheets::{XlsxWriter, XLSX_MIME_TYPE};
use tracing::{info, warn};

use crate::error::Result;
use crate::layout::ReportLayout;
use crate::options::ReportOptions;
use crate::render::render;

/// What a successful run produced, besides the bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Table names in report column order
    pub table_names: Vec<String>,
    /// Common row count of all tables
    pub row_count: usize,
    /// Number of parsed sequence records
    pub sequence_count: usize,
    pub warnings: Vec<ReportWarning>,
    /// Entries excluded from the report
    pub failures: Vec<EntryFailure>,
}

/// A fully materialized report, ready for delivery
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
    pub summary: ReportSummary,
}

/// Build the report from ZIP archive bytes and the sequence text
pub fn generate_report(
    archive: &[u8],
    sequence_text: &str,
    options: &ReportOptions,
) -> Result<ReportArtifact> {
    let mut source = ZipEntrySource::from_bytes(archive)?;
    generate_report_from_source(&mut source, sequence_text, options)
}

/// Build the report from any entry source.
///
/// Either every step succeeds and the complete workbook is returned, or an
/// error is returned and no bytes are produced.
pub fn generate_report_from_source<S: EntrySource + ?Sized>(
    source: &mut S,
    sequence_text: &str,
    options: &ReportOptions,
) -> Result<ReportArtifact> {
    let sequences = SequenceList::parse_with_marker(sequence_text, options.marker);
    let outcome = aggregate(source, &options.batch)?;
    let row_count = validate(&outcome.tables)?;

    let mut warnings = outcome.warnings;
    if sequences.has_odd_trailing_line() {
        warn!(records = sequences.len(), "sequence text ends with an unpaired line");
        warnings.push(ReportWarning::new(
            WarningCode::OddSequenceLines,
            format!(
                "sequence text has an odd number of lines; record {} has an empty sequence",
                sequences.len()
            ),
        ));
    }
    if sequences.len() != row_count {
        warn!(
            sequences = sequences.len(),
            rows = row_count,
            "sequence count differs from table row count"
        );
        warnings.push(ReportWarning::new(
            WarningCode::SequenceCountMismatch,
            format!(
                "{} sequence record(s) for {} data row(s)",
                sequences.len(),
                row_count
            ),
        ));
    }

    let layout = ReportLayout::build(&outcome.tables, &sequences);
    let workbook = render(&layout, options.max_column_width)?;
    let bytes = XlsxWriter::write_to_vec(&workbook)?;

    let summary = ReportSummary {
        table_names: outcome.tables.names().map(str::to_string).collect(),
        row_count,
        sequence_count: sequences.len(),
        warnings,
        failures: outcome.failures,
    };
    info!(
        tables = summary.table_names.len(),
        rows = row_count,
        bytes = bytes.len(),
        "report generated"
    );

    Ok(ReportArtifact {
        bytes,
        file_name: options.file_name.clone(),
        mime_type: XLSX_MIME_TYPE,
        summary,
    })
}
