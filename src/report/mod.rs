//! PDF export of a session's records.
//!
//! Building a report is two steps: [`layout`] turns records and their
//! [`Summary`] into a [`ReportDocument`] (title block, detail table, summary
//! table), then [`pdf::render`] draws that onto A4 pages.

pub mod fonts;
mod layout;
mod pdf;

use chrono::NaiveDate;
use thiserror::Error;

pub use fonts::{FallbackReason, FontChoice, FontError, FontProvider};
pub use layout::{layout, ReportDocument, ReportLabels, ReportTable, RowKind, TableRow};

use crate::config::AppConfig;
use crate::models::{MeasurementRecord, Summary};

pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Build the report PDF for `records`.
///
/// `font` is the embeddable font; when it is missing or unusable the builtin
/// font is used instead, which may misrender non-Latin-1 letters.
pub fn build_report(
    records: &[MeasurementRecord],
    summary: &Summary,
    labels: &ReportLabels,
    date: NaiveDate,
    font: Option<&[u8]>,
) -> Result<Vec<u8>, ReportError> {
    let document = layout(records, summary, labels, date);
    pdf::render(&document, font)
}

/// `<prefix>_<YYYY-MM-DD>.pdf`
pub fn report_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.pdf", prefix, date.format("%Y-%m-%d"))
}

/// A rendered report ready for download.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Report settings plus the shared font provider.
#[derive(Clone)]
pub struct ReportBuilder {
    labels: ReportLabels,
    file_prefix: String,
    fonts: FontProvider,
}

impl ReportBuilder {
    pub fn new(labels: ReportLabels, file_prefix: impl Into<String>, fonts: FontProvider) -> Self {
        Self {
            labels,
            file_prefix: file_prefix.into(),
            fonts,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            ReportLabels::for_org(config.org_name.clone()),
            config.file_prefix.clone(),
            FontProvider::new(config.font.clone()),
        )
    }

    pub fn labels(&self) -> &ReportLabels {
        &self.labels
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        report_file_name(&self.file_prefix, date)
    }

    /// Render `records` as of `date`. Acquires the font on first use.
    pub async fn export(
        &self,
        records: &[MeasurementRecord],
        date: NaiveDate,
    ) -> Result<ExportedReport, ReportError> {
        let summary = Summary::from_records(records);
        let font = self.fonts.font_bytes().await;
        let bytes = build_report(records, &summary, &self.labels, date, font.as_deref())?;

        tracing::info!(
            records = records.len(),
            species = summary.species.len(),
            size = bytes.len(),
            "Report exported"
        );

        Ok(ExportedReport {
            file_name: self.file_name(date),
            bytes,
        })
    }
}
