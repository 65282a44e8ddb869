//! Renderer-independent description of a report: title block and tables.

use chrono::NaiveDate;

use crate::models::{format_volume, MeasurementRecord, Summary};

/// Caption text used in the report. Defaults are Turkish, matching the form.
#[derive(Debug, Clone)]
pub struct ReportLabels {
    pub title: String,
    pub subtitle: String,
    pub date_caption: String,
    pub detail_caption: String,
    pub summary_caption: String,
    pub species: String,
    pub count: String,
    pub width: String,
    pub thickness: String,
    pub length: String,
    pub volume: String,
    pub total_volume: String,
    pub total: String,
    pub grand_total: String,
}

impl ReportLabels {
    /// Default captions with `org_name` as the report title.
    pub fn for_org(org_name: impl Into<String>) -> Self {
        Self {
            title: org_name.into(),
            ..Self::default()
        }
    }
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            title: crate::config::DEFAULT_ORG_NAME.to_string(),
            subtitle: "Kereste Hesap Raporu".to_string(),
            date_caption: "Tarih".to_string(),
            detail_caption: "Detaylı Liste".to_string(),
            summary_caption: "Özet Rapor".to_string(),
            species: "Ağaç Cinsi".to_string(),
            count: "Adet".to_string(),
            width: "En (cm)".to_string(),
            thickness: "Kalınlık (cm)".to_string(),
            length: "Boy (cm)".to_string(),
            volume: "Hacim (m3)".to_string(),
            total_volume: "Toplam Hacim (m3)".to_string(),
            total: "TOPLAM".to_string(),
            grand_total: "GENEL TOPLAM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Body,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub kind: RowKind,
    pub cells: Vec<String>,
}

impl TableRow {
    fn new(kind: RowKind, cells: Vec<String>) -> Self {
        Self { kind, cells }
    }
}

#[derive(Debug, Clone)]
pub struct ReportTable {
    pub caption: String,
    pub column_widths_mm: Vec<f32>,
    /// Header first, then body rows, then the total row.
    pub rows: Vec<TableRow>,
}

impl ReportTable {
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|r| r.kind == RowKind::Header)
    }

    pub fn width_mm(&self) -> f32 {
        self.column_widths_mm.iter().sum()
    }
}

#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    pub detail: ReportTable,
    pub summary: ReportTable,
}

const DETAIL_COLUMNS_MM: [f32; 6] = [40.0, 20.0, 28.0, 32.0, 28.0, 32.0];
const SUMMARY_COLUMNS_MM: [f32; 2] = [70.0, 50.0];

/// Lay out the detail table (records in store order plus a total row) and the
/// per-species summary table (plus its own grand-total row).
pub fn layout(
    records: &[MeasurementRecord],
    summary: &Summary,
    labels: &ReportLabels,
    date: NaiveDate,
) -> ReportDocument {
    let mut detail_rows = Vec::with_capacity(records.len() + 2);
    detail_rows.push(TableRow::new(
        RowKind::Header,
        vec![
            labels.species.clone(),
            labels.count.clone(),
            labels.width.clone(),
            labels.thickness.clone(),
            labels.length.clone(),
            labels.volume.clone(),
        ],
    ));
    detail_rows.extend(records.iter().map(|r| {
        TableRow::new(
            RowKind::Body,
            vec![
                r.species.clone(),
                r.count.to_string(),
                r.width_cm.to_string(),
                r.thickness_cm.to_string(),
                r.length_cm.to_string(),
                format_volume(r.volume_m3),
            ],
        )
    }));
    detail_rows.push(TableRow::new(
        RowKind::Total,
        vec![
            labels.total.clone(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format_volume(summary.grand_total_m3),
        ],
    ));

    let mut summary_rows = Vec::with_capacity(summary.species.len() + 2);
    summary_rows.push(TableRow::new(
        RowKind::Header,
        vec![labels.species.clone(), labels.total_volume.clone()],
    ));
    summary_rows.extend(summary.species.iter().map(|s| {
        TableRow::new(
            RowKind::Body,
            vec![s.species.clone(), format_volume(s.volume_m3)],
        )
    }));
    summary_rows.push(TableRow::new(
        RowKind::Total,
        vec![
            labels.grand_total.clone(),
            format_volume(summary.aggregate_total()),
        ],
    ));

    ReportDocument {
        title: labels.title.clone(),
        subtitle: format!(
            "{} - {}: {}",
            labels.subtitle,
            labels.date_caption,
            date.format("%d.%m.%Y")
        ),
        detail: ReportTable {
            caption: labels.detail_caption.clone(),
            column_widths_mm: DETAIL_COLUMNS_MM.to_vec(),
            rows: detail_rows,
        },
        summary: ReportTable {
            caption: labels.summary_caption.clone(),
            column_widths_mm: SUMMARY_COLUMNS_MM.to_vec(),
            rows: summary_rows,
        },
    }
}
