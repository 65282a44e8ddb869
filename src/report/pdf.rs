//! A4 PDF rendering of a [`ReportDocument`].

use printpdf::path::PaintMode;
use printpdf::{
    Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rect, Rgb,
};

use super::fonts::{self, FontChoice};
use super::layout::{ReportDocument, ReportTable, RowKind, TableRow};
use super::ReportError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 1.5;

const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 11.0;
const CAPTION_SIZE: f32 = 12.0;
const CELL_SIZE: f32 = 10.0;

const PT_TO_MM: f32 = 0.352_778;

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);
const TITLE_BLUE: (f32, f32, f32) = (0.0, 0.0, 0.545);
const HEADER_FILL: (f32, f32, f32) = (0.30, 0.30, 0.30);
const TOTAL_FILL: (f32, f32, f32) = (0.85, 0.85, 0.85);

/// Render `document` into PDF bytes, embedding `font_bytes` when usable.
pub fn render(document: &ReportDocument, font_bytes: Option<&[u8]>) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let choice = fonts::register(&doc, font_bytes)?;
    if let FontChoice::Fallback { reason, .. } = &choice {
        tracing::debug!("Rendering report with builtin font: {}", reason);
    }

    {
        let layer = doc.get_page(page).get_layer(layer);
        let mut canvas = Canvas::new(&doc, layer, choice.font());

        canvas.centered_text(&document.title, TITLE_SIZE, TITLE_BLUE);
        canvas.advance(4.0);
        canvas.centered_text(&document.subtitle, SUBTITLE_SIZE, BLACK);
        canvas.advance(8.0);

        canvas.table(&document.detail);
        canvas.advance(10.0);
        canvas.table(&document.summary);

        tracing::debug!(pages = canvas.pages, "Report laid out");
    }

    doc.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
}

/// Drawing state: current layer and the vertical cursor (mm from page bottom).
struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: &'a IndirectFontRef,
    y: f32,
    pages: usize,
}

impl<'a> Canvas<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference, font: &'a IndirectFontRef) -> Self {
        let canvas = Self {
            doc,
            layer,
            font,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        };
        canvas.apply_line_style();
        canvas
    }

    fn apply_line_style(&self) {
        self.layer.set_outline_color(rgb(BLACK));
        self.layer.set_outline_thickness(0.5);
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.pages += 1;
        self.apply_line_style();
    }

    /// Start a new page unless `height` mm still fit above the bottom margin.
    fn ensure_room(&mut self, height: f32) -> bool {
        if self.y - height < MARGIN {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn centered_text(&mut self, text: &str, size: f32, color: (f32, f32, f32)) {
        let height = size * PT_TO_MM;
        self.ensure_room(height);
        self.y -= height;
        let x = (PAGE_WIDTH - text_width_mm(text, size)) / 2.0;
        self.layer.set_fill_color(rgb(color));
        self.layer.use_text(text, size, Mm(x.max(MARGIN)), Mm(self.y), self.font);
    }

    fn table(&mut self, table: &ReportTable) {
        // Keep the caption together with the header and first row.
        self.ensure_room(CAPTION_SIZE * PT_TO_MM + 2.0 + ROW_HEIGHT * 2.0);
        self.centered_text(&table.caption, CAPTION_SIZE, BLACK);
        self.advance(2.0);

        let left = (PAGE_WIDTH - table.width_mm()) / 2.0;
        for row in &table.rows {
            if self.ensure_room(ROW_HEIGHT) && row.kind != RowKind::Header {
                if let Some(header) = table.header() {
                    self.row(left, &table.column_widths_mm, header);
                }
            }
            self.row(left, &table.column_widths_mm, row);
        }
    }

    fn row(&mut self, left: f32, widths: &[f32], row: &TableRow) {
        let top = self.y;
        let bottom = top - ROW_HEIGHT;

        let (fill, text_color, mode) = match row.kind {
            RowKind::Header => (Some(HEADER_FILL), WHITE, PaintMode::FillStroke),
            RowKind::Body => (None, BLACK, PaintMode::Stroke),
            RowKind::Total => (Some(TOTAL_FILL), BLACK, PaintMode::FillStroke),
        };

        let mut x = left;
        for (width, text) in widths.iter().zip(&row.cells) {
            if let Some(fill) = fill {
                self.layer.set_fill_color(rgb(fill));
            }
            self.layer.add_rect(
                Rect::new(Mm(x), Mm(bottom), Mm(x + width), Mm(top)).with_mode(mode),
            );

            if !text.is_empty() {
                let size = fitted_size(text, width - 2.0 * CELL_PADDING);
                let text_x = x + (width - text_width_mm(text, size)) / 2.0;
                let baseline = bottom + (ROW_HEIGHT - cap_height_mm(size)) / 2.0;
                self.layer.set_fill_color(rgb(text_color));
                self.layer.use_text(text.as_str(), size, Mm(text_x), Mm(baseline), self.font);
            }
            x += width;
        }

        self.y = bottom;
    }
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Largest size up to [`CELL_SIZE`] at which `text` fits in `available` mm.
fn fitted_size(text: &str, available: f32) -> f32 {
    let natural = text_width_mm(text, CELL_SIZE);
    if natural <= available || natural == 0.0 {
        CELL_SIZE
    } else {
        (CELL_SIZE * available / natural).max(5.0)
    }
}

fn cap_height_mm(size: f32) -> f32 {
    size * PT_TO_MM * 0.72
}

/// Approximate advance width of `text` in mm, using Helvetica-like proportions.
/// Close enough for centering; exact metrics would need the font's tables.
fn text_width_mm(text: &str, size: f32) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match c {
            ' ' | '.' | ',' | ':' | 'i' | 'ı' | 'l' | 'j' | 'I' | 'İ' | '(' | ')' | '-' => 0.28,
            'f' | 't' | 'r' => 0.33,
            'm' | 'w' => 0.83,
            'M' | 'W' => 0.9,
            '0'..='9' => 0.556,
            c if c.is_uppercase() => 0.68,
            _ => 0.53,
        })
        .sum();
    em * size * PT_TO_MM
}
