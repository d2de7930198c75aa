// Text-only PDF for the monthly report.
//
// Purpose
// - Lay out a title and one line per report entry, flowing onto new pages as needed.
//
// Boundaries
// - Standard Helvetica with WinAnsi encoding, so no font file is embedded.
//   Characters outside WinAnsi are replaced when encoded.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("pdf rendering failed: {0}")]
    Render(String),
}

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 16.0;
const TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const FONT_NAME: Name<'static> = Name(b"F1");

/// Encode text for a WinAnsi Type1 font.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' '..='~' => bytes.push(ch as u8),
            '\u{a0}'..='\u{ff}' => bytes.push(ch as u32 as u8),
            '€' => bytes.push(0x80),
            '…' => bytes.push(0x85),
            '‘' => bytes.push(0x91),
            '’' => bytes.push(0x92),
            '“' => bytes.push(0x93),
            '”' => bytes.push(0x94),
            '•' => bytes.push(0x95),
            '–' => bytes.push(0x96),
            '—' => bytes.push(0x97),
            '→' => bytes.extend_from_slice(b"->"),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}

struct ReportPdf {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    next_id: i32,
    page_ids: Vec<Ref>,
}

impl ReportPdf {
    fn new() -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            next_id: 4,
            page_ids: Vec::new(),
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn write_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(FONT_NAME, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encode_win_ansi(text)));
        content.end_text();
    }

    /// Title and page number; returns the baseline of the first body line.
    fn start_page(&self, content: &mut Content, title: &str, number: usize) -> f32 {
        Self::write_text(content, MARGIN, PAGE_HEIGHT - MARGIN, TITLE_SIZE, title);
        Self::write_text(
            content,
            PAGE_WIDTH - MARGIN - 40.0,
            MARGIN - 25.0,
            BODY_SIZE,
            &format!("Page {number}"),
        );
        PAGE_HEIGHT - MARGIN - 2.0 * LINE_HEIGHT
    }

    fn flush_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_ids.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
                .contents(content_id);
            page.resources().fonts().pair(FONT_NAME, self.font_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_ids.len() as i32)
            .kids(self.page_ids.iter().copied());
        self.pdf.finish()
    }
}

/// Render `title` then `lines`, starting a new page whenever the bottom margin is reached.
/// Always produces at least one page.
pub fn render_report(title: &str, lines: &[String]) -> Vec<u8> {
    let mut doc = ReportPdf::new();
    let mut page_number = 1;
    let mut content = Content::new();
    let mut y = doc.start_page(&mut content, title, page_number);

    for line in lines {
        if y < MARGIN {
            doc.flush_page(content);
            page_number += 1;
            content = Content::new();
            y = doc.start_page(&mut content, title, page_number);
        }
        ReportPdf::write_text(&mut content, MARGIN, y, BODY_SIZE, line);
        y -= LINE_HEIGHT;
    }

    doc.flush_page(content);
    doc.finish()
}
