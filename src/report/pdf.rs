//! PDF rendering of laid-out report blocks.
//!
//! Blocks flow top to bottom on A4 pages with 10 mm margins. A block that
//! would cross the page-break trigger (20 mm above the bottom edge) starts a
//! new page. Text uses the base-14 Helvetica fonts, so nothing is embedded
//! besides the chart images.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::layout::{Block, REPORT_TITLE};
use crate::error::ReportError;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;
const BREAK_MARGIN_MM: f64 = 20.0;
/// Horizontal padding inside a text cell
const CELL_PADDING_MM: f64 = 1.0;

const TITLE_CELL_MM: f64 = 10.0;
const LINE_CELL_MM: f64 = 8.0;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

fn mm_to_pt(mm: f64) -> f32 {
    (mm * 72.0 / 25.4) as f32
}

#[derive(Debug, Clone, Copy)]
struct Font {
    resource: &'static str,
    size: f64,
}

impl Font {
    fn width_mm(&self, text: &str) -> f64 {
        let bold = self.resource == BOLD;
        let units: u32 = text.chars().map(|c| helvetica_width(c, bold)).sum();
        units as f64 / 1000.0 * self.size * 25.4 / 72.0
    }
}

/// Advance widths of Helvetica and Helvetica-Bold for printable ASCII, in
/// thousandths of an em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [[u16; 95]; 2] = [
    [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ],
    [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ],
];

fn helvetica_width(c: char, bold: bool) -> u32 {
    let table = &HELVETICA_WIDTHS[usize::from(bold)];
    match c {
        ' '..='~' => u32::from(table[c as usize - 32]),
        _ => 556,
    }
}

/// Encode text for a WinAnsi-encoded base-14 font.
///
/// WinAnsi agrees with Latin-1 except in 0x80..=0x9F, so only characters
/// outside that block and below 0x100 pass through; the rest become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) if !(0x80..=0x9f).contains(&b) => b,
            _ => b'?',
        })
        .collect()
}

enum Align {
    Left,
    Center,
}

/// Flows blocks onto pages, tracking the vertical cursor.
struct PageFlow {
    pages: Vec<Vec<Operation>>,
    images: BTreeMap<String, ObjectId>,
    /// Distance of the cursor from the top edge
    y_mm: f64,
}

impl PageFlow {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            images: BTreeMap::new(),
            y_mm: MARGIN_MM,
        }
    }

    fn page_break_if_needed(&mut self, height_mm: f64) {
        let at_page_top = self.y_mm <= MARGIN_MM;
        if !at_page_top && self.y_mm + height_mm > PAGE_HEIGHT_MM - BREAK_MARGIN_MM {
            self.pages.push(Vec::new());
            self.y_mm = MARGIN_MM;
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` always holds at least the first page.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, text: &str, font: Font, cell_mm: f64, align: Align) {
        self.page_break_if_needed(cell_mm);

        let x_mm = match align {
            Align::Left => MARGIN_MM + CELL_PADDING_MM,
            Align::Center => (PAGE_WIDTH_MM - font.width_mm(text)) / 2.0,
        };
        // Baseline sits just below the middle of the cell.
        let baseline_mm = self.y_mm + cell_mm / 2.0 + 0.3 * font.size * 25.4 / 72.0;

        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource.into(), (font.size as f32).into()]),
            Operation::new(
                "Td",
                vec![
                    mm_to_pt(x_mm).into(),
                    mm_to_pt(PAGE_HEIGHT_MM - baseline_mm).into(),
                ],
            ),
            Operation::new("Tj", vec![Object::string_literal(encode_text(text))]),
            Operation::new("ET", vec![]),
        ];
        self.ops().extend(ops);
        self.y_mm += cell_mm;
    }

    fn image(
        &mut self,
        doc: &mut Document,
        path: &Path,
        x_mm: f64,
        width_mm: f64,
    ) -> Result<(), ReportError> {
        let (name, height_mm) = {
            let img = image::open(path)?.to_rgb8();
            let (w, h) = img.dimensions();
            let height_mm = width_mm * h as f64 / w.max(1) as f64;

            let name = format!("Im{}", self.images.len() + 1);
            let stream = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(w),
                    "Height" => i64::from(h),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                },
                img.into_raw(),
            );
            self.images.insert(name.clone(), doc.add_object(stream));
            (name, height_mm)
        };

        self.page_break_if_needed(height_mm);
        let bottom_mm = self.y_mm + height_mm;
        let ops = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    mm_to_pt(width_mm).into(),
                    0.into(),
                    0.into(),
                    mm_to_pt(height_mm).into(),
                    mm_to_pt(x_mm).into(),
                    mm_to_pt(PAGE_HEIGHT_MM - bottom_mm).into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ];
        self.ops().extend(ops);
        self.y_mm = bottom_mm;
        tracing::debug!(image = %path.display(), page = self.pages.len(), "placed image");
        Ok(())
    }
}

/// Render blocks into an in-memory PDF document.
///
/// Content streams are left uncompressed; [`save_document`] compresses them.
pub fn render_document(blocks: &[Block], creation_date: &str) -> Result<Document, ReportError> {
    let mut doc = Document::with_version("1.5");
    let mut flow = PageFlow::new();

    let title = Font { resource: BOLD, size: 16.0 };
    let heading = Font { resource: BOLD, size: 14.0 };
    let body = Font { resource: REGULAR, size: 12.0 };

    for block in blocks {
        match block {
            Block::Title(text) => flow.text(text, title, TITLE_CELL_MM, Align::Center),
            Block::Centered(text) => flow.text(text, body, TITLE_CELL_MM, Align::Center),
            Block::Heading(text) => flow.text(text, heading, TITLE_CELL_MM, Align::Left),
            Block::Line(text) => flow.text(text, body, LINE_CELL_MM, Align::Left),
            Block::Image { path, x_mm, width_mm } => {
                flow.image(&mut doc, path, *x_mm, *width_mm)?
            }
            Block::Gap(mm) => flow.y_mm += mm,
        }
    }

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(base14_font("Helvetica"));
    let bold_id = doc.add_object(base14_font("Helvetica-Bold"));

    let mut xobjects = Dictionary::new();
    for (name, id) in &flow.images {
        xobjects.set(name.as_bytes().to_vec(), *id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular_id,
            BOLD => bold_id,
        },
        "XObject" => xobjects,
    });

    let mut kids = Vec::with_capacity(flow.pages.len());
    for operations in flow.pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                mm_to_pt(PAGE_WIDTH_MM).into(),
                mm_to_pt(PAGE_HEIGHT_MM).into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(REPORT_TITLE),
        "Producer" => Object::string_literal(concat!("seller-report ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(creation_date),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    tracing::debug!(pages = page_count, images = flow.images.len(), "rendered document");
    Ok(doc)
}

fn base14_font(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Compress and write the document, replacing any existing file.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    doc.compress();
    doc.save(path)?;
    Ok(())
}
