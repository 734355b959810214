//! Paginated page layout for generated reports.
//!
//! Content is recorded as positioned text operations on fixed-size pages,
//! then rendered to PDF bytes in one pass at the end. Pages are
//! append-only: once the cursor moves past a page it is never revisited.

use crate::fonts::Font;
use crate::output::ReportError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// ISO A4 page width in points.
pub const PAGE_WIDTH: f32 = 595.28;
/// ISO A4 page height in points.
pub const PAGE_HEIGHT: f32 = 841.89;
/// Margin on all four sides.
pub const MARGIN: f32 = 48.0;
/// Vertical advance per text line.
pub const LINE_HEIGHT: f32 = 14.0;
/// Width of the label column in label/value rows.
pub const LABEL_COLUMN_WIDTH: f32 = 130.0;

const SECTION_SIZE: f32 = 13.0;
const SECTION_GAP_AFTER: f32 = 4.0;

/// Style for one drawn line.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f32,
    /// Bold face.
    pub bold: bool,
    /// Horizontal offset from the left margin.
    pub x_offset: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 11.0,
            bold: false,
            x_offset: 0.0,
        }
    }
}

impl TextStyle {
    /// Default style in bold.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }
}

/// One positioned piece of text on a page.
#[derive(Debug, Clone)]
pub struct TextOp {
    /// Distance from the left page edge.
    pub x: f32,
    /// Baseline distance from the bottom page edge.
    pub y: f32,
    /// Font size.
    pub size: f32,
    /// Font face.
    pub font: Font,
    /// The text.
    pub text: String,
}

/// One committed page of recorded operations.
#[derive(Debug, Default, Clone)]
pub struct Page {
    /// Text operations in draw order.
    pub ops: Vec<TextOp>,
}

/// Stateful layout builder: a cursor walking down fixed-size pages,
/// starting a new page whenever one more line would cross the bottom
/// margin. Pagination lives here once, not in every report assembler.
pub struct ReportBuilder {
    pages: Vec<Page>,
    cursor: f32,
}

impl ReportBuilder {
    /// Start a document with one empty page, cursor at the top margin.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Pages recorded so far.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn ensure_space(&mut self) {
        if self.cursor - LINE_HEIGHT < MARGIN {
            self.pages.push(Page::default());
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
    }

    /// Draw one line at the current cursor and advance.
    pub fn line(&mut self, text: &str, style: TextStyle) {
        self.ensure_space();
        let font = if style.bold { Font::Bold } else { Font::Regular };
        let op = TextOp {
            x: MARGIN + style.x_offset,
            y: self.cursor,
            size: style.size,
            font,
            text: text.to_string(),
        };
        self.pages
            .last_mut()
            .expect("builder always holds one page")
            .ops
            .push(op);
        self.cursor -= LINE_HEIGHT;
    }

    /// Insert vertical space. The next drawn line page-breaks if the
    /// cursor has passed the bottom margin.
    pub fn gap(&mut self, points: f32) {
        self.cursor -= points;
    }

    /// Section header: half a line of air above, a small gap below.
    pub fn section(&mut self, title: &str) {
        self.gap(LINE_HEIGHT / 2.0);
        self.line(
            title,
            TextStyle {
                size: SECTION_SIZE,
                bold: true,
                x_offset: 0.0,
            },
        );
        self.gap(SECTION_GAP_AFTER);
    }

    /// Wrap and draw a paragraph across the full content width.
    pub fn paragraph(&mut self, text: &str, style: TextStyle) {
        let font = if style.bold { Font::Bold } else { Font::Regular };
        let max_width = PAGE_WIDTH - 2.0 * MARGIN - style.x_offset;
        for line in wrap_text(text, max_width, font, style.size) {
            self.line(&line, style);
        }
    }

    /// Bold label in a fixed-width column, wrapped value beside it.
    /// Empty values render as "N/A".
    pub fn label_value(&mut self, label: &str, value: &str) {
        let value = if value.is_empty() { "N/A" } else { value };
        let value_x = LABEL_COLUMN_WIDTH;
        let max_width = PAGE_WIDTH - MARGIN - (MARGIN + value_x);

        self.line(label, TextStyle::bold());
        for line in wrap_text(value, max_width, Font::Regular, 11.0) {
            self.line(
                &line,
                TextStyle {
                    x_offset: value_x,
                    ..TextStyle::default()
                },
            );
        }
    }

    /// Render all recorded pages to PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Font::Regular.base_name(),
        });
        let font_bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Font::Bold.base_name(),
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Regular.resource_name() => font_regular_id,
                Font::Bold.resource_name() => font_bold_id,
            },
        });

        let mut page_ids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let mut operations = Vec::with_capacity(page.ops.len() * 5);
            for op in &page.ops {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![op.font.resource_name().into(), op.size.into()],
                ));
                operations.push(Operation::new("Td", vec![op.x.into(), op.y.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(op.text.as_str())],
                ));
                operations.push(Operation::new("ET", vec![]));
            }

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Resources" => resources_id,
            });
            page_ids.push(page_id.into());
        }

        let page_count = page_ids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids,
                "Count" => page_count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedy word wrap: pack whitespace-delimited words into lines no wider
/// than `max_width` as measured by the font at `size`. A word wider than
/// the limit gets a line of its own. Same input, same output.
pub fn wrap_text(text: &str, max_width: f32, font: Font, size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(current);
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
