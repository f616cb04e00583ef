//! Serialises laid-out pages into a PDF document with `lopdf`.
//!
//! Every page gets the running decorations: a diagonal watermark under the
//! content, the header title and date above the frame, and the notices and
//! page number below it.

use chrono::{Datelike, NaiveDate};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use markdown_dossier_config::Branding;
use markdown_dossier_engine::{TocEntry, TypesetError, format_date};

use crate::encoding::{encode_text_string, encode_win_ansi};
use crate::fonts::Font;
use crate::layout::Layout;
use crate::page::{DrawOp, FRAME_LEFT, LinkTarget, PAGE_HEIGHT, PAGE_WIDTH, PageLayout};
use crate::style::Rgb;

pub const PDF_VERSION: &str = "1.5";
pub const WATERMARK: &str = "CONFIDENTIAL";
const WATERMARK_SIZE: f32 = 60.0;

const HEADER_Y: f32 = PAGE_HEIGHT - 46.8;
const HEADER_TITLE_SIZE: f32 = 11.0;
const HEADER_DATE_SIZE: f32 = 9.0;
const FOOTER_NOTICE_Y: f32 = 46.8;
const FOOTER_RIGHTS_Y: f32 = 36.0;
const FOOTER_SIZE: f32 = 8.0;
const FRAME_RIGHT: f32 = PAGE_WIDTH - FRAME_LEFT;

pub const CREATOR: &str = "markdown-dossier";

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn pdf_error(error: impl std::fmt::Display) -> TypesetError {
    TypesetError::Pdf(error.to_string())
}

/// Text shown on every page besides the content.
struct Decorations {
    title: String,
    date: String,
    notice: String,
    rights: String,
}

impl Decorations {
    fn new(branding: &Branding, date: NaiveDate) -> Self {
        Self {
            title: branding.header_title.clone(),
            date: format_date(date, &branding.header_date_format),
            notice: branding.confidentiality_notice.clone(),
            rights: branding.rights_notice(date.year()),
        }
    }
}

/// Accumulates content stream operations.
#[derive(Default)]
struct Painter {
    operations: Vec<Operation>,
}

impl Painter {
    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn fill_color(&mut self, color: Rgb) {
        self.op("rg", vec![real(color.0), real(color.1), real(color.2)]);
    }

    fn stroke_color(&mut self, color: Rgb) {
        self.op("RG", vec![real(color.0), real(color.1), real(color.2)]);
    }

    fn text_at(&mut self, font: Font, size: f32, matrix: [f32; 6], text: &str, word_spacing: f32) {
        self.op("BT", vec![]);
        self.op(
            "Tf",
            vec![Object::Name(font.resource_name().into_bytes()), real(size)],
        );
        self.op("Tw", vec![real(word_spacing)]);
        self.op("Tm", matrix.iter().copied().map(real).collect());
        self.op(
            "Tj",
            vec![Object::String(
                encode_win_ansi(text),
                StringFormat::Hexadecimal,
            )],
        );
        self.op("ET", vec![]);
    }

    fn text(&mut self, font: Font, size: f32, color: Rgb, x: f32, y: f32, text: &str) {
        self.fill_color(color);
        self.text_at(font, size, [1.0, 0.0, 0.0, 1.0, x, y], text, 0.0);
    }

    fn text_right(&mut self, font: Font, size: f32, right: f32, y: f32, text: &str) {
        let x = right - font.text_width(text, size);
        self.text(font, size, Rgb::BLACK, x, y, text);
    }

    fn draw(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
                color,
                word_spacing,
            } => {
                self.fill_color(*color);
                self.text_at(*font, *size, [1.0, 0.0, 0.0, 1.0, *x, *y], text, *word_spacing);
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                self.op("q", vec![]);
                if let Some(color) = fill {
                    self.fill_color(*color);
                }
                if let Some((color, line_width)) = stroke {
                    self.stroke_color(*color);
                    self.op("w", vec![real(*line_width)]);
                }
                self.op("re", vec![real(*x), real(*y), real(*width), real(*height)]);
                let paint = match (fill.is_some(), stroke.is_some()) {
                    (true, true) => "B",
                    (true, false) => "f",
                    (false, true) => "S",
                    (false, false) => "n",
                };
                self.op(paint, vec![]);
                self.op("Q", vec![]);
            }
            DrawOp::Line {
                from,
                to,
                color,
                width,
            } => {
                self.op("q", vec![]);
                self.stroke_color(*color);
                self.op("w", vec![real(*width)]);
                self.op("m", vec![real(from.0), real(from.1)]);
                self.op("l", vec![real(to.0), real(to.1)]);
                self.op("S", vec![]);
                self.op("Q", vec![]);
            }
        }
    }

    fn watermark(&mut self) {
        let font = Font::HELVETICA_BOLD;
        let half = font.text_width(WATERMARK, WATERMARK_SIZE) / 2.0;
        let (sin, cos) = std::f32::consts::FRAC_PI_4.sin_cos();
        let (cx, cy) = (PAGE_WIDTH / 2.0, PAGE_HEIGHT / 2.0);
        self.op("q", vec![]);
        self.fill_color(Rgb::WATERMARK);
        self.text_at(
            font,
            WATERMARK_SIZE,
            [cos, sin, -sin, cos, cx - cos * half, cy - sin * half],
            WATERMARK,
            0.0,
        );
        self.op("Q", vec![]);
    }

    fn header_footer(&mut self, decorations: &Decorations, page_number: usize) {
        self.op("q", vec![]);
        self.text(
            Font::HELVETICA_BOLD,
            HEADER_TITLE_SIZE,
            Rgb::BLACK,
            FRAME_LEFT,
            HEADER_Y,
            &decorations.title,
        );
        self.text_right(
            Font::HELVETICA,
            HEADER_DATE_SIZE,
            FRAME_RIGHT,
            HEADER_Y,
            &decorations.date,
        );
        self.text(
            Font::HELVETICA,
            FOOTER_SIZE,
            Rgb::BLACK,
            FRAME_LEFT,
            FOOTER_NOTICE_Y,
            &decorations.notice,
        );
        self.text(
            Font::HELVETICA,
            FOOTER_SIZE,
            Rgb::BLACK,
            FRAME_LEFT,
            FOOTER_RIGHTS_Y,
            &decorations.rights,
        );
        self.text_right(
            Font::HELVETICA,
            FOOTER_SIZE,
            FRAME_RIGHT,
            FOOTER_RIGHTS_Y,
            &format!("Page {page_number}"),
        );
        self.op("Q", vec![]);
    }

    fn encode(self) -> Result<Vec<u8>, TypesetError> {
        Content {
            operations: self.operations,
        }
        .encode()
        .map_err(pdf_error)
    }
}

fn font_resources(doc: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in Font::all() {
        let mut dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
        };
        if !font.is_symbolic() {
            dict.set("Encoding", "WinAnsiEncoding");
        }
        let id = doc.add_object(dict);
        fonts.set(font.resource_name(), id);
    }
    fonts
}

fn destination(page: ObjectId, top: f32) -> Object {
    Object::Array(vec![
        Object::Reference(page),
        "XYZ".into(),
        Object::Null,
        real(top),
        Object::Null,
    ])
}

fn link_annotation(rect: [f32; 4], target: &LinkTarget) -> Dictionary {
    let mut annotation = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect.iter().copied().map(real).collect::<Vec<Object>>(),
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
    };
    match target {
        LinkTarget::Uri(uri) => annotation.set(
            "A",
            dictionary! {
                "S" => "URI",
                "URI" => Object::string_literal(uri.as_bytes().to_vec()),
            },
        ),
        LinkTarget::Dest(anchor) => {
            annotation.set("Dest", Object::string_literal(anchor.as_bytes().to_vec()))
        }
    }
    annotation
}

/// Name tree mapping heading anchors to page positions.
fn named_destinations(layout: &Layout, page_ids: &[ObjectId]) -> Object {
    let mut dests: Vec<(&str, Object)> = layout
        .pages
        .iter()
        .zip(page_ids)
        .flat_map(|(page, id)| {
            page.dests
                .iter()
                .map(move |(anchor, top)| (anchor.as_str(), destination(*id, *top)))
        })
        .collect();
    dests.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    dests.dedup_by(|a, b| a.0 == b.0);

    let names = dests
        .into_iter()
        .flat_map(|(anchor, dest)| [Object::string_literal(anchor.as_bytes().to_vec()), dest])
        .collect::<Vec<Object>>();
    Object::Dictionary(dictionary! { "Names" => names })
}

fn destination_of(layout: &Layout, page_ids: &[ObjectId], anchor: &str) -> Option<Object> {
    layout
        .pages
        .iter()
        .zip(page_ids)
        .find_map(|(page, id)| {
            page.dests
                .iter()
                .find(|(name, _)| name == anchor)
                .map(|(_, top)| destination(*id, *top))
        })
}

/// Builds the bookmark tree: level 0 entries at the root, level 1 entries
/// under the preceding level 0 entry.
fn outlines(doc: &mut Document, layout: &Layout, page_ids: &[ObjectId]) -> Option<ObjectId> {
    if layout.toc.is_empty() {
        return None;
    }
    let root_id = doc.new_object_id();

    let mut groups: Vec<(&TocEntry, Vec<&TocEntry>)> = Vec::new();
    for entry in &layout.toc {
        if entry.level > 0
            && let Some((_, children)) = groups.last_mut()
        {
            children.push(entry);
        } else {
            groups.push((entry, Vec::new()));
        }
    }

    let item = |doc: &mut Document, entry: &TocEntry, parent: ObjectId| -> (ObjectId, Dictionary) {
        let id = doc.new_object_id();
        let mut dict = dictionary! {
            "Title" => Object::String(encode_text_string(&entry.text), StringFormat::Literal),
            "Parent" => parent,
        };
        if let Some(dest) = destination_of(layout, page_ids, &entry.anchor) {
            dict.set("Dest", dest);
        }
        (id, dict)
    };

    let mut top_level: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut total = 0i64;
    for (head, children) in groups {
        let (head_id, mut head_dict) = item(doc, head, root_id);
        let mut kids: Vec<(ObjectId, Dictionary)> = children
            .into_iter()
            .map(|child| item(doc, child, head_id))
            .collect();
        link_siblings(&mut kids);
        if let (Some((first, _)), Some((last, _))) = (kids.first(), kids.last()) {
            head_dict.set("First", *first);
            head_dict.set("Last", *last);
            head_dict.set("Count", Object::Integer(kids.len() as i64));
        }
        total += 1 + kids.len() as i64;
        for (id, dict) in kids {
            doc.objects.insert(id, Object::Dictionary(dict));
        }
        top_level.push((head_id, head_dict));
    }
    link_siblings(&mut top_level);

    let (first, last) = (top_level.first()?.0, top_level.last()?.0);
    for (id, dict) in top_level {
        doc.objects.insert(id, Object::Dictionary(dict));
    }
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => Object::Integer(total),
        }),
    );
    Some(root_id)
}

fn link_siblings(items: &mut [(ObjectId, Dictionary)]) {
    let ids: Vec<ObjectId> = items.iter().map(|(id, _)| *id).collect();
    for (index, (_, dict)) in items.iter_mut().enumerate() {
        if index > 0 {
            dict.set("Prev", ids[index - 1]);
        }
        if let Some(next) = ids.get(index + 1) {
            dict.set("Next", *next);
        }
    }
}

/// Renders laid-out pages into an in-memory PDF document.
pub fn render_document(
    layout: &Layout,
    branding: &Branding,
    date: NaiveDate,
) -> Result<Document, TypesetError> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();
    let fonts = font_resources(&mut doc);
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });
    let decorations = Decorations::new(branding, date);

    let page_ids: Vec<ObjectId> = layout.pages.iter().map(|_| doc.new_object_id()).collect();
    for (index, (page, page_id)) in layout.pages.iter().zip(&page_ids).enumerate() {
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            page_content(page, &decorations, index + 1)?,
        ));
        let annotations: Vec<Object> = page
            .links
            .iter()
            .map(|link| Object::Reference(doc.add_object(link_annotation(link.rect, &link.target))))
            .collect();

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annotations.is_empty() {
            page_dict.set("Annots", annotations);
        }
        doc.objects.insert(*page_id, Object::Dictionary(page_dict));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => Object::Integer(page_ids.len() as i64),
            "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        }),
    );

    let dests_id = doc.add_object(named_destinations(layout, &page_ids));
    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "Names" => dictionary! { "Dests" => dests_id },
    };
    if let Some(outlines_id) = outlines(&mut doc, layout, &page_ids) {
        catalog.set("Outlines", outlines_id);
        catalog.set("PageMode", "UseOutlines");
    }
    let catalog_id = doc.add_object(catalog);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_text_string(&branding.project_name), StringFormat::Literal),
        "Creator" => Object::string_literal(CREATOR),
        "Producer" => Object::string_literal(CREATOR),
        "CreationDate" => Object::string_literal(date.format("D:%Y%m%d000000").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();
    Ok(doc)
}

fn page_content(
    page: &PageLayout,
    decorations: &Decorations,
    page_number: usize,
) -> Result<Vec<u8>, TypesetError> {
    let mut painter = Painter::default();
    painter.watermark();
    for op in &page.ops {
        painter.draw(op);
    }
    painter.header_footer(decorations, page_number);
    painter.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::LinkArea;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn two_page_layout() -> Layout {
        let mut first = PageLayout::default();
        first.dests.push(("intro".to_string(), 720.0));
        first.links.push(LinkArea {
            rect: [72.0, 700.0, 200.0, 712.0],
            target: LinkTarget::Uri("https://example.com".to_string()),
        });
        let mut second = PageLayout::default();
        second.dests.push(("details".to_string(), 720.0));
        second.links.push(LinkArea {
            rect: [72.0, 700.0, 200.0, 712.0],
            target: LinkTarget::Dest("intro".to_string()),
        });
        Layout {
            pages: vec![first, second],
            toc: vec![
                TocEntry {
                    level: 0,
                    text: "Intro".to_string(),
                    page: 1,
                    anchor: "intro".to_string(),
                },
                TocEntry {
                    level: 1,
                    text: "Details".to_string(),
                    page: 2,
                    anchor: "details".to_string(),
                },
            ],
        }
    }

    fn string_value(object: &Object) -> &[u8] {
        match object {
            Object::String(bytes, _) => bytes,
            other => panic!("expected a string, got {other:?}"),
        }
    }

    fn catalog(doc: &Document) -> &Dictionary {
        let root = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        doc.get_dictionary(root).unwrap()
    }

    #[test]
    fn renders_every_page() {
        let doc = render_document(&two_page_layout(), &Branding::default(), date()).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn outline_nests_second_level_entries() {
        let doc = render_document(&two_page_layout(), &Branding::default(), date()).unwrap();
        let outlines_id = catalog(&doc)
            .get(b"Outlines")
            .unwrap()
            .as_reference()
            .unwrap();
        let outlines = doc.get_dictionary(outlines_id).unwrap();
        assert_eq!(outlines.get(b"Count").unwrap().as_i64().unwrap(), 2);

        let first = outlines.get(b"First").unwrap().as_reference().unwrap();
        let intro = doc.get_dictionary(first).unwrap();
        assert_eq!(string_value(intro.get(b"Title").unwrap()), b"Intro");
        assert!(intro.get(b"First").is_ok());
        assert!(intro.get(b"Next").is_err());
    }

    #[test]
    fn no_outline_without_toc_entries() {
        let layout = Layout {
            pages: vec![PageLayout::default()],
            toc: Vec::new(),
        };
        let doc = render_document(&layout, &Branding::default(), date()).unwrap();
        assert!(catalog(&doc).get(b"Outlines").is_err());
    }

    #[test]
    fn info_title_is_project_name() {
        let doc = render_document(&two_page_layout(), &Branding::for_title("Atlas"), date()).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(string_value(info.get(b"Title").unwrap()), b"Atlas");
    }

    #[test]
    fn links_become_annotations() {
        let doc = render_document(&two_page_layout(), &Branding::default(), date()).unwrap();
        let annotated = doc
            .get_pages()
            .values()
            .filter(|id| {
                doc.get_dictionary(**id)
                    .map(|page| page.get(b"Annots").is_ok())
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(annotated, 2);
    }

    #[test]
    fn decorations_use_branding() {
        let decorations = Decorations::new(&Branding::for_title("Atlas"), date());
        assert_eq!(decorations.title, "Atlas — Strategic Overview");
        assert_eq!(decorations.date, "June 01, 2025");
        assert!(decorations.rights.starts_with("© 2025 Atlas"));
    }
}
