//! Flows a story's flowables onto fixed-size pages.
//!
//! The composer keeps a cursor `y` that moves down the frame. Paragraphs,
//! lists and code blocks split between lines, table rows split between rows
//! and repeat their header row, headings keep some room for what follows.

use log::debug;
use markdown_dossier_engine::{Flowable, Heading, Story, StyleRole, TableGrid, TocEntry, plain_text};

use crate::fonts::Font;
use crate::markup::{RunStyle, Token, parse_markup};
use crate::page::{
    DrawOp, FRAME_BOTTOM, FRAME_LEFT, FRAME_TOP, FRAME_WIDTH, LinkArea, LinkTarget, PageLayout,
};
use crate::style::{Align, ParagraphStyle, Rgb};
use crate::text::{TextLine, wrap};

/// Room a heading keeps below itself so it is not stranded at a page foot.
pub const KEEP_WITH_NEXT: f32 = 30.0;

const BULLET: &str = "•";
const BULLET_INDENT: f32 = 9.0;

const CELL_PAD_X: f32 = 6.0;
const CELL_PAD_Y: f32 = 3.0;
const GRID_WIDTH: f32 = 0.25;
const HEADER_RULE_WIDTH: f32 = 1.0;

const COVER_COLUMNS: [f32; 2] = [144.0, 288.0];
const COVER_HEADER_PAD: f32 = 8.0;

const CODE_SIZE: f32 = 8.5;
const CODE_LEADING: f32 = 11.0;
const CODE_PAD_X: f32 = 10.0;
const CODE_PAD_Y: f32 = 8.0;
const TAB: &str = "    ";

const CALLOUT_PAD_X: f32 = 12.0;
const CALLOUT_PAD_Y: f32 = 10.0;

const RULE_GAP: f32 = 8.0;
const RULE_WIDTH: f32 = 1.0;

const BOX_BORDER: f32 = 0.5;

/// Pages plus the TOC entries discovered while flowing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub pages: Vec<PageLayout>,
    pub toc: Vec<TocEntry>,
}

struct OpenCallout {
    op_index: usize,
    top: f32,
    left: f32,
    width: f32,
}

struct Composer<'a> {
    pages: Vec<PageLayout>,
    page: PageLayout,
    y: f32,
    /// Nothing has been placed on the current page yet.
    fresh: bool,
    left: f32,
    width: f32,
    callout: Option<OpenCallout>,
    toc: Vec<TocEntry>,
    /// Entries drawn by the `TableOfContents` flowable.
    known_toc: &'a [TocEntry],
}

/// A table row with its cells already broken into lines.
struct PreparedRow {
    cells: Vec<Vec<TextLine>>,
    styles: Vec<ParagraphStyle>,
    widths: Vec<f32>,
    height: f32,
    fill: Option<Rgb>,
}

/// Lays out `story`; `known_toc` is what the table of contents page shows.
pub fn layout_story(story: &Story, known_toc: &[TocEntry]) -> Layout {
    let mut composer = Composer::new(known_toc);
    for flowable in &story.flowables {
        composer.flowable(flowable);
    }
    let layout = composer.finish();
    debug!(
        "laid out {} pages with {} toc entries",
        layout.pages.len(),
        layout.toc.len()
    );
    layout
}

impl<'a> Composer<'a> {
    fn new(known_toc: &'a [TocEntry]) -> Self {
        Self {
            pages: Vec::new(),
            page: PageLayout::default(),
            y: FRAME_TOP,
            fresh: true,
            left: FRAME_LEFT,
            width: FRAME_WIDTH,
            callout: None,
            toc: Vec::new(),
            known_toc,
        }
    }

    fn finish(mut self) -> Layout {
        if let Some(open) = self.callout.take() {
            self.close_callout(&open, self.y);
        }
        if !self.page.is_blank() || self.pages.is_empty() {
            self.pages.push(self.page);
        }
        Layout {
            pages: self.pages,
            toc: self.toc,
        }
    }

    fn page_number(&self) -> usize {
        self.pages.len() + 1
    }

    fn new_page(&mut self) {
        let open = self.callout.take();
        if let Some(open) = &open {
            self.close_callout(open, self.y);
        }

        let finished = std::mem::take(&mut self.page);
        self.pages.push(finished);
        self.y = FRAME_TOP;
        self.fresh = true;

        if let Some(open) = open {
            self.callout = Some(OpenCallout {
                op_index: 0,
                top: FRAME_TOP,
                ..open
            });
            self.y -= CALLOUT_PAD_Y;
        }
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    fn ensure(&mut self, height: f32) {
        if !self.fresh && self.y - height < FRAME_BOTTOM {
            self.new_page();
        }
    }

    /// Vertical space that disappears at the top of a page.
    fn gap(&mut self, height: f32) {
        if !self.fresh {
            self.y -= height;
        }
    }

    fn advance(&mut self, height: f32) {
        self.y -= height;
        self.fresh = false;
    }

    fn flowable(&mut self, flowable: &Flowable) {
        match flowable {
            Flowable::Paragraph { text, role } => self.paragraph(text, *role),
            Flowable::Heading(heading) => self.heading(heading),
            Flowable::BulletList { items, role } => self.bullet_list(items, *role),
            Flowable::Table(grid) => self.table(grid),
            Flowable::CodeBlock { lines } => self.code_block(lines),
            Flowable::Rule => self.rule(),
            Flowable::Spacer { height } => self.advance(*height),
            Flowable::Callout { body, .. } => self.callout(body),
            Flowable::PageBreak => {
                if !self.page.is_blank() {
                    self.new_page();
                }
            }
            Flowable::KeyValueTable(rows) => self.key_value_table(rows),
            Flowable::TableOfContents => self.table_of_contents(),
        }
    }

    fn paragraph(&mut self, markup: &str, role: StyleRole) {
        let style = ParagraphStyle::for_role(role);
        let left = self.left + style.left_indent;
        let width = self.width - style.left_indent - style.right_indent;
        let lines = wrap(&parse_markup(markup), &style, width);
        if lines.is_empty() {
            return;
        }
        self.gap(style.space_before);
        self.flow_lines(&lines, &style, left, width);
        self.y -= style.space_after;
    }

    fn heading(&mut self, heading: &Heading) {
        let style = ParagraphStyle::for_role(heading.role());
        let lines = wrap(&parse_markup(&heading.text), &style, self.width);

        let block = style.space_before + lines.len() as f32 * style.leading;
        self.ensure(block + KEEP_WITH_NEXT);
        self.gap(style.space_before);

        self.page.dests.push((heading.anchor.clone(), self.y));
        if let Some(level) = heading.outline_level() {
            self.toc.push(TocEntry {
                level,
                text: plain_text(&heading.text),
                page: self.page_number(),
                anchor: heading.anchor.clone(),
            });
        }

        self.flow_lines(&lines, &style, self.left, self.width);
        self.y -= style.space_after;
    }

    fn bullet_list(&mut self, items: &[String], role: StyleRole) {
        let style = ParagraphStyle::for_role(role);
        let left = self.left + style.left_indent;
        let width = self.width - style.left_indent;
        for item in items {
            let lines = wrap(&parse_markup(item), &style, width);
            if lines.is_empty() {
                continue;
            }
            self.ensure(style.leading);
            self.page.ops.push(DrawOp::Text {
                x: left - BULLET_INDENT,
                y: self.y - style.size,
                text: BULLET.to_string(),
                font: style.font,
                size: style.size,
                color: style.color,
                word_spacing: 0.0,
            });
            self.flow_lines(&lines, &style, left, width);
            self.y -= style.space_after;
        }
    }

    /// Draws lines, breaking pages between them.
    fn flow_lines(&mut self, lines: &[TextLine], style: &ParagraphStyle, left: f32, width: f32) {
        for (index, line) in lines.iter().enumerate() {
            self.ensure(style.leading);
            let last = index + 1 == lines.len();
            let baseline = self.y - style.size;
            self.draw_line(line, style, left, width, baseline, last);
            self.advance(style.leading);
        }
    }

    /// Draws lines from `top` down without page breaks.
    fn place_lines(
        &mut self,
        lines: &[TextLine],
        style: &ParagraphStyle,
        left: f32,
        width: f32,
        top: f32,
    ) {
        let mut cursor = top;
        for (index, line) in lines.iter().enumerate() {
            let last = index + 1 == lines.len();
            self.draw_line(line, style, left, width, cursor - style.size, last);
            cursor -= style.leading;
        }
    }

    fn draw_line(
        &mut self,
        line: &TextLine,
        style: &ParagraphStyle,
        left: f32,
        width: f32,
        baseline: f32,
        last: bool,
    ) {
        let spaces = line.spaces();
        let (mut x, word_spacing) = match style.align {
            Align::Left => (left, 0.0),
            Align::Center => (left + (width - line.width).max(0.0) / 2.0, 0.0),
            Align::Justify if !last && spaces > 0 => {
                (left, (width - line.width).max(0.0) / spaces as f32)
            }
            Align::Justify => (left, 0.0),
        };

        for fragment in &line.fragments {
            let advance = fragment.width() + fragment.spaces() as f32 * word_spacing;
            let bottom = baseline - fragment.size * 0.25;
            if let Some(back) = fragment.backcolor {
                self.page.ops.push(DrawOp::Rect {
                    x,
                    y: bottom,
                    width: advance,
                    height: fragment.size * 1.2,
                    fill: Some(back),
                    stroke: None,
                });
            }
            self.page.ops.push(DrawOp::Text {
                x,
                y: baseline,
                text: fragment.text.clone(),
                font: fragment.font,
                size: fragment.size,
                color: fragment.color,
                word_spacing,
            });
            if fragment.underline {
                self.page.ops.push(DrawOp::Line {
                    from: (x, baseline - 1.0),
                    to: (x + advance, baseline - 1.0),
                    color: fragment.color,
                    width: 0.5,
                });
            }
            if let Some(href) = &fragment.link {
                self.page.links.push(LinkArea {
                    rect: [x, bottom, x + advance, baseline + fragment.size * 0.95],
                    target: LinkTarget::Uri(href.clone()),
                });
            }
            x += advance;
        }
    }

    fn prepare_row(
        &self,
        cells: &[String],
        styles: Vec<ParagraphStyle>,
        widths: Vec<f32>,
        fill: Option<Rgb>,
        pad_bottom: f32,
    ) -> PreparedRow {
        let wrapped: Vec<Vec<TextLine>> = widths
            .iter()
            .zip(&styles)
            .enumerate()
            .map(|(index, (width, style))| {
                let markup = cells.get(index).map_or("", String::as_str);
                wrap(&parse_markup(markup), style, width - 2.0 * CELL_PAD_X)
            })
            .collect();
        let content = wrapped
            .iter()
            .zip(&styles)
            .map(|(lines, style)| lines.len().max(1) as f32 * style.leading)
            .fold(0.0, f32::max);
        PreparedRow {
            cells: wrapped,
            styles,
            widths,
            height: content + CELL_PAD_Y + pad_bottom,
            fill,
        }
    }

    fn draw_row(&mut self, row: &PreparedRow, left: f32, grid: Rgb) {
        let top = self.y;
        let bottom = top - row.height;
        let total: f32 = row.widths.iter().sum();
        if let Some(fill) = row.fill {
            self.page.ops.push(DrawOp::Rect {
                x: left,
                y: bottom,
                width: total,
                height: row.height,
                fill: Some(fill),
                stroke: None,
            });
        }

        let mut x = left;
        for ((lines, style), width) in row.cells.iter().zip(&row.styles).zip(&row.widths) {
            self.place_lines(
                lines,
                style,
                x + CELL_PAD_X,
                width - 2.0 * CELL_PAD_X,
                top - CELL_PAD_Y,
            );
            self.page.ops.push(DrawOp::Rect {
                x,
                y: bottom,
                width: *width,
                height: row.height,
                fill: None,
                stroke: Some((grid, GRID_WIDTH)),
            });
            x += width;
        }
        self.advance(row.height);
    }

    fn table(&mut self, grid: &TableGrid) {
        let columns = grid.column_count();
        let Some(header_cells) = grid.header() else {
            return;
        };
        if columns == 0 {
            return;
        }
        let widths = vec![self.width / columns as f32; columns];
        let border = Rgb::hex("#BFBFBF");
        let header = self.prepare_row(
            header_cells,
            vec![ParagraphStyle::for_role(StyleRole::TableHeader); columns],
            widths.clone(),
            Some(Rgb::NAVY),
            CELL_PAD_Y,
        );
        let body: Vec<PreparedRow> = grid
            .body()
            .iter()
            .map(|cells| {
                self.prepare_row(
                    cells,
                    vec![ParagraphStyle::for_role(StyleRole::TableCell); columns],
                    widths.clone(),
                    None,
                    CELL_PAD_Y,
                )
            })
            .collect();

        let first_body = body.first().map_or(0.0, |row| row.height);
        self.ensure(header.height + first_body);
        let left = self.left;
        self.draw_table_header(&header, left, border);

        for row in &body {
            if !self.fresh && self.y - row.height < FRAME_BOTTOM {
                self.new_page();
                self.draw_table_header(&header, left, border);
            }
            self.draw_row(row, left, border);
        }
    }

    fn draw_table_header(&mut self, header: &PreparedRow, left: f32, border: Rgb) {
        self.draw_row(header, left, border);
        let total: f32 = header.widths.iter().sum();
        self.page.ops.push(DrawOp::Line {
            from: (left, self.y),
            to: (left + total, self.y),
            color: Rgb::hex("#16365D"),
            width: HEADER_RULE_WIDTH,
        });
    }

    fn key_value_table(&mut self, rows: &[(String, String)]) {
        let total: f32 = COVER_COLUMNS.iter().sum();
        let left = self.left + (self.width - total).max(0.0) / 2.0;
        let border = Rgb::hex("#CCCCCC");
        let cell = ParagraphStyle::for_role(StyleRole::TableCell);

        for (index, (label, value)) in rows.iter().enumerate() {
            let (style, fill, pad_bottom) = if index == 0 {
                let style = ParagraphStyle {
                    font: Font::HELVETICA_BOLD,
                    color: Rgb::NAVY,
                    ..cell.clone()
                };
                (style, Some(Rgb::hex("#F2F2F2")), COVER_HEADER_PAD)
            } else {
                (cell.clone(), Some(Rgb::WHITE), CELL_PAD_Y)
            };
            let row = self.prepare_row(
                &[label.clone(), value.clone()],
                vec![style; 2],
                COVER_COLUMNS.to_vec(),
                fill,
                pad_bottom,
            );
            self.ensure(row.height);
            self.draw_row(&row, left, border);
        }
    }

    fn code_block(&mut self, lines: &[String]) {
        let font = Font::COURIER;
        let inner = self.width - 2.0 * CODE_PAD_X;
        let per_line = ((inner / font.text_width(" ", CODE_SIZE)).floor() as usize).max(1);

        let mut visual: Vec<String> = Vec::new();
        for line in lines {
            let expanded: Vec<char> = line.replace('\t', TAB).chars().collect();
            if expanded.is_empty() {
                visual.push(String::new());
            }
            for chunk in expanded.chunks(per_line) {
                visual.push(chunk.iter().collect());
            }
        }

        let mut remaining: &[String] = &visual;
        while !remaining.is_empty() {
            let available = self.y - FRAME_BOTTOM - 2.0 * CODE_PAD_Y;
            let fits = (available / CODE_LEADING).floor().max(0.0) as usize;
            if fits == 0 && !self.fresh {
                self.new_page();
                continue;
            }
            let take = fits.clamp(1, remaining.len());
            let height = take as f32 * CODE_LEADING + 2.0 * CODE_PAD_Y;

            self.page.ops.push(DrawOp::Rect {
                x: self.left,
                y: self.y - height,
                width: self.width,
                height,
                fill: Some(Rgb::hex("#F5F5F5")),
                stroke: Some((Rgb::hex("#DDDDDD"), BOX_BORDER)),
            });
            let mut baseline = self.y - CODE_PAD_Y - CODE_SIZE;
            for line in &remaining[..take] {
                if !line.trim().is_empty() {
                    self.page.ops.push(DrawOp::Text {
                        x: self.left + CODE_PAD_X,
                        y: baseline,
                        text: line.clone(),
                        font,
                        size: CODE_SIZE,
                        color: Rgb::BLACK,
                        word_spacing: 0.0,
                    });
                }
                baseline -= CODE_LEADING;
            }
            self.advance(height);
            remaining = &remaining[take..];
        }
    }

    fn rule(&mut self) {
        self.ensure(2.0 * RULE_GAP + RULE_WIDTH);
        self.gap(RULE_GAP);
        self.page.ops.push(DrawOp::Line {
            from: (self.left, self.y),
            to: (self.left + self.width, self.y),
            color: Rgb::hex("#DDDDDD"),
            width: RULE_WIDTH,
        });
        self.advance(RULE_WIDTH + RULE_GAP);
    }

    fn callout(&mut self, body: &[Flowable]) {
        self.ensure(2.0 * CALLOUT_PAD_Y + KEEP_WITH_NEXT);
        let outer = self.callout.take();
        let (left, width) = (self.left, self.width);

        self.callout = Some(OpenCallout {
            op_index: self.page.ops.len(),
            top: self.y,
            left,
            width,
        });
        self.advance(CALLOUT_PAD_Y);
        self.left += CALLOUT_PAD_X;
        self.width -= 2.0 * CALLOUT_PAD_X;

        for flowable in body {
            self.flowable(flowable);
        }

        self.advance(CALLOUT_PAD_Y);
        if let Some(open) = self.callout.take() {
            self.close_callout(&open, self.y);
        }
        self.left = left;
        self.width = width;
        self.callout = outer;
    }

    /// Puts the callout box under everything drawn since it opened.
    fn close_callout(&mut self, open: &OpenCallout, bottom: f32) {
        let bottom = bottom.max(FRAME_BOTTOM).min(open.top);
        let index = open.op_index.min(self.page.ops.len());
        self.page.ops.insert(
            index,
            DrawOp::Rect {
                x: open.left,
                y: bottom,
                width: open.width,
                height: open.top - bottom,
                fill: Some(Rgb::hex("#F5F5F5")),
                stroke: Some((Rgb::hex("#DDDDDD"), BOX_BORDER)),
            },
        );
    }

    fn table_of_contents(&mut self) {
        let entries = self.known_toc;
        for entry in entries {
            let (indent, style) = toc_style(entry.level);
            let number = entry.page.to_string();
            let number_width = style.font.text_width(&number, style.size);
            let left = self.left + indent;
            let right = self.left + self.width;
            let text_width = (right - left - number_width - 24.0).max(1.0);

            let tokens = [Token::Text(entry.text.clone(), RunStyle::default())];
            let lines = wrap(&tokens, &style, text_width);
            let line_count = lines.len().max(1);

            self.ensure(style.space_before + line_count as f32 * style.leading);
            self.gap(style.space_before);
            let top = self.y;
            self.place_lines(&lines, &style, left, text_width, top);
            self.advance(line_count as f32 * style.leading);

            let baseline = self.y + style.leading - style.size;
            let text_end = left + lines.last().map_or(0.0, |line| line.width);
            self.page.ops.push(DrawOp::Text {
                x: right - number_width,
                y: baseline,
                text: number,
                font: style.font,
                size: style.size,
                color: style.color,
                word_spacing: 0.0,
            });

            let leader_unit = style.font.text_width(" .", style.size);
            let leader_room = right - number_width - 4.0 - (text_end + 4.0);
            let dots = (leader_room / leader_unit).floor().max(0.0) as usize;
            if dots > 0 {
                self.page.ops.push(DrawOp::Text {
                    x: right - number_width - 4.0 - dots as f32 * leader_unit,
                    y: baseline,
                    text: " .".repeat(dots),
                    font: style.font,
                    size: style.size,
                    color: style.color,
                    word_spacing: 0.0,
                });
            }

            self.page.links.push(LinkArea {
                rect: [left, self.y, right, top],
                target: LinkTarget::Dest(entry.anchor.clone()),
            });
        }
    }
}

fn toc_style(level: u8) -> (f32, ParagraphStyle) {
    let base = ParagraphStyle::for_role(StyleRole::TableCell);
    if level == 0 {
        (
            0.0,
            ParagraphStyle {
                size: 11.0,
                leading: 14.0,
                space_before: 4.0,
                ..base
            },
        )
    } else {
        (
            12.0,
            ParagraphStyle {
                size: 10.0,
                leading: 12.0,
                space_before: 2.0,
                ..base
            },
        )
    }
}
