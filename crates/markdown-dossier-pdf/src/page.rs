use crate::fonts::Font;
use crate::style::Rgb;

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
/// One inch on every side.
pub const MARGIN: f32 = 72.0;
pub const FRAME_LEFT: f32 = MARGIN;
pub const FRAME_TOP: f32 = PAGE_HEIGHT - MARGIN;
pub const FRAME_BOTTOM: f32 = MARGIN;
pub const FRAME_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// A drawing instruction in page coordinates (origin bottom left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Rgb,
        /// Extra space added to every space character, for justified lines.
        word_spacing: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<(Rgb, f32)>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
        width: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    Uri(String),
    /// A named destination, i.e. a heading anchor.
    Dest(String),
}

/// A clickable rectangle `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkArea {
    pub rect: [f32; 4],
    pub target: LinkTarget,
}

/// Everything placed on one page by the layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
    pub links: Vec<LinkArea>,
    /// Named destinations as `(anchor, top y)`.
    pub dests: Vec<(String, f32)>,
}

impl PageLayout {
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty() && self.dests.is_empty()
    }

    /// Text drawn on the page, one entry per text op.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
