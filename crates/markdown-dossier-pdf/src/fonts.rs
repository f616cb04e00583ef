use markdown_dossier_engine::STANDARD_FONTS;

/// Glyph widths of printable ASCII (0x20..=0x7E) in 1/1000 em.
type AsciiWidths = [u16; 95];

#[rustfmt::skip]
const HELVETICA_WIDTHS: AsciiWidths = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: AsciiWidths = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

// Times-Roman; the bold and italic cuts are measured with the same table.
#[rustfmt::skip]
const TIMES_WIDTHS: AsciiWidths = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Helvetica,
    Times,
    Courier,
    Symbol,
    ZapfDingbats,
}

/// One of the standard Type1 fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Font {
    pub family: Family,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub const HELVETICA: Font = Font::new(Family::Helvetica, false, false);
    pub const HELVETICA_BOLD: Font = Font::new(Family::Helvetica, true, false);
    pub const HELVETICA_OBLIQUE: Font = Font::new(Family::Helvetica, false, true);
    pub const HELVETICA_BOLD_OBLIQUE: Font = Font::new(Family::Helvetica, true, true);
    pub const COURIER: Font = Font::new(Family::Courier, false, false);

    pub const fn new(family: Family, bold: bool, italic: bool) -> Self {
        Self {
            family,
            bold,
            italic,
        }
    }

    /// PostScript name of the font, one of [`STANDARD_FONTS`].
    pub fn base_name(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (Family::Helvetica, false, false) => "Helvetica",
            (Family::Helvetica, true, false) => "Helvetica-Bold",
            (Family::Helvetica, false, true) => "Helvetica-Oblique",
            (Family::Helvetica, true, true) => "Helvetica-BoldOblique",
            (Family::Times, false, false) => "Times-Roman",
            (Family::Times, true, false) => "Times-Bold",
            (Family::Times, false, true) => "Times-Italic",
            (Family::Times, true, true) => "Times-BoldItalic",
            (Family::Courier, false, false) => "Courier",
            (Family::Courier, true, false) => "Courier-Bold",
            (Family::Courier, false, true) => "Courier-Oblique",
            (Family::Courier, true, true) => "Courier-BoldOblique",
            (Family::Symbol, _, _) => "Symbol",
            (Family::ZapfDingbats, _, _) => "ZapfDingbats",
        }
    }

    /// Parses a standard font name such as `Times-BoldItalic`.
    pub fn from_base_name(name: &str) -> Option<Self> {
        Self::all().find(|font| font.base_name().eq_ignore_ascii_case(name.trim()))
    }

    /// Font for a `<font face>` list: the first standard name wins, anything
    /// else falls back to Courier.
    pub fn from_face(faces: &str) -> Self {
        faces
            .split(',')
            .find_map(Self::from_base_name)
            .unwrap_or(Self::COURIER)
    }

    /// The same family with bold and italic added where requested.
    /// Symbol fonts have no styled cuts.
    pub fn emphasised(self, bold: bool, italic: bool) -> Self {
        match self.family {
            Family::Symbol | Family::ZapfDingbats => self,
            family => Self::new(family, self.bold || bold, self.italic || italic),
        }
    }

    /// Every standard font, in [`STANDARD_FONTS`] order.
    pub fn all() -> impl Iterator<Item = Font> {
        let families = [Family::Courier, Family::Helvetica, Family::Times];
        families
            .into_iter()
            .flat_map(|family| {
                [(false, false), (true, false), (false, true), (true, true)]
                    .into_iter()
                    .map(move |(bold, italic)| Font::new(family, bold, italic))
            })
            .chain([
                Font::new(Family::Symbol, false, false),
                Font::new(Family::ZapfDingbats, false, false),
            ])
    }

    /// Name of the font in page resource dictionaries.
    pub fn resource_name(&self) -> String {
        let index = STANDARD_FONTS
            .iter()
            .position(|name| *name == self.base_name())
            .unwrap_or(0);
        format!("F{}", index + 1)
    }

    /// Whether the font uses a text encoding; symbolic fonts keep their own.
    pub fn is_symbolic(&self) -> bool {
        matches!(self.family, Family::Symbol | Family::ZapfDingbats)
    }

    /// Advance width of `c` in 1/1000 em.
    pub fn char_width(&self, c: char) -> u16 {
        let table = match self.family {
            Family::Courier => return 600,
            Family::Symbol | Family::ZapfDingbats => return 600,
            Family::Helvetica if self.bold => &HELVETICA_BOLD_WIDTHS,
            Family::Helvetica => &HELVETICA_WIDTHS,
            Family::Times => &TIMES_WIDTHS,
        };
        let c = if c == '\t' { ' ' } else { c };
        match c {
            ' '..='~' => table[c as usize - 0x20],
            '•' => 350,
            '—' => 1000,
            _ if self.family == Family::Times => 500,
            _ => 556,
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}
