use markdown_dossier_engine::StyleRole;

use crate::fonts::Font;

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
    pub const NAVY: Rgb = Rgb(31.0 / 255.0, 78.0 / 255.0, 121.0 / 255.0);
    pub const WATERMARK: Rgb = Rgb(0.9, 0.9, 0.9);

    /// Parses `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .map(|value| f32::from(value) / 255.0)
        };
        Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Like [`Rgb::from_hex`] for compile-time known colours.
    pub fn hex(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::BLACK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

/// Font, spacing and colour of a paragraph role, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub font: Font,
    pub size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub right_indent: f32,
    pub color: Rgb,
    pub align: Align,
}

impl ParagraphStyle {
    const BODY: ParagraphStyle = ParagraphStyle {
        font: Font::HELVETICA,
        size: 10.0,
        leading: 12.0,
        space_before: 0.0,
        space_after: 0.0,
        left_indent: 0.0,
        right_indent: 0.0,
        color: Rgb::BLACK,
        align: Align::Left,
    };

    pub fn for_role(role: StyleRole) -> Self {
        let base = Self::BODY;
        match role {
            StyleRole::Body => Self {
                leading: 14.0,
                space_after: 8.0,
                ..base
            },
            StyleRole::Quote => Self {
                font: Font::HELVETICA_OBLIQUE,
                left_indent: 18.0,
                right_indent: 18.0,
                space_before: 6.0,
                space_after: 6.0,
                color: Rgb::NAVY,
                ..base
            },
            StyleRole::Bullet => Self {
                left_indent: 18.0,
                space_after: 4.0,
                ..base
            },
            StyleRole::Heading1 => Self {
                font: Font::HELVETICA_BOLD,
                size: 18.0,
                leading: 20.0,
                space_before: 18.0,
                space_after: 10.0,
                ..base
            },
            StyleRole::Heading2 => Self {
                font: Font::HELVETICA_BOLD,
                size: 14.0,
                leading: 18.0,
                space_before: 14.0,
                space_after: 8.0,
                ..base
            },
            StyleRole::Heading3 => Self {
                font: Font::HELVETICA_BOLD_OBLIQUE,
                size: 12.0,
                leading: 16.0,
                space_before: 12.0,
                space_after: 6.0,
                ..base
            },
            StyleRole::TldrHeading => Self {
                font: Font::HELVETICA_BOLD_OBLIQUE,
                size: 12.0,
                leading: 14.4,
                space_after: 6.0,
                color: Rgb::NAVY,
                ..base
            },
            StyleRole::TldrBody => Self {
                leading: 14.0,
                left_indent: 16.0,
                space_after: 6.0,
                ..base
            },
            StyleRole::TableHeader => Self {
                font: Font::HELVETICA_BOLD,
                color: Rgb::WHITE,
                align: Align::Center,
                ..base
            },
            StyleRole::TableCell => base,
            StyleRole::CoverTitle => Self {
                font: Font::HELVETICA_BOLD,
                size: 32.0,
                leading: 36.0,
                space_after: 24.0,
                align: Align::Center,
                ..base
            },
            StyleRole::CoverSubtitle => Self {
                font: Font::HELVETICA_BOLD,
                size: 16.0,
                leading: 20.0,
                space_after: 48.0,
                color: Rgb::hex("#2F5597"),
                align: Align::Center,
                ..base
            },
            StyleRole::Legal => Self {
                size: 9.0,
                leading: 12.0,
                space_before: 24.0,
                color: Rgb::hex("#555555"),
                align: Align::Justify,
                ..base
            },
            StyleRole::TocTitle => Self {
                font: Font::HELVETICA_BOLD,
                size: 18.0,
                leading: 22.0,
                space_after: 18.0,
                align: Align::Center,
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(Rgb::from_hex("#FFFFFF"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("#000000"), Some(Rgb::BLACK));
        assert_eq!(Rgb::from_hex("#1F4E79"), Some(Rgb::NAVY));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgb::from_hex("1F4E79"), None);
        assert_eq!(Rgb::from_hex("#1F4E7"), None);
        assert_eq!(Rgb::from_hex("#GGGGGG"), None);
        assert_eq!(Rgb::hex("nope"), Rgb::BLACK);
    }

    #[test]
    fn headings_are_bold_and_shrink_by_level() {
        let sizes: Vec<f32> = [StyleRole::Heading1, StyleRole::Heading2, StyleRole::Heading3]
            .into_iter()
            .map(|role| ParagraphStyle::for_role(role).size)
            .collect();
        assert_eq!(sizes, vec![18.0, 14.0, 12.0]);
        assert!(ParagraphStyle::for_role(StyleRole::Heading1).font.bold);
    }

    #[test]
    fn legal_block_is_justified() {
        let style = ParagraphStyle::for_role(StyleRole::Legal);
        assert_eq!(style.align, Align::Justify);
        assert_eq!(style.size, 9.0);
    }
}
