//! Greedy line breaking of styled runs.

use crate::fonts::Font;
use crate::markup::{RunStyle, Token};
use crate::style::{ParagraphStyle, Rgb};

/// A run of text drawn with a single look.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
    pub underline: bool,
    pub link: Option<String>,
    pub backcolor: Option<Rgb>,
}

impl Fragment {
    /// An empty fragment carrying the look of `run` inside a paragraph of `style`.
    pub fn styled(run: &RunStyle, style: &ParagraphStyle) -> Self {
        let base = match &run.face {
            Some(face) => Font::from_face(face),
            None => style.font,
        };
        Self {
            text: String::new(),
            font: base.emphasised(run.bold, run.italic),
            size: style.size,
            color: style.color,
            underline: run.underline,
            link: run.link.clone(),
            backcolor: run.backcolor,
        }
    }

    pub fn width(&self) -> f32 {
        self.font.text_width(&self.text, self.size)
    }

    pub fn spaces(&self) -> usize {
        self.text.matches(' ').count()
    }

    fn same_look(&self, other: &Fragment) -> bool {
        self.font == other.font
            && self.size == other.size
            && self.color == other.color
            && self.underline == other.underline
            && self.link == other.link
            && self.backcolor == other.backcolor
    }
}

/// One output line of a paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLine {
    pub fragments: Vec<Fragment>,
    pub width: f32,
}

impl TextLine {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn spaces(&self) -> usize {
        self.fragments.iter().map(Fragment::spaces).sum()
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    fn push(&mut self, text: &str, look: &Fragment) {
        let added = look.font.text_width(text, look.size);
        match self.fragments.last_mut() {
            Some(last) if last.same_look(look) => last.text.push_str(text),
            _ => self.fragments.push(Fragment {
                text: text.to_string(),
                ..look.clone()
            }),
        }
        self.width += added;
    }
}

enum Piece<'a> {
    Space,
    Word(&'a str),
}

fn pieces(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = None;
    for (index, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(begin) = start.take() {
                pieces.push(Piece::Word(&text[begin..index]));
            }
            if !matches!(pieces.last(), Some(Piece::Space)) {
                pieces.push(Piece::Space);
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(begin) = start {
        pieces.push(Piece::Word(&text[begin..]));
    }
    pieces
}

struct Wrapper {
    lines: Vec<TextLine>,
    line: TextLine,
    pending_space: Option<Fragment>,
    max_width: f32,
}

impl Wrapper {
    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.line));
        self.pending_space = None;
    }

    fn word(&mut self, word: &str, look: &Fragment) {
        let width = look.font.text_width(word, look.size);
        let space = self.pending_space.take().filter(|_| !self.line.is_empty());
        let space_width = space
            .as_ref()
            .map_or(0.0, |s| s.font.text_width(" ", s.size));

        if !self.line.is_empty() && self.line.width + space_width + width > self.max_width {
            self.break_line();
        } else if let Some(space) = space {
            self.line.push(" ", &space);
        }

        if width <= self.max_width {
            self.line.push(word, look);
            return;
        }

        // Longer than a whole line: split between characters.
        let mut buf = [0u8; 4];
        for c in word.chars() {
            let piece: &str = c.encode_utf8(&mut buf);
            let char_width = look.font.text_width(piece, look.size);
            if !self.line.is_empty() && self.line.width + char_width > self.max_width {
                self.break_line();
            }
            self.line.push(piece, look);
        }
    }

    fn finish(mut self) -> Vec<TextLine> {
        if !self.line.is_empty() {
            self.lines.push(self.line);
        }
        self.lines
    }
}

/// Breaks styled tokens into lines no wider than `max_width`.
///
/// Runs of whitespace collapse to one space, spaces at line starts are
/// dropped and `<br/>` forces a new line.
pub fn wrap(tokens: &[Token], style: &ParagraphStyle, max_width: f32) -> Vec<TextLine> {
    let mut wrapper = Wrapper {
        lines: Vec::new(),
        line: TextLine::default(),
        pending_space: None,
        max_width,
    };
    for token in tokens {
        match token {
            Token::Break => wrapper.break_line(),
            Token::Text(text, run) => {
                let look = Fragment::styled(run, style);
                for piece in pieces(text) {
                    match piece {
                        Piece::Space => wrapper.pending_space = Some(look.clone()),
                        Piece::Word(word) => wrapper.word(word, &look),
                    }
                }
            }
        }
    }
    wrapper.finish()
}
