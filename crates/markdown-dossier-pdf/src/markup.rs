//! Reader for the inline markup produced by the formatter.
//!
//! Understands `<b>`, `<i>`, `<u>`, `<link href>`, `<span backcolor>`,
//! `<font face>` and `<br/>`. Unknown tags are ignored, unmatched closers
//! are dropped and a stray `<` without a closing `>` is kept as text.

use std::sync::OnceLock;

use regex::Regex;

use crate::style::Rgb;

/// Character styling in effect for a run of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Face list from the innermost `<font face>`.
    pub face: Option<String>,
    pub link: Option<String>,
    pub backcolor: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String, RunStyle),
    Break,
}

#[derive(Debug, Clone)]
enum Tag {
    Bold,
    Italic,
    Underline,
    Link(String),
    Back(Option<Rgb>),
    Face(String),
    Other,
}

struct OpenTag {
    name: String,
    tag: Tag,
}

fn attribute_pattern() -> &'static Regex {
    static ATTRIBUTE_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE_REGEX.get_or_init(|| {
        Regex::new(r#"([A-Za-z]+)\s*=\s*"([^"]*)""#).expect("Invalid markup attribute regex")
    })
}

fn attribute(body: &str, wanted: &str) -> Option<String> {
    attribute_pattern()
        .captures_iter(body)
        .find(|caps| caps[1].eq_ignore_ascii_case(wanted))
        .map(|caps| html_escape::decode_html_entities(&caps[2]).into_owned())
}

fn open_tag(body: &str) -> OpenTag {
    let name = body
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let tag = match name.as_str() {
        "b" | "strong" => Tag::Bold,
        "i" | "em" => Tag::Italic,
        "u" => Tag::Underline,
        "link" | "a" => match attribute(body, "href") {
            Some(href) => Tag::Link(href),
            None => Tag::Other,
        },
        "span" => Tag::Back(attribute(body, "backcolor").and_then(|c| Rgb::from_hex(&c))),
        "font" => match attribute(body, "face") {
            Some(face) => Tag::Face(face),
            None => Tag::Other,
        },
        _ => Tag::Other,
    };
    OpenTag { name, tag }
}

fn current_style(stack: &[OpenTag]) -> RunStyle {
    stack
        .iter()
        .fold(RunStyle::default(), |mut style, open| {
            match &open.tag {
                Tag::Bold => style.bold = true,
                Tag::Italic => style.italic = true,
                Tag::Underline => style.underline = true,
                Tag::Link(href) => style.link = Some(href.clone()),
                Tag::Back(Some(color)) => style.backcolor = Some(*color),
                Tag::Face(face) => style.face = Some(face.clone()),
                Tag::Back(None) | Tag::Other => {}
            }
            style
        })
}

fn push_text(tokens: &mut Vec<Token>, raw: &str, stack: &[OpenTag]) {
    if raw.is_empty() {
        return;
    }
    let text = html_escape::decode_html_entities(raw).into_owned();
    tokens.push(Token::Text(text, current_style(stack)));
}

/// Splits markup into styled text runs and line breaks.
pub fn parse_markup(markup: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        push_text(&mut tokens, &rest[..open], &stack);
        let body = rest[open + 1..open + close].trim();
        rest = &rest[open + close + 1..];

        if let Some(name) = body.strip_prefix('/') {
            let name = name.trim().to_ascii_lowercase();
            if let Some(index) = stack.iter().rposition(|tag| tag.name == name) {
                stack.remove(index);
            }
        } else if matches!(
            body.split_whitespace().collect::<String>().to_ascii_lowercase().as_str(),
            "br" | "br/"
        ) {
            tokens.push(Token::Break);
        } else {
            let tag = open_tag(body);
            if !body.ends_with('/') {
                stack.push(tag);
            }
        }
    }
    push_text(&mut tokens, rest, &stack);
    tokens
}
