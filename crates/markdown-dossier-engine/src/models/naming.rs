//! Titles and file names derived from an input folder name.

use std::sync::OnceLock;

use regex::Regex;

fn leading_number_pattern() -> &'static Regex {
    static LEADING_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    LEADING_NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^\d+[\-_.\s]*").expect("Invalid leading number regex")
    })
}

fn separator_pattern() -> &'static Regex {
    static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[\-_.]+").expect("Invalid separator regex"))
}

fn whitespace_pattern() -> &'static Regex {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn filename_space_pattern() -> &'static Regex {
    static FILENAME_SPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    FILENAME_SPACE_REGEX
        .get_or_init(|| Regex::new(r"[\s_]+").expect("Invalid filename space regex"))
}

fn filename_strip_pattern() -> &'static Regex {
    static FILENAME_STRIP_REGEX: OnceLock<Regex> = OnceLock::new();
    FILENAME_STRIP_REGEX
        .get_or_init(|| Regex::new(r"[^A-Za-z0-9\-]+").expect("Invalid filename strip regex"))
}

/// Upper-cases the first letter of every run of letters, lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Human-friendly document title from a folder name.
///
/// ```
/// use markdown_dossier_engine::derive_title;
///
/// assert_eq!(derive_title("02-technical-specifications"), "Technical Specifications");
/// assert_eq!(derive_title("03_systems"), "Systems");
/// ```
pub fn derive_title(folder_name: &str) -> String {
    let base = leading_number_pattern().replace(folder_name, "");
    let base = separator_pattern().replace_all(base.trim(), " ");
    let base = whitespace_pattern().replace_all(&base, " ");
    let base = base.trim();
    if base.is_empty() {
        let raw = folder_name.trim();
        return title_case(if raw.is_empty() { "Document" } else { raw });
    }
    title_case(base)
}

/// PDF file name for a folder name, keeping any number prefix.
///
/// ```
/// use markdown_dossier_engine::derive_filename;
///
/// assert_eq!(derive_filename("01-about"), "01-about.pdf");
/// assert_eq!(derive_filename("docs_v2"), "docs-v2.pdf");
/// ```
pub fn derive_filename(folder_name: &str) -> String {
    let base = filename_space_pattern().replace_all(folder_name.trim(), "-");
    let base = filename_strip_pattern().replace_all(&base, "");
    let base = base.trim_matches('-').to_lowercase();
    if base.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{base}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("01-about", "About")]
    #[case("02-technical-specifications", "Technical Specifications")]
    #[case("03.systems", "Systems")]
    #[case("04 -- road_map", "Road Map")]
    #[case("API guide", "Api Guide")]
    #[case("2024", "2024")]
    #[case("", "Document")]
    #[case("plain", "Plain")]
    fn derives_titles(#[case] folder: &str, #[case] expected: &str) {
        assert_eq!(derive_title(folder), expected);
    }

    #[rstest]
    #[case("01-about", "01-about.pdf")]
    #[case("02-technical-specifications", "02-technical-specifications.pdf")]
    #[case("docs_v2", "docs-v2.pdf")]
    #[case("My Docs (draft)", "my-docs-draft.pdf")]
    #[case("--", "document.pdf")]
    #[case("", "document.pdf")]
    fn derives_filenames(#[case] folder: &str, #[case] expected: &str) {
        assert_eq!(derive_filename(folder), expected);
    }

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("o'neil v2x"), "O'Neil V2X");
    }
}
