/// Blockquote block type with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered in
/// classifier code.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Whether the raw line opens with a `>` in the first column.
    pub fn is_quoted(raw: &str) -> bool {
        raw.starts_with(Self::PREFIX)
    }

    /// Strips every leading `>` and space, however they interleave.
    ///
    /// Handles `> text`, `>> nested`, `> > spaced nested` and also plain
    /// indentation, which is stripped the same way.
    pub fn strip_prefixes(s: &str) -> &str {
        s.trim_start_matches([Self::PREFIX, ' '])
    }
}
