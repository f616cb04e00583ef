use log::warn;

/// Backtick-fenced code block.
///
/// Fences are raw zones: lines between the opener and the closer are kept
/// verbatim and never classified or inline formatted.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// Whether a line opens or closes a fence. Leading whitespace and any
    /// info string after the backticks are ignored.
    pub fn is_fence(line: &str) -> bool {
        line.trim().starts_with(Self::BACKTICKS)
    }

    /// Collects the body of a fence whose opener is at `opener`.
    ///
    /// Returns the verbatim body lines and the index just past the closing
    /// fence. An unterminated fence runs to the end of the document.
    pub fn collect<S: AsRef<str>>(lines: &[S], opener: usize) -> (Vec<String>, usize) {
        let mut body = Vec::new();
        let mut index = opener + 1;
        while index < lines.len() {
            let candidate = lines[index].as_ref();
            index += 1;
            if Self::is_fence(candidate) {
                return (body, index);
            }
            body.push(candidate.to_string());
        }
        warn!("code fence opened on line {} is never closed", opener + 1);
        (body, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detect_backtick_fence() {
        assert!(CodeFence::is_fence("```rust"));
        assert!(CodeFence::is_fence("   ```"));
    }

    #[test]
    fn no_fence() {
        assert!(!CodeFence::is_fence("hello"));
        assert!(!CodeFence::is_fence("~~~"));
        assert!(!CodeFence::is_fence("``inline``"));
    }

    #[test]
    fn collects_until_closer() {
        let lines = ["```sh", "  cargo run", "", "# not a heading", "```", "after"];
        let (body, next) = CodeFence::collect(&lines, 0);
        assert_eq!(body, vec!["  cargo run", "", "# not a heading"]);
        assert_eq!(next, 5);
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let lines = ["```", "a", "b"];
        let (body, next) = CodeFence::collect(&lines, 0);
        assert_eq!(body, vec!["a", "b"]);
        assert_eq!(next, 3);
    }

    #[test]
    fn empty_fence_has_no_body() {
        let lines = ["```", "```"];
        let (body, next) = CodeFence::collect(&lines, 0);
        assert!(body.is_empty());
        assert_eq!(next, 2);
    }
}
