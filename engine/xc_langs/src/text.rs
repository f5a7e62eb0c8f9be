//! Shared escaping and comment-formatting helpers.
//!
//! Used by the default primitive literal formatters and by the per-language
//! docstring cleaners.

/// Escape a string for embedding in a quoted literal.
///
/// Control characters and backslashes are escaped, then the wrap character
/// itself; the opposite quote character is left bare since every supported
/// target accepts it unescaped inside the other quote style.
pub fn escape_string_chars(s: &str, wrap: char) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == wrap => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Escape comment terminators for C-family block comments.
pub fn escape_cpp_like_comment_chars(s: &str) -> String {
    s.replace("*/", "\\*/").replace("/*", "/\\*").replace('/', "\\/")
}

/// Escape `"""` sequences for triple-quoted docstrings.
pub fn escape_triple_quotes(s: &str) -> String {
    s.replace("\"\"\"", "\\\"\\\"\\\"")
}

/// Escape a line-comment introducer (`--`, `//`, `///`).
pub fn escape_line_comment(s: &str, marker: &str) -> String {
    let escaped: String = marker.chars().flat_map(|c| ['\\', c]).collect();
    s.replace(marker, &escaped)
}

/// Wrap text in a `/** ... */` block comment, one line per source line.
pub fn format_cpp_like_docstring(text: &str, join: &str) -> String {
    let mut lines = vec!["/**".to_string()];
    for line in text.lines() {
        lines.push(format!(" * {line}"));
    }
    lines.push(" */".to_string());
    lines.join(join)
}

/// Prefix every line with a line-comment marker.
pub fn format_line_comment_docstring(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_wrap_char_and_controls() {
        assert_eq!(escape_string_chars("a\"b", '"'), "a\\\"b");
        assert_eq!(escape_string_chars("a'b", '"'), "a'b");
        assert_eq!(escape_string_chars("line\nbreak\\", '"'), "line\\nbreak\\\\");
    }

    #[test]
    fn escapes_block_comment_terminators() {
        assert_eq!(escape_cpp_like_comment_chars("a */ b"), "a \\*\\/ b");
    }

    #[test]
    fn escapes_line_comments() {
        assert_eq!(escape_line_comment("x -- y", "--"), "x \\-\\- y");
        assert_eq!(escape_line_comment("a // b", "//"), "a \\/\\/ b");
    }

    #[test]
    fn block_docstring_shape() {
        assert_eq!(
            format_cpp_like_docstring("one\ntwo", "\n"),
            "/**\n * one\n * two\n */"
        );
    }

    #[test]
    fn line_docstring_shape() {
        assert_eq!(format_line_comment_docstring("one\ntwo", "#"), "# one\n# two");
    }
}
