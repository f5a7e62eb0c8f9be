//! Parsing the stdout wire contract.

use std::sync::OnceLock;

use regex::Regex;

/// The wire contract: one line per test case. Any change here must be
/// mirrored in every language's `MAIN` template.
fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^TEST-(.+?)\.\.\.(.+)$").expect("marker regex is valid"))
}

/// Extract `(test_case_id, token)` pairs from driver stdout.
///
/// Extra output is permitted and ignored. When a test case id appears more
/// than once the last occurrence wins.
pub fn parse_test_markers(stdout: &str) -> Vec<(String, String)> {
    marker_regex()
        .captures_iter(stdout)
        .map(|caps| (caps[1].to_string(), caps[2].trim_end().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_markers_and_ignores_noise() {
        let stdout = "compiling...\nTEST-0...PASSED\ndebug: x=3\nTEST-1...FAILED\n";
        assert_eq!(
            parse_test_markers(stdout),
            vec![
                ("0".to_string(), "PASSED".to_string()),
                ("1".to_string(), "FAILED".to_string()),
            ]
        );
    }

    #[test]
    fn captures_arbitrary_error_tokens() {
        let stdout = "TEST-7...ZeroDivisionError\n";
        assert_eq!(
            parse_test_markers(stdout),
            vec![("7".to_string(), "ZeroDivisionError".to_string())]
        );
    }

    #[test]
    fn id_match_is_non_greedy() {
        // The id stops at the first "..." so tokens may contain dots.
        let stdout = "TEST-3...a.b\n";
        assert_eq!(
            parse_test_markers(stdout),
            vec![("3".to_string(), "a.b".to_string())]
        );
    }

    #[test]
    fn requires_line_anchoring() {
        assert!(parse_test_markers("noise TEST-0...PASSED").is_empty());
        assert!(parse_test_markers("").is_empty());
    }
}
