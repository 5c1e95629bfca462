/// Rejoins the lines of `content` with `\n`, dropping `\r\n` line endings and
/// any trailing newline.
pub fn join_lines(content: &str) -> String {
    content.lines().collect::<Vec<_>>().join("\n")
}

/// Whether `location` names an HTTP(S) resource rather than a local path.
pub fn is_url(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines("a\r\nb\nc\n"), "a\nb\nc");
        assert_eq!(join_lines(""), "");
        assert_eq!(join_lines("\n\nx"), "\n\nx");
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/a.txt"));
        assert!(is_url("HTTP://example.com"));
        assert!(!is_url("./http-notes.txt"));
        assert!(!is_url("/tmp/lexicon.csv"));
    }
}
