//! Filesystem-safe name sanitization.

/// Sanitize a subject or filename for use on disk.
///
/// Non-ASCII characters are transliterated best-effort (`"Café"` → `"Cafe"`),
/// then everything but ASCII alphanumerics, spaces, hyphens and underscores
/// is dropped and trailing whitespace is trimmed. Idempotent.
pub fn safe_name(input: &str) -> String {
    deunicode::deunicode(input)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Sanitize an attachment filename.
///
/// Same rules as [`safe_name`], but dots survive so extensions stay intact
/// (`"data.csv"` stays `"data.csv"`).
pub fn safe_filename(input: &str) -> String {
    deunicode::deunicode(input)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(safe_name("Q3 Report: Final!"), "Q3 Report Final");
        assert_eq!(safe_name("a/b\\c:d*e"), "abcde");
    }

    #[test]
    fn test_keeps_allowed_characters() {
        assert_eq!(safe_name("weekly_status-2024 v2"), "weekly_status-2024 v2");
    }

    #[test]
    fn test_transliterates_diacritics() {
        assert_eq!(safe_name("Café con leña"), "Cafe con lena");
        assert_eq!(safe_name("Über straße"), "Uber strasse");
    }

    #[test]
    fn test_trims_trailing_whitespace() {
        assert_eq!(safe_name("hello!  "), "hello");
        // Leading whitespace is allowed, only trailing is trimmed
        assert_eq!(safe_name(" hi"), " hi");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(safe_name(""), "");
        assert_eq!(safe_name("???!!!"), "");
    }

    #[test]
    fn test_filename_keeps_extension() {
        assert_eq!(safe_filename("data.csv"), "data.csv");
        assert_eq!(safe_filename("résumé (final).pdf"), "resume final.pdf");
        assert_eq!(safe_filename("../../etc/passwd"), "....etcpasswd");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Q3 Report: Final!", "Café ☕", "  plain  ", "©2024®"] {
            let once = safe_name(s);
            assert_eq!(safe_name(&once), once, "not idempotent for {s:?}");
        }
    }
}
