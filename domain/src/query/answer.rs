//! Final-answer composition.
//!
//! Specialist output may carry markdown emphasis the caller's surfaces
//! cannot render; the manager strips it before returning the answer.

/// Remove markup characters (`*`, `#`) from specialist output.
pub fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| *c != '*' && *c != '#').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_emphasis_and_headers() {
        let raw = "## Status\n**INC000229** is *Open*.";
        assert_eq!(strip_markup(raw), " Status\nINC000229 is Open.");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let raw = "Incident INC000229 is Open. Engineer: A. Smith";
        assert_eq!(strip_markup(raw), raw);
    }

    #[test]
    fn test_never_contains_markup_characters() {
        let raw = "*#*# mixed #*";
        let cleaned = strip_markup(raw);
        assert!(!cleaned.contains('*'));
        assert!(!cleaned.contains('#'));
    }
}
