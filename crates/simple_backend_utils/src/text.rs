//! Text input helpers.

/// Trimmed copy of the input or `None` if nothing remains after trimming.
pub fn trimmed_non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Remove Markdown code fences which some models wrap around JSON output.
///
/// Both the language tagged opening fence (```` ```json ````) and bare
/// fences are removed. The result is trimmed.
pub fn strip_code_fences(value: &str) -> String {
    value.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(trimmed_non_empty("   \n"), None);
        assert_eq!(trimmed_non_empty(" 3 kg "), Some("3 kg".to_string()));
    }

    #[test]
    fn fences_are_removed() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }
}
