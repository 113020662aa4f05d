const TRUNCATED_MARKER: &str = "...";
pub const MAX_PREVIEW_CHARS: usize = 1000;

/// First `MAX_PREVIEW_CHARS` characters of a bundle, marked when cut short.
pub fn bundle_preview(markdown: &str) -> String {
    match markdown.char_indices().nth(MAX_PREVIEW_CHARS) {
        None => markdown.to_string(),
        Some((end, _)) => format!("{}{TRUNCATED_MARKER}", &markdown[..end]),
    }
}

#[cfg(test)]
mod tests {
    use super::{bundle_preview, MAX_PREVIEW_CHARS};

    #[test]
    fn short_content_kept_as_is() {
        let content = "short preview";
        assert_eq!(bundle_preview(content), content);
    }

    #[test]
    fn exactly_max_is_not_marked() {
        let content = "a".repeat(MAX_PREVIEW_CHARS);
        assert_eq!(bundle_preview(&content), content);
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let content = "é".repeat(MAX_PREVIEW_CHARS + 5);
        let preview = bundle_preview(&content);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), MAX_PREVIEW_CHARS + 3);
    }
}
