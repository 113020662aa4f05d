/// Formats one page as a self-contained bundle block.
///
/// The trailing `---` separator plus blank line lets blocks be concatenated
/// without any further glue.
pub fn build_page_block(source_url: &str, title: Option<&str>, body_markdown: &str) -> String {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(source_url);
    format!("# Source: {source_url}\n\n## {title}\n\n{body_markdown}\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::build_page_block;

    #[test]
    fn block_has_fixed_shape() {
        assert_eq!(
            build_page_block("https://a.example/x", Some("Example"), "Hello"),
            "# Source: https://a.example/x\n\n## Example\n\nHello\n\n---\n\n"
        );
    }

    #[test]
    fn missing_title_falls_back_to_url() {
        let block = build_page_block("https://a.example/x", None, "");
        assert!(block.contains("## https://a.example/x\n"));
    }
}
