use bundler_engine::{
    BundlerConfig, Converter, Extractor, MarkdownConverter, NoiseStrippingExtractor, Transformer,
};
use pretty_assertions::assert_eq;

const URL: &str = "https://valid.example/a";

#[test]
fn block_has_source_title_body_and_separator() {
    let html = "<html><head><title>Example</title></head><body><p>Hello</p></body></html>";
    let block = Transformer::default().transform(html, URL);

    assert!(block.starts_with("# Source: https://valid.example/a\n"));
    assert!(block.contains("\n## Example\n"));
    assert!(block.contains("Hello"));
    assert_eq!(block.trim_end().lines().last(), Some("---"));
    assert!(block.ends_with("\n\n---\n\n"));
}

#[test]
fn exact_block_for_simple_page() {
    let html = "<html><head><title>Example</title></head><body><h1>Intro</h1><p>Hello</p></body></html>";
    assert_eq!(
        Transformer::default().transform(html, URL),
        "# Source: https://valid.example/a\n\n## Example\n\n# Intro\n\nHello\n\n---\n\n"
    );
}

#[test]
fn noise_elements_never_reach_markdown() {
    let html = r#"
    <html>
      <head><title>T</title><style>.x { color: red }</style></head>
      <body>
        <header>SITE BANNER</header>
        <nav><a href="/home">NAV LINK</a></nav>
        <script>var tracking = "SCRIPT TEXT";</script>
        <main><p>Real content</p></main>
        <footer>COPYRIGHT FOOTER</footer>
      </body>
    </html>"#;
    let block = Transformer::default().transform(html, URL);

    for noise in [
        "SITE BANNER",
        "NAV LINK",
        "SCRIPT TEXT",
        "color: red",
        "COPYRIGHT FOOTER",
    ] {
        assert!(!block.contains(noise), "{noise:?} leaked into {block:?}");
    }
    assert!(block.contains("Real content"));
}

#[test]
fn missing_title_falls_back_to_source_url() {
    let block = Transformer::default().transform("<p>No title here</p>", URL);
    assert!(block.contains("## https://valid.example/a\n"));
    assert!(block.contains("No title here"));
}

#[test]
fn headings_are_atx_style() {
    let html = "<body><h2>Section</h2><p>x</p><h3>Deeper</h3></body>";
    let block = Transformer::default().transform(html, URL);
    assert!(block.contains("\n## Section\n"));
    assert!(block.contains("\n### Deeper\n"));
    assert!(!block.contains("====="));
    assert!(!block.contains("-----\n"));
}

#[test]
fn malformed_html_degrades_gracefully() {
    let html = "<html><head><title>Broken</title><body><p>unclosed <b>bold <i>mixed</p></div></span>tail";
    let block = Transformer::default().transform(html, URL);
    assert!(block.starts_with("# Source: "));
    assert!(block.contains("unclosed"));
    assert!(block.contains("tail"));
}

#[test]
fn configured_noise_tags_replace_defaults() {
    let config = BundlerConfig {
        noise_tags: vec!["aside".to_string()],
        ..BundlerConfig::default()
    };
    let html = "<body><aside>SIDEBAR</aside><nav>MENU</nav><p>Body</p></body>";
    let block = Transformer::from_config(&config).transform(html, URL);
    assert!(!block.contains("SIDEBAR"));
    assert!(block.contains("MENU"));
}

#[test]
fn extractor_and_converter_compose_deterministically() {
    let html = r#"<html><head><title>X</title></head><body><p>A</p><p><a href="/b">B</a></p></body></html>"#;
    let extracted = NoiseStrippingExtractor::default().extract(html);
    let first = MarkdownConverter.to_markdown(&extracted.content_html, Some(URL));
    let second = MarkdownConverter.to_markdown(&extracted.content_html, Some(URL));
    assert_eq!(extracted.title.as_deref(), Some("X"));
    assert_eq!(first, "A\n\n[B](https://valid.example/b)");
    assert_eq!(first, second);
}
