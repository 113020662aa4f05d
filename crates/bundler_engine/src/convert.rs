use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use url::Url;

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str, base_url: Option<&str>) -> String;
}

/// Walks the parsed DOM and emits Markdown with ATX headings.
///
/// Relative link and image targets are resolved against `base_url` when one
/// is given. Script-like elements are skipped even if the extractor let them
/// through.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl Converter for MarkdownConverter {
    fn to_markdown(&self, html: &str, base_url: Option<&str>) -> String {
        let fragment = Html::parse_fragment(html);
        let base_url = base_url.and_then(|b| Url::parse(b).ok());
        let mut ctx = ConversionContext::new(base_url.as_ref());

        for child in fragment.root_element().children() {
            self.visit_node(child, &mut ctx);
        }

        ctx.into_output()
    }
}

impl MarkdownConverter {
    fn visit_node(&self, node: NodeRef<'_, Node>, ctx: &mut ConversionContext) {
        match node.value() {
            Node::Text(text) => ctx.append_text(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element, ctx);
                }
            }
            _ => {
                for child in node.children() {
                    self.visit_node(child, ctx);
                }
            }
        }
    }

    fn visit_element(&self, element: ElementRef, ctx: &mut ConversionContext) {
        let tag = element.value().name().to_ascii_lowercase();
        match tag.as_str() {
            "script" | "style" | "noscript" | "iframe" | "template" | "head" | "title" => {}
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = usize::from(tag.as_bytes()[1] - b'0');
                ctx.ensure_blank_line();
                ctx.push_str(&"#".repeat(level));
                ctx.push_str(" ");
                self.visit_children(element, ctx);
                ctx.ensure_blank_line();
            }
            "p" | "section" | "article" | "main" | "aside" | "figure" | "address" | "form"
            | "fieldset" | "dl" => {
                ctx.ensure_blank_line();
                self.visit_children(element, ctx);
                ctx.ensure_blank_line();
            }
            "div" | "figcaption" | "dt" | "dd" | "caption" => {
                ctx.ensure_newline();
                self.visit_children(element, ctx);
                ctx.ensure_newline();
            }
            "br" => ctx.ensure_newline(),
            "hr" => {
                ctx.ensure_blank_line();
                ctx.push_str("---");
                ctx.ensure_blank_line();
            }
            "ul" | "ol" => {
                if ctx.lists.is_empty() {
                    ctx.ensure_blank_line();
                } else {
                    ctx.ensure_newline();
                }
                ctx.lists.push(ListFrame {
                    ordered: tag == "ol",
                    next_index: 1,
                });
                self.visit_children(element, ctx);
                ctx.lists.pop();
                if ctx.lists.is_empty() {
                    ctx.ensure_blank_line();
                }
            }
            "li" => {
                ctx.ensure_newline();
                let depth = ctx.lists.len().saturating_sub(1);
                let marker = match ctx.lists.last_mut() {
                    Some(frame) if frame.ordered => {
                        let marker = format!("{}. ", frame.next_index);
                        frame.next_index += 1;
                        marker
                    }
                    _ => "- ".to_string(),
                };
                ctx.push_str(&"  ".repeat(depth));
                ctx.push_str(&marker);
                self.visit_children(element, ctx);
                ctx.ensure_newline();
            }
            "blockquote" => {
                let mut inner = ConversionContext::new(ctx.base_url);
                self.visit_children(element, &mut inner);
                let quoted = inner
                    .into_output()
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                ctx.ensure_blank_line();
                ctx.push_str(&quoted);
                ctx.ensure_blank_line();
            }
            "pre" => {
                let code: String = element.text().collect();
                ctx.ensure_blank_line();
                ctx.push_str("```\n");
                ctx.push_str(code.trim_matches('\n'));
                ctx.push_str("\n```");
                ctx.ensure_blank_line();
            }
            "code" | "kbd" | "samp" => {
                let code: String = element.text().collect();
                if !code.trim().is_empty() {
                    ctx.push_str(&format!("`{}`", code.trim()));
                }
            }
            "strong" | "b" => self.wrap_inline(element, ctx, "**"),
            "em" | "i" => self.wrap_inline(element, ctx, "*"),
            "a" => self.handle_anchor(element, ctx),
            "img" => self.handle_image(element, ctx),
            "tr" => self.handle_row(element, ctx),
            "table" | "thead" | "tbody" | "tfoot" => {
                ctx.ensure_newline();
                self.visit_children(element, ctx);
                ctx.ensure_newline();
            }
            _ => self.visit_children(element, ctx),
        }
    }

    fn visit_children(&self, element: ElementRef, ctx: &mut ConversionContext) {
        for child in element.children() {
            self.visit_node(child, ctx);
        }
    }

    /// Renders the children, then takes back what they produced.
    fn capture_children(&self, element: ElementRef, ctx: &mut ConversionContext) -> Captured {
        let start = ctx.builder.len();
        self.visit_children(element, ctx);
        let raw = &ctx.builder[start..];
        let captured = Captured {
            text: raw.trim().to_string(),
            leading_space: raw.starts_with(' '),
            trailing_space: raw.ends_with(' '),
            multiline: raw.contains('\n'),
        };
        ctx.truncate(start);
        captured
    }

    fn wrap_inline(&self, element: ElementRef, ctx: &mut ConversionContext, marker: &str) {
        let captured = self.capture_children(element, ctx);
        if !captured.text.is_empty() {
            ctx.push_captured(&format!("{marker}{}{marker}", captured.text), &captured);
        }
    }

    fn handle_anchor(&self, element: ElementRef, ctx: &mut ConversionContext) {
        let target = element
            .value()
            .attr("href")
            .and_then(|href| resolve_url(href, ctx.base_url));
        let captured = self.capture_children(element, ctx);
        if captured.multiline {
            // Block content stays in place; the target follows as its own paragraph.
            self.visit_children(element, ctx);
            if let Some(url) = target {
                ctx.ensure_blank_line();
                ctx.push_str(&format!("<{url}>"));
                ctx.ensure_blank_line();
            }
            return;
        }
        match target {
            Some(url) if !captured.text.is_empty() => {
                ctx.push_captured(&format!("[{}]({url})", captured.text), &captured)
            }
            _ if !captured.text.is_empty() => ctx.push_captured(&captured.text, &captured),
            _ => {}
        }
    }

    fn handle_image(&self, element: ElementRef, ctx: &mut ConversionContext) {
        let alt = element.value().attr("alt").map(str::trim).unwrap_or("");
        if let Some(url) = element
            .value()
            .attr("src")
            .and_then(|src| resolve_url(src, ctx.base_url))
        {
            ctx.push_str(&format!("![{alt}]({url})"));
        }
    }

    fn handle_row(&self, row: ElementRef, ctx: &mut ConversionContext) {
        let mut cells = Vec::new();
        let mut header = false;
        for cell in row.children().filter_map(ElementRef::wrap) {
            let name = cell.value().name();
            if name != "td" && name != "th" {
                continue;
            }
            header |= name == "th";
            cells.push(self.capture_children(cell, ctx).text.replace('\n', " "));
        }
        if cells.is_empty() {
            return;
        }
        ctx.ensure_newline();
        ctx.push_str(&format!("| {} |", cells.join(" | ")));
        if header {
            ctx.push_str("\n");
            ctx.push_str(&format!("|{}", " --- |".repeat(cells.len())));
        }
        ctx.ensure_newline();
    }
}

fn resolve_url(reference: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.into());
    }
    match base {
        Some(base) => base.join(trimmed).ok().map(Into::into),
        None => Some(trimmed.to_string()),
    }
}

struct Captured {
    text: String,
    leading_space: bool,
    trailing_space: bool,
    multiline: bool,
}

struct ListFrame {
    ordered: bool,
    next_index: usize,
}

struct ConversionContext<'u> {
    builder: String,
    base_url: Option<&'u Url>,
    lists: Vec<ListFrame>,
}

impl<'u> ConversionContext<'u> {
    fn new(base_url: Option<&'u Url>) -> Self {
        Self {
            builder: String::new(),
            base_url,
            lists: Vec::new(),
        }
    }

    fn into_output(self) -> String {
        self.builder.trim().to_string()
    }

    fn last_char(&self) -> Option<char> {
        self.builder.chars().next_back()
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if matches!(self.last_char(), None | Some(' ') | Some('\n')) {
                    continue;
                }
                self.builder.push(' ');
            } else {
                self.builder.push(ch);
            }
        }
    }

    fn push_str(&mut self, text: &str) {
        self.builder.push_str(text);
    }

    /// Pushes inline markup, restoring the whitespace its source had around it.
    fn push_captured(&mut self, markup: &str, captured: &Captured) {
        if captured.leading_space && !matches!(self.last_char(), None | Some(' ') | Some('\n')) {
            self.builder.push(' ');
        }
        self.builder.push_str(markup);
        if captured.trailing_space {
            self.builder.push(' ');
        }
    }

    fn truncate(&mut self, len: usize) {
        self.builder.truncate(len);
    }

    fn trim_trailing_spaces(&mut self) {
        let trimmed = self.builder.trim_end_matches(' ').len();
        self.builder.truncate(trimmed);
    }

    fn ensure_newline(&mut self) {
        self.trim_trailing_spaces();
        if self.builder.is_empty() || self.builder.ends_with('\n') {
            return;
        }
        self.builder.push('\n');
    }

    fn ensure_blank_line(&mut self) {
        self.ensure_newline();
        if self.builder.is_empty() || self.builder.ends_with("\n\n") {
            return;
        }
        self.builder.push('\n');
    }
}
